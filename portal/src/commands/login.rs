use anyhow::Context;
use portal_config::Config;
use portal_core_session_contracts::{guard::post_login_target, SessionLoginCommand, SessionService};
use portal_extern_contracts::auth::AuthApiService;
use portal_models::auth::LoginCredentials;
use tracing::info;

use crate::environment;

pub async fn login(
    config: Config,
    email: String,
    password: String,
    redirect: Option<&str>,
) -> anyhow::Result<()> {
    let credentials = LoginCredentials {
        email: email.parse().context("Invalid email address")?,
        password: password.into(),
    };

    let api = environment::auth_api(&config);
    let login = api.login(&credentials).await.context("Login failed")?;

    let session = environment::session(&config);
    session.login(SessionLoginCommand {
        identity: login.identity.clone(),
        token: login.token,
        expires_at: login.expires_at,
    });

    info!(
        user = login.identity.name.as_str(),
        role = %login.identity.role,
        "Signed in"
    );
    println!("{}", post_login_target(redirect));

    Ok(())
}
