use anyhow::Context;
use portal_config::Config;
use portal_core_session_contracts::guard::LOGIN_ROUTE;
use portal_extern_contracts::auth::AuthApiService;
use portal_models::{
    auth::Registration,
    user::{UserName, UserRole},
};
use tracing::info;

use crate::environment;

pub async fn register(
    config: Config,
    role: UserRole,
    name: String,
    email: String,
    password: String,
) -> anyhow::Result<()> {
    let registration = Registration {
        name: UserName::try_new(name).context("Invalid user name")?,
        email: email.parse().context("Invalid email address")?,
        password: password.into(),
        role,
    };

    let api = environment::auth_api(&config);
    api.register(&registration)
        .await
        .context("Registration failed")?;

    info!(
        user = registration.name.as_str(),
        role = %registration.role,
        "Account created"
    );
    println!("{LOGIN_ROUTE}");

    Ok(())
}
