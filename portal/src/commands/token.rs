use anyhow::Context;
use portal_config::Config;
use portal_core_session_contracts::SessionService;

use crate::environment;

/// Prints the raw bearer token, for use by scripts attaching authorization
/// to their own requests.
pub fn token(config: Config) -> anyhow::Result<()> {
    let session = environment::session(&config);
    if !session.is_authenticated() {
        anyhow::bail!("Not signed in");
    }

    let token = session.token().context("Not signed in")?;
    println!("{}", token.into_inner());

    Ok(())
}
