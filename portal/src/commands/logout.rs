use portal_config::Config;
use portal_core_session_contracts::SessionService;
use tracing::info;

use crate::environment;

pub fn logout(config: Config) -> anyhow::Result<()> {
    let session = environment::session(&config);
    session.logout();
    info!("Signed out");

    Ok(())
}
