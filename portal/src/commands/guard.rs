use portal_config::Config;
use portal_core_session_contracts::guard::{GuardDecision, RouteGuardService};
use portal_core_session_impl::guard::RouteGuardServiceImpl;

use crate::environment;

/// Checks whether the current session may navigate to `route`.
pub fn guard(config: Config, route: &str) -> anyhow::Result<()> {
    let session = environment::session(&config);
    let guard: environment::Guard = RouteGuardServiceImpl::new(session);

    match guard.check(route) {
        GuardDecision::Allow => println!("allow {route}"),
        GuardDecision::Redirect { to, return_url } => {
            println!("redirect {to}?returnUrl={return_url}");
        }
    }

    Ok(())
}
