use portal_config::Config;
use portal_core_session_contracts::SessionService;

use crate::environment;

pub fn status(config: Config) -> anyhow::Result<()> {
    let session = environment::session(&config);
    if !session.is_authenticated() {
        println!("Not signed in.");
        return Ok(());
    }

    if let Some(identity) = session.snapshot().identity {
        println!(
            "Signed in as {} <{}> ({})",
            identity.name.as_str(),
            identity.email,
            identity.role
        );
        println!("  manage job listings: {}", identity.role.can_manage_listings());
        println!("  enroll in courses:   {}", identity.role.can_enroll_in_courses());
    }

    Ok(())
}
