use portal_core_session_contracts::{
    guard::{GuardDecision, RouteGuardService},
    SessionService,
};

#[derive(Clone)]
pub struct RouteGuardServiceImpl<Session> {
    session: Session,
}

impl<Session> RouteGuardServiceImpl<Session> {
    pub fn new(session: Session) -> Self {
        Self { session }
    }
}

impl<Session> RouteGuardService for RouteGuardServiceImpl<Session>
where
    Session: SessionService,
{
    #[tracing::instrument(skip_all)]
    fn check(&self, target: &str) -> GuardDecision {
        if self.session.is_authenticated() {
            GuardDecision::Allow
        } else {
            tracing::debug!(route = target, "Unauthenticated navigation, redirecting to login");
            GuardDecision::redirect_to_login(target)
        }
    }
}
