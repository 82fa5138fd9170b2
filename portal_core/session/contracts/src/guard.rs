/// Route the unauthenticated are redirected to.
pub const LOGIN_ROUTE: &str = "/auth/login";

/// Post-login navigation target when no hint was recorded.
pub const DEFAULT_ROUTE: &str = "/";

/// Outcome of a navigation check on a protected route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    /// Navigation is denied; go to `to` instead. `return_url` carries the
    /// originally requested path so the login flow can resume there.
    Redirect { to: String, return_url: String },
}

impl GuardDecision {
    pub fn redirect_to_login(target: &str) -> Self {
        Self::Redirect {
            to: LOGIN_ROUTE.into(),
            return_url: target.into(),
        }
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Gates navigation to protected views.
///
/// Evaluated synchronously before each protected navigation. The guard does
/// not mutate session state itself; expiry handling is delegated to the
/// session store's `is_authenticated`.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait RouteGuardService: Send + Sync + 'static {
    fn check(&self, target: &str) -> GuardDecision;
}

/// Resolves the post-login navigation target from an optional recorded hint.
pub fn post_login_target(hint: Option<&str>) -> &str {
    match hint {
        Some(target) if !target.is_empty() => target,
        _ => DEFAULT_ROUTE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_redirect_carries_the_requested_path() {
        assert_eq!(
            GuardDecision::redirect_to_login("/vagas"),
            GuardDecision::Redirect {
                to: "/auth/login".into(),
                return_url: "/vagas".into(),
            }
        );
    }

    #[test]
    fn post_login_target_defaults_to_the_application_root() {
        assert_eq!(post_login_target(Some("/cursos")), "/cursos");
        assert_eq!(post_login_target(Some("")), "/");
        assert_eq!(post_login_target(None), "/");
    }
}
