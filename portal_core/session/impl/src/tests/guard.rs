use portal_auth_contracts::MockTokenGateService;
use portal_core_session_contracts::{
    guard::{GuardDecision, RouteGuardService},
    MockSessionService, SessionLoginCommand, SessionService, EXPIRATION_KEY, TOKEN_KEY, USER_KEY,
};
use portal_demo::{future_expiry, ACCESS_TOKEN, CANDIDATE};
use portal_storage_contracts::MockStorageService;
use pretty_assertions::assert_eq;

use crate::{guard::RouteGuardServiceImpl, tests::Sut, SessionServiceImpl};

#[test]
fn allows_navigation_for_an_authenticated_session() {
    // Arrange
    let session = MockSessionService::new().with_is_authenticated(true);
    let sut = RouteGuardServiceImpl::new(session);

    // Act + Assert
    assert_eq!(sut.check("/vagas"), GuardDecision::Allow);
}

#[test]
fn redirects_anonymous_navigation_to_login() {
    // Arrange
    let session = MockSessionService::new().with_is_authenticated(false);
    let sut = RouteGuardServiceImpl::new(session);

    // Act + Assert
    assert_eq!(
        sut.check("/vagas"),
        GuardDecision::Redirect {
            to: "/auth/login".into(),
            return_url: "/vagas".into(),
        }
    );
}

#[test]
fn a_fresh_login_passes_the_guard() {
    // Arrange
    let token_gate = MockTokenGateService::new().with_is_expired(future_expiry(), false);
    let storage = MockStorageService::new()
        .with_write(TOKEN_KEY, ACCESS_TOKEN.clone())
        .with_write(USER_KEY, CANDIDATE.clone())
        .with_write(EXPIRATION_KEY, future_expiry().to_rfc3339());
    let session = SessionServiceImpl {
        token_gate,
        storage,
        ..Sut::default()
    };
    session.login(SessionLoginCommand {
        identity: CANDIDATE.clone(),
        token: ACCESS_TOKEN.clone(),
        expires_at: future_expiry(),
    });
    let sut = RouteGuardServiceImpl::new(session);

    // Act + Assert
    assert_eq!(sut.check("/vagas"), GuardDecision::Allow);
}

#[test]
fn an_expired_persisted_session_is_redirected_after_restore() {
    // Arrange
    let raw = "2024-05-01T11:59:59Z".to_owned();
    let token_gate = MockTokenGateService::new().with_is_expired_raw(raw.clone(), true);
    let storage = MockStorageService::new()
        .with_read(TOKEN_KEY, Some(ACCESS_TOKEN.clone()))
        .with_read(USER_KEY, Some(CANDIDATE.clone()))
        .with_read(EXPIRATION_KEY, Some(raw))
        .with_remove(TOKEN_KEY)
        .with_remove(USER_KEY)
        .with_remove(EXPIRATION_KEY);
    let session = SessionServiceImpl {
        token_gate,
        storage,
        ..Sut::default()
    };
    session.restore();
    let sut = RouteGuardServiceImpl::new(session);

    // Act + Assert
    assert_eq!(
        sut.check("/vagas"),
        GuardDecision::Redirect {
            to: "/auth/login".into(),
            return_url: "/vagas".into(),
        }
    );
}
