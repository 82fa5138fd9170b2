use portal_auth_impl::TokenGateServiceImpl;
use portal_config::Config;
use portal_core_session_contracts::SessionService;
use portal_core_session_impl::{guard::RouteGuardServiceImpl, SessionServiceImpl};
use portal_extern_impl::auth::AuthApiServiceImpl;
use portal_shared_impl::time::TimeServiceImpl;
use portal_storage_file::FileStorageService;

pub type TokenGate = TokenGateServiceImpl<TimeServiceImpl>;
pub type Session = SessionServiceImpl<TokenGate, FileStorageService>;
pub type Guard = RouteGuardServiceImpl<Session>;
pub type AuthApi = AuthApiServiceImpl;

/// Builds the session stack and rehydrates any persisted session.
pub fn session(config: &Config) -> Session {
    let session = SessionServiceImpl::new(
        TokenGateServiceImpl::new(TimeServiceImpl),
        FileStorageService::new(config.storage.path.clone()),
    );
    let _ = session.subscribe(Box::new(|snapshot| {
        tracing::debug!(present = snapshot.is_present(), "Session changed");
    }));
    session.restore();
    session
}

pub fn auth_api(config: &Config) -> AuthApi {
    AuthApiServiceImpl::new(config.api.url.clone())
}
