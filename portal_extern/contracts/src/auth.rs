use std::future::Future;

use portal_models::auth::{Login, LoginCredentials, Registration};
use thiserror::Error;

/// Client for the portal's upstream authentication endpoints.
///
/// The upstream API owns all validation authority; this client only shapes
/// requests, surfaces rejections verbatim, and validates successful
/// responses once into closed types.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait AuthApiService: Send + Sync + 'static {
    /// Authenticates with email and password.
    fn login(
        &self,
        credentials: &LoginCredentials,
    ) -> impl Future<Output = Result<Login, AuthApiError>> + Send;

    /// Registers a new user account.
    fn register(
        &self,
        registration: &Registration,
    ) -> impl Future<Output = Result<(), AuthApiError>> + Send;
}

#[derive(Debug, Error)]
pub enum AuthApiError {
    #[error("Invalid credentials or not authorized.")]
    InvalidCredentials,
    /// The server rejected the request and said why.
    #[error("{0}")]
    Rejected(String),
    /// The server accepted the request but returned a response this client
    /// cannot trust (missing or malformed fields).
    #[error("The server returned an unusable response.")]
    InvalidResponse,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockAuthApiService {
    pub fn with_login(
        mut self,
        credentials: LoginCredentials,
        result: Result<Login, AuthApiError>,
    ) -> Self {
        self.expect_login()
            .once()
            .with(mockall::predicate::eq(credentials))
            .return_once(|_| Box::pin(std::future::ready(result)));
        self
    }

    pub fn with_register(
        mut self,
        registration: Registration,
        result: Result<(), AuthApiError>,
    ) -> Self {
        self.expect_register()
            .once()
            .with(mockall::predicate::eq(registration))
            .return_once(|_| Box::pin(std::future::ready(result)));
        self
    }
}
