use chrono::{DateTime, Utc};
use email_address::EmailAddress;
use nutype::nutype;

use crate::user::{Identity, UserName, UserRole};

/// An opaque bearer token issued by the upstream API.
#[nutype(derive(Clone, PartialEq, Eq, Deref, From, AsRef, Serialize, Deserialize))]
pub struct AccessToken(String);

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken([redacted])")
    }
}

#[nutype(derive(Clone, PartialEq, Eq, Deref, From, AsRef, Serialize, Deserialize))]
pub struct UserPassword(String);

impl std::fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("UserPassword([redacted])")
    }
}

/// A bearer token together with its absolute expiry instant.
///
/// A credential only ever exists alongside an [`Identity`]; the two are set
/// and cleared atomically as a single session transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub token: AccessToken,
    pub expires_at: DateTime<Utc>,
}

/// A successful login, validated into closed types at the trust boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Login {
    pub identity: Identity,
    pub token: AccessToken,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    pub email: EmailAddress,
    pub password: UserPassword,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub name: UserName,
    pub email: EmailAddress,
    pub password: UserPassword,
    pub role: UserRole,
}
