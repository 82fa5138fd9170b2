use email_address::EmailAddress;
use serde::{Deserialize, Serialize};

use crate::macros::{id, nutype_string};

id!(UserId);

nutype_string!(UserName(validate(len_char_min = 1, len_char_max = 64)));

/// The closed set of roles a user can hold.
///
/// The upstream API transports roles as Portuguese strings (`candidato`,
/// `empresa`, `administrador`); the aliases below accept those at the trust
/// boundary while everything downstream only ever sees this enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[serde(alias = "candidato")]
    Candidate,
    #[serde(alias = "empresa")]
    Company,
    #[serde(alias = "administrador")]
    Admin,
}

impl UserRole {
    /// Whether this role may create, edit and delete job listings.
    pub fn can_manage_listings(self) -> bool {
        matches!(self, Self::Company | Self::Admin)
    }

    /// Whether this role may enroll in training courses.
    pub fn can_enroll_in_courses(self) -> bool {
        matches!(self, Self::Candidate)
    }

    pub fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Candidate => "candidate",
            Self::Company => "company",
            Self::Admin => "admin",
        }
        .fmt(f)
    }
}

/// The authenticated principal, excluding secrets.
///
/// Constructed exactly once per session, at the login response parser;
/// immutable afterwards and replaced or cleared only wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: UserId,
    pub name: UserName,
    pub email: EmailAddress,
    pub role: UserRole,
}
