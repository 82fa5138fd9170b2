use serde::{Deserialize, Serialize};

use crate::user::{Identity, UserRole};

/// The externally observable authentication state at a point in time.
///
/// Consumers only ever see the presence or absence of an [`Identity`]; the
/// credential itself is never part of a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub identity: Option<Identity>,
}

impl SessionSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn of(identity: Identity) -> Self {
        Self {
            identity: Some(identity),
        }
    }

    pub fn is_present(&self) -> bool {
        self.identity.is_some()
    }

    pub fn role(&self) -> Option<UserRole> {
        self.identity.as_ref().map(|identity| identity.role)
    }
}
