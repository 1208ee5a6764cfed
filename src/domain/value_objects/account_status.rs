use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a user account
///
/// Persisted as the boolean `activo` column. Accounts leave active use through
/// [`AccountStatus::Deactivated`]; physical removal is a separate purge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountStatus {
    /// Account can sign in and appears as active in listings
    Active,
    /// Account has been switched off by an administrator
    Deactivated,
}

impl AccountStatus {
    #[must_use]
    pub fn from_active_flag(active: bool) -> Self {
        if active { Self::Active } else { Self::Deactivated }
    }

    /// The boolean stored in the database and sent on the wire
    #[must_use]
    pub fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "ACTIVE"),
            Self::Deactivated => write!(f, "DEACTIVATED"),
        }
    }
}
