use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::Role;
use crate::domain::value_objects::AccountStatus;

/// Identifier of a user account (database BIGSERIAL)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(i64);

impl UserId {
    #[must_use]
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    #[must_use]
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Auxiliary profile data kept in `informacion_usuario`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileInfo {
    pub biography: Option<String>,
    pub avatar_url: Option<String>,
    pub phone: Option<String>,
}

/// A platform user with exactly one role
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub name: String,
    pub surname: String,
    pub status: AccountStatus,
    pub role: Role,
    pub profile: Option<ProfileInfo>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields an administrator may change on an existing user
///
/// `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub email: Option<String>,
    pub name: Option<String>,
    pub surname: Option<String>,
    pub role: Option<Role>,
}

impl UserChanges {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.name.is_none() && self.surname.is_none() && self.role.is_none()
    }
}

impl User {
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Merge the supplied fields into this user
    pub fn apply_changes(&mut self, changes: UserChanges) {
        if changes.is_empty() {
            return;
        }

        if let Some(email) = changes.email {
            self.email = email;
        }
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(surname) = changes.surname {
            self.surname = surname;
        }
        if let Some(role) = changes.role {
            self.role = role;
        }

        self.updated_at = Utc::now();
    }

    /// Take the account out of active use. Returns `false` if it was already deactivated.
    pub fn deactivate(&mut self) -> bool {
        self.transition_to(AccountStatus::Deactivated)
    }

    /// Put the account back into active use. Returns `false` if it was already active.
    pub fn reactivate(&mut self) -> bool {
        self.transition_to(AccountStatus::Active)
    }

    fn transition_to(&mut self, status: AccountStatus) -> bool {
        if self.status == status {
            return false;
        }

        self.status = status;
        self.updated_at = Utc::now();
        true
    }
}
