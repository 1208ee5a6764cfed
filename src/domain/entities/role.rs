use serde::{Deserialize, Serialize};

use crate::domain::value_objects::RoleName;

/// Identifier of a row in the `roles` table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoleId(i64);

impl RoleId {
    #[must_use]
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    #[must_use]
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for RoleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for RoleId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Named permission tier; many users share one role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: RoleId,
    pub name: RoleName,
}

impl Role {
    #[must_use]
    pub fn new(id: RoleId, name: RoleName) -> Self {
        Self { id, name }
    }
}
