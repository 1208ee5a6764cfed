use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Permission tier attached to every user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoleName {
    #[serde(rename = "ADMINISTRADOR")]
    Administrator,
    #[serde(rename = "PERIODISTA")]
    Journalist,
    #[serde(rename = "LECTOR")]
    Reader,
}

impl RoleName {
    /// Name as stored in the `roles.nombre` column
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Administrator => "ADMINISTRADOR",
            Self::Journalist => "PERIODISTA",
            Self::Reader => "LECTOR",
        }
    }

    #[must_use]
    pub fn is_administrator(self) -> bool {
        matches!(self, Self::Administrator)
    }
}

impl fmt::Display for RoleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoleName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ADMINISTRADOR" => Ok(Self::Administrator),
            "PERIODISTA" => Ok(Self::Journalist),
            "LECTOR" => Ok(Self::Reader),
            _ => Err(format!("Invalid role name: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!("ADMINISTRADOR".parse::<RoleName>().unwrap(), RoleName::Administrator);
        assert_eq!("periodista".parse::<RoleName>().unwrap(), RoleName::Journalist);
        assert_eq!("Lector".parse::<RoleName>().unwrap(), RoleName::Reader);
        assert!("EDITOR".parse::<RoleName>().is_err());
    }

    #[test]
    fn test_serializes_as_column_value() {
        let json = serde_json::to_string(&RoleName::Journalist).unwrap();
        assert_eq!(json, "\"PERIODISTA\"");
        assert!(RoleName::Administrator.is_administrator());
        assert!(!RoleName::Reader.is_administrator());
    }
}
