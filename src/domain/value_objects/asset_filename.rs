use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Name of an uploaded asset inside the uploads directory
///
/// Generated names have the form `<epochMillis>-<originalName>`. A valid name is a
/// single path component, so it can never point outside the uploads directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetFilename(String);

impl AssetFilename {
    /// Validate a filename received from a caller
    ///
    /// # Errors
    /// Returns an error if the name is empty, contains a path separator or is a
    /// relative path component such as `..`
    pub fn parse(name: &str) -> Result<Self, AssetFilenameError> {
        if name.is_empty() {
            return Err(AssetFilenameError::Empty);
        }

        if name.contains(['/', '\\', '\0']) || name == "." || name == ".." {
            return Err(AssetFilenameError::PathTraversal(name.to_string()));
        }

        Ok(Self(name.to_string()))
    }

    /// Build the stored name for an upload received at `timestamp_millis`
    ///
    /// # Errors
    /// Returns an error if the original name has no usable final component
    pub fn generate(timestamp_millis: i64, original_name: &str) -> Result<Self, AssetFilenameError> {
        let base = sanitize_original_name(original_name)?;
        Ok(Self(format!("{timestamp_millis}-{base}")))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

/// Keep only the final path component of a client-supplied name
fn sanitize_original_name(original_name: &str) -> Result<String, AssetFilenameError> {
    let normalized = original_name.replace('\\', "/");
    let base = Path::new(&normalized)
        .file_name()
        .and_then(|name| name.to_str())
        .map(str::trim)
        .unwrap_or_default();

    if base.is_empty() || base.chars().all(|c| c == '.') || base.contains('\0') {
        return Err(AssetFilenameError::Empty);
    }

    Ok(base.to_string())
}

impl fmt::Display for AssetFilename {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for AssetFilename {
    type Err = AssetFilenameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Errors that can occur when validating an asset filename
#[derive(Debug, thiserror::Error)]
pub enum AssetFilenameError {
    #[error("Filename must not be empty")]
    Empty,
    #[error("Filename must be a single path component: {0}")]
    PathTraversal(String),
}
