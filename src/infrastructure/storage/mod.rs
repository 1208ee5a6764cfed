use async_trait::async_trait;
use serde::{Deserialize, Serialize};

mod filesystem_storage;
pub mod utils;

pub use filesystem_storage::FilesystemStorage;
pub use utils::*;

use crate::domain::value_objects::{AssetFilename, AssetFilenameError};

/// Error types for storage operations
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("File not found: {filename}")]
    FileNotFound { filename: String },

    #[error("No file content provided")]
    EmptyContent,

    #[error("Invalid filename: {message}")]
    InvalidFilename { message: String },

    #[error("File too large: {size} bytes exceeds {max_size} bytes")]
    TooLarge { size: u64, max_size: u64 },

    #[error("Could not find a free filename for {original_name}")]
    NameCollision { original_name: String },

    #[error("IO error: {message}")]
    IoError { message: String },
}

impl From<std::io::Error> for StorageError {
    fn from(error: std::io::Error) -> Self {
        StorageError::IoError { message: error.to_string() }
    }
}

impl From<AssetFilenameError> for StorageError {
    fn from(error: AssetFilenameError) -> Self {
        StorageError::InvalidFilename { message: error.to_string() }
    }
}

/// Result of a successful store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredAsset {
    pub filename: String,
    pub url: String,
}

/// Trait for uploaded asset storage
#[async_trait]
pub trait AssetStorage: Send + Sync {
    /// Store content under a name generated from the current time and `original_name`
    async fn store(&self, content: &[u8], original_name: &str) -> Result<StoredAsset, StorageError>;

    /// Read a stored file back in full
    async fn retrieve(&self, filename: &AssetFilename) -> Result<Vec<u8>, StorageError>;

    /// Remove a stored file. Returns `false` if there was nothing to remove.
    async fn delete(&self, filename: &AssetFilename) -> Result<bool, StorageError>;

    /// Verify the storage location is usable
    async fn health_check(&self) -> Result<(), StorageError>;
}
