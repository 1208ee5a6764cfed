use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::{Semaphore, SemaphorePermit};

use super::{utils::public_url, AssetStorage, StorageError, StoredAsset};
use crate::domain::value_objects::AssetFilename;

/// How many successive millisecond prefixes to try before giving up on a name
const MAX_NAME_ATTEMPTS: i64 = 16;

/// Flat-directory storage for uploaded assets
#[derive(Clone)]
pub struct FilesystemStorage {
    base_path: PathBuf,
    public_url_prefix: String,
    io_permits: Arc<Semaphore>,
}

impl FilesystemStorage {
    /// Open the uploads directory, creating it if it does not exist yet
    pub async fn open(
        base_path: impl Into<PathBuf>,
        public_url_prefix: impl Into<String>,
        max_concurrent_io: usize,
    ) -> Result<Self, StorageError> {
        let base_path = base_path.into();

        if !fs::try_exists(&base_path).await? {
            fs::create_dir_all(&base_path).await?;
            tracing::info!("Created uploads directory: {}", base_path.display());
        }

        Ok(Self {
            base_path,
            public_url_prefix: public_url_prefix.into(),
            io_permits: Arc::new(Semaphore::new(max_concurrent_io.max(1))),
        })
    }

    /// Directory holding the stored files
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn full_path(&self, filename: &AssetFilename) -> PathBuf {
        self.base_path.join(filename.as_str())
    }

    async fn acquire(&self) -> Result<SemaphorePermit<'_>, StorageError> {
        self.io_permits
            .acquire()
            .await
            .map_err(|_| StorageError::IoError { message: "Storage is shutting down".to_string() })
    }

    /// Write `content` to `target` without ever replacing an existing file
    ///
    /// The bytes land in a temporary file first and are hard-linked into place, so
    /// readers never observe a partially written asset.
    async fn write_exclusive(&self, target: &Path, content: &[u8]) -> std::io::Result<()> {
        let temp_path = self.base_path.join(format!(".{}.tmp", uuid::Uuid::new_v4()));

        {
            let mut file = fs::File::create(&temp_path).await?;
            file.write_all(content).await?;
            file.flush().await?;
        }

        let linked = fs::hard_link(&temp_path, target).await;

        if let Err(e) = fs::remove_file(&temp_path).await {
            tracing::warn!("Failed to remove temporary upload {}: {}", temp_path.display(), e);
        }

        linked
    }
}

#[async_trait]
impl AssetStorage for FilesystemStorage {
    async fn store(&self, content: &[u8], original_name: &str) -> Result<StoredAsset, StorageError> {
        if content.is_empty() {
            return Err(StorageError::EmptyContent);
        }

        let _permit = self.acquire().await?;
        let mut timestamp = chrono::Utc::now().timestamp_millis();

        for _ in 0..MAX_NAME_ATTEMPTS {
            let filename = AssetFilename::generate(timestamp, original_name)?;
            let file_path = self.full_path(&filename);

            match self.write_exclusive(&file_path, content).await {
                Ok(()) => {
                    tracing::info!(
                        "Stored asset at path: {} ({} bytes)",
                        file_path.display(),
                        content.len()
                    );
                    let url = public_url(&self.public_url_prefix, filename.as_str());
                    return Ok(StoredAsset { filename: filename.into_string(), url });
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    tracing::debug!("Filename already taken, advancing prefix: {}", filename);
                    timestamp += 1;
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(StorageError::NameCollision { original_name: original_name.to_string() })
    }

    async fn retrieve(&self, filename: &AssetFilename) -> Result<Vec<u8>, StorageError> {
        let _permit = self.acquire().await?;
        let file_path = self.full_path(filename);

        match fs::read(&file_path).await {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(StorageError::FileNotFound { filename: filename.to_string() })
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, filename: &AssetFilename) -> Result<bool, StorageError> {
        let _permit = self.acquire().await?;
        let file_path = self.full_path(filename);

        match fs::remove_file(&file_path).await {
            Ok(()) => {
                tracing::info!("Deleted asset at path: {}", file_path.display());
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn health_check(&self) -> Result<(), StorageError> {
        let metadata = fs::metadata(&self.base_path).await?;

        if !metadata.is_dir() {
            return Err(StorageError::IoError {
                message: format!("{} is not a directory", self.base_path.display()),
            });
        }
        if metadata.permissions().readonly() {
            return Err(StorageError::IoError {
                message: format!("{} is read-only", self.base_path.display()),
            });
        }

        Ok(())
    }
}
