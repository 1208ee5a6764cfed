use std::sync::Arc;

use crate::{
    domain::value_objects::AssetFilename, infrastructure::storage::AssetStorage,
    presentation::middleware::error::AppError,
};

/// Use case for removing a stored asset; a missing file is not an error
pub struct DeleteAssetUseCase<S>
where
    S: AssetStorage + ?Sized,
{
    storage: Arc<S>,
}

impl<S> DeleteAssetUseCase<S>
where
    S: AssetStorage + ?Sized,
{
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    /// Returns whether a file was actually removed
    pub async fn execute(&self, filename: &str) -> Result<bool, AppError> {
        let filename = AssetFilename::parse(filename)
            .map_err(|e| AppError::BadRequest { message: e.to_string() })?;

        let removed = self.storage.delete(&filename).await?;
        if !removed {
            tracing::debug!("Nothing to delete for {}", filename);
        }
        Ok(removed)
    }
}
