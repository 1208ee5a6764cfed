use std::sync::Arc;

use crate::{
    domain::value_objects::AssetFilename,
    infrastructure::storage::{serving_content_type, AssetStorage},
    presentation::middleware::error::AppError,
};

/// Bytes of a stored asset together with the type to serve them as
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrievedAsset {
    pub content: Vec<u8>,
    pub content_type: &'static str,
}

/// Use case for reading a stored asset back
pub struct RetrieveAssetUseCase<S>
where
    S: AssetStorage + ?Sized,
{
    storage: Arc<S>,
}

impl<S> RetrieveAssetUseCase<S>
where
    S: AssetStorage + ?Sized,
{
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    pub async fn execute(&self, filename: &str) -> Result<RetrievedAsset, AppError> {
        let filename = AssetFilename::parse(filename)
            .map_err(|e| AppError::BadRequest { message: e.to_string() })?;

        let content = self.storage.retrieve(&filename).await?;
        let content_type = serving_content_type(&content);

        tracing::debug!("Serving {} as {} ({} bytes)", filename, content_type, content.len());
        Ok(RetrievedAsset { content, content_type })
    }
}
