use std::sync::Arc;

use crate::{
    application::dto::UploadImageResponse,
    infrastructure::storage::{is_image_content_type, validate_file_size, AssetStorage},
    presentation::middleware::error::AppError,
};

/// Use case for storing an uploaded image
pub struct UploadAssetUseCase<S>
where
    S: AssetStorage + ?Sized,
{
    storage: Arc<S>,
    max_file_size: u64,
}

impl<S> UploadAssetUseCase<S>
where
    S: AssetStorage + ?Sized,
{
    /// Create a new upload use case
    pub fn new(storage: Arc<S>, max_file_size: u64) -> Self {
        Self { storage, max_file_size }
    }

    /// Validate and persist one image
    ///
    /// `content_type` is the type declared on the multipart part; only `image/*` is accepted.
    pub async fn execute(
        &self,
        content: &[u8],
        original_name: &str,
        content_type: Option<&str>,
    ) -> Result<UploadImageResponse, AppError> {
        tracing::info!("Starting image upload for file: {}", original_name);

        match content_type {
            Some(ct) if is_image_content_type(ct) => {}
            Some(ct) => {
                return Err(AppError::BadRequest {
                    message: format!("Only image uploads are allowed, got {ct}"),
                });
            }
            None => {
                return Err(AppError::BadRequest {
                    message: "Missing content type for uploaded file".to_string(),
                });
            }
        }

        validate_file_size(content.len() as u64, self.max_file_size)?;

        let stored = self.storage.store(content, original_name).await?;

        tracing::info!("Upload completed: {} ({} bytes)", stored.filename, content.len());
        Ok(UploadImageResponse { filename: stored.filename, url: stored.url })
    }
}
