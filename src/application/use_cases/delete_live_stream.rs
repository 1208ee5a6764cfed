use std::sync::Arc;

use crate::{
    domain::{entities::LiveStreamId, repositories::LiveStreamRepository},
    presentation::middleware::error::AppError,
};

/// Use case for removing a live stream record
pub struct DeleteLiveStreamUseCase<R>
where
    R: LiveStreamRepository + ?Sized,
{
    repository: Arc<R>,
}

impl<R> DeleteLiveStreamUseCase<R>
where
    R: LiveStreamRepository + ?Sized,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, id: LiveStreamId) -> Result<(), AppError> {
        let deleted = self.repository.delete(id).await.map_err(|e| AppError::Database {
            message: format!("Failed to delete live stream: {e}"),
        })?;

        if deleted {
            tracing::info!("Deleted live stream {}", id);
            Ok(())
        } else {
            Err(AppError::live_stream_not_found(id))
        }
    }
}
