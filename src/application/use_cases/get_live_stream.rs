use std::sync::Arc;

use crate::{
    application::dto::LiveStreamDto,
    domain::{entities::LiveStreamId, repositories::LiveStreamRepository},
    presentation::middleware::error::AppError,
};

/// Use case for retrieving a live stream by ID
pub struct GetLiveStreamUseCase<R>
where
    R: LiveStreamRepository + ?Sized,
{
    repository: Arc<R>,
}

impl<R> GetLiveStreamUseCase<R>
where
    R: LiveStreamRepository + ?Sized,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, id: LiveStreamId) -> Result<LiveStreamDto, AppError> {
        let stream = self.repository.find_by_id(id).await.map_err(|e| AppError::Database {
            message: format!("Failed to query live stream: {e}"),
        })?;

        stream.map(LiveStreamDto::from).ok_or_else(|| {
            tracing::warn!("Live stream not found with ID: {}", id);
            AppError::live_stream_not_found(id)
        })
    }
}
