use std::sync::Arc;

use crate::{
    application::dto::LiveStreamDto, domain::repositories::LiveStreamRepository,
    presentation::middleware::error::AppError,
};

/// Use case for listing live streams, newest first
pub struct ListLiveStreamsUseCase<R>
where
    R: LiveStreamRepository + ?Sized,
{
    repository: Arc<R>,
}

impl<R> ListLiveStreamsUseCase<R>
where
    R: LiveStreamRepository + ?Sized,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self) -> Result<Vec<LiveStreamDto>, AppError> {
        let streams = self.repository.find_all().await.map_err(|e| AppError::Database {
            message: format!("Failed to list live streams: {e}"),
        })?;

        Ok(streams.into_iter().map(LiveStreamDto::from).collect())
    }
}
