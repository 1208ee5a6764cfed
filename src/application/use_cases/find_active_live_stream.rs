use std::sync::Arc;

use crate::{
    application::dto::LiveStreamDto, domain::repositories::LiveStreamRepository,
    presentation::middleware::error::AppError,
};

/// Use case for looking up the stream currently on air
pub struct FindActiveLiveStreamUseCase<R>
where
    R: LiveStreamRepository + ?Sized,
{
    repository: Arc<R>,
}

impl<R> FindActiveLiveStreamUseCase<R>
where
    R: LiveStreamRepository + ?Sized,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// `None` when nothing is active; absence is not an error
    pub async fn execute(&self) -> Result<Option<LiveStreamDto>, AppError> {
        let active = self.repository.find_active().await.map_err(|e| AppError::Database {
            message: format!("Failed to query active live stream: {e}"),
        })?;

        Ok(active.map(LiveStreamDto::from))
    }
}
