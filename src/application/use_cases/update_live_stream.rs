use std::sync::Arc;

use super::create_live_stream::validate_stream_fields;
use crate::{
    application::dto::{LiveStreamDto, UpdateLiveStreamRequest},
    domain::{
        entities::{LiveStreamChanges, LiveStreamId},
        repositories::LiveStreamRepository,
    },
    presentation::middleware::error::AppError,
};

/// Use case for partially updating a live stream
///
/// Setting `activo: true` switches off every other stream in the same write.
pub struct UpdateLiveStreamUseCase<R>
where
    R: LiveStreamRepository + ?Sized,
{
    repository: Arc<R>,
}

impl<R> UpdateLiveStreamUseCase<R>
where
    R: LiveStreamRepository + ?Sized,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub async fn execute(
        &self,
        id: LiveStreamId,
        request: UpdateLiveStreamRequest,
    ) -> Result<LiveStreamDto, AppError> {
        validate_stream_fields(request.title.as_deref(), request.url.as_deref())?;

        let not_found = || AppError::live_stream_not_found(id);

        let mut stream = self
            .repository
            .find_by_id(id)
            .await
            .map_err(|e| AppError::Database { message: format!("Failed to query live stream: {e}") })?
            .ok_or_else(not_found)?;

        stream.apply_changes(LiveStreamChanges {
            title: request.title.map(|t| t.trim().to_string()),
            url: request.url.map(|u| u.trim().to_string()),
            description: request.description,
            active: request.active,
        });

        let updated = self.repository.update(&stream).await.map_err(|e| AppError::Database {
            message: format!("Failed to update live stream: {e}"),
        })?;
        if !updated {
            return Err(not_found());
        }

        tracing::info!("Updated live stream {} (active: {})", stream.id, stream.active);
        Ok(LiveStreamDto::from(stream))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::LiveStream;
    use crate::test_utils::mocks::InMemoryLiveStreamRepository;
    use claims::{assert_err, assert_ok};

    #[tokio::test]
    async fn test_activating_one_stream_deactivates_the_other() {
        let repo = Arc::new(InMemoryLiveStreamRepository::new());
        let first = repo
            .insert(&LiveStream::new("A".into(), "https://x.tv/a".into(), None, true))
            .await
            .unwrap();
        let second = repo
            .insert(&LiveStream::new("B".into(), "https://x.tv/b".into(), None, false))
            .await
            .unwrap();

        let request = UpdateLiveStreamRequest { active: Some(true), ..Default::default() };
        let dto = assert_ok!(UpdateLiveStreamUseCase::new(repo.clone()).execute(second.id, request).await);

        assert!(dto.active);
        assert_eq!(repo.active_count(), 1);
        assert!(!repo.find_by_id(first.id).await.unwrap().unwrap().active);
    }

    #[tokio::test]
    async fn test_partial_update_keeps_other_fields() {
        let repo = Arc::new(InMemoryLiveStreamRepository::new());
        let stream = repo
            .insert(&LiveStream::new("A".into(), "https://x.tv/a".into(), Some("desc".into()), true))
            .await
            .unwrap();

        let request = UpdateLiveStreamRequest { title: Some("Renamed".into()), ..Default::default() };
        let dto = assert_ok!(UpdateLiveStreamUseCase::new(repo).execute(stream.id, request).await);

        assert_eq!(dto.title, "Renamed");
        assert_eq!(dto.url, "https://x.tv/a");
        assert_eq!(dto.description.as_deref(), Some("desc"));
        assert!(dto.active);
    }

    #[tokio::test]
    async fn test_update_missing_stream() {
        let use_case = UpdateLiveStreamUseCase::new(Arc::new(InMemoryLiveStreamRepository::new()));
        let err = assert_err!(use_case.execute(LiveStreamId::new(5), UpdateLiveStreamRequest::default()).await);
        assert!(matches!(err, AppError::NotFound { .. }));
    }
}
