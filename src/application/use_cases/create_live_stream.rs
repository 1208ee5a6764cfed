use std::collections::HashMap;
use std::sync::Arc;

use crate::{
    application::dto::{CreateLiveStreamRequest, LiveStreamDto},
    domain::{entities::LiveStream, repositories::LiveStreamRepository},
    presentation::middleware::error::AppError,
};

/// Use case for registering a new live stream
///
/// Creating an active stream switches off whichever stream was active before.
pub struct CreateLiveStreamUseCase<R>
where
    R: LiveStreamRepository + ?Sized,
{
    repository: Arc<R>,
}

impl<R> CreateLiveStreamUseCase<R>
where
    R: LiveStreamRepository + ?Sized,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, request: CreateLiveStreamRequest) -> Result<LiveStreamDto, AppError> {
        validate_stream_fields(Some(&request.title), Some(&request.url))?;

        let stream = LiveStream::new(
            request.title.trim().to_string(),
            request.url.trim().to_string(),
            request.description,
            request.active,
        );

        let saved = self.repository.insert(&stream).await.map_err(|e| AppError::Database {
            message: format!("Failed to create live stream: {e}"),
        })?;

        tracing::info!("Created live stream {} (active: {})", saved.id, saved.active);
        Ok(LiveStreamDto::from(saved))
    }
}

/// Reject supplied title or url values that are blank
pub(crate) fn validate_stream_fields(title: Option<&str>, url: Option<&str>) -> Result<(), AppError> {
    let mut errors = HashMap::new();

    if title.is_some_and(|t| t.trim().is_empty()) {
        errors.insert("titulo".to_string(), "must not be blank".to_string());
    }
    if url.is_some_and(|u| u.trim().is_empty()) {
        errors.insert("url".to_string(), "must not be blank".to_string());
    }

    if errors.is_empty() { Ok(()) } else { Err(AppError::Validation { errors }) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::mocks::InMemoryLiveStreamRepository;
    use claims::{assert_err, assert_ok};

    fn request(title: &str, active: bool) -> CreateLiveStreamRequest {
        CreateLiveStreamRequest {
            title: title.to_string(),
            url: "https://video.example.com/live".to_string(),
            description: None,
            active,
        }
    }

    #[tokio::test]
    async fn test_create_assigns_id() {
        let repo = Arc::new(InMemoryLiveStreamRepository::new());
        let dto = assert_ok!(CreateLiveStreamUseCase::new(repo).execute(request("Noticias", false)).await);

        assert!(dto.id.as_i64() > 0);
        assert_eq!(dto.title, "Noticias");
        assert!(!dto.active);
    }

    #[tokio::test]
    async fn test_creating_active_stream_deactivates_previous() {
        let repo = Arc::new(InMemoryLiveStreamRepository::new());
        let use_case = CreateLiveStreamUseCase::new(repo.clone());

        let first = assert_ok!(use_case.execute(request("Morning", true)).await);
        let second = assert_ok!(use_case.execute(request("Evening", true)).await);

        assert_eq!(repo.active_count(), 1);
        let active = repo.find_active().await.unwrap().unwrap();
        assert_eq!(active.id, second.id);
        assert!(!repo.find_by_id(first.id).await.unwrap().unwrap().active);
    }

    #[tokio::test]
    async fn test_create_rejects_blank_title() {
        let use_case = CreateLiveStreamUseCase::new(Arc::new(InMemoryLiveStreamRepository::new()));
        let err = assert_err!(use_case.execute(request("   ", false)).await);

        assert!(matches!(err, AppError::Validation { ref errors } if errors.contains_key("titulo")));
    }
}
