use std::sync::Arc;

use crate::{
    application::dto::LifecycleConfirmation,
    domain::{entities::UserId, repositories::UserRepository},
    presentation::middleware::error::AppError,
};

pub const PURGED_MESSAGE: &str = "Usuario eliminado exitosamente";

/// Use case for physically removing a user and its profile rows
pub struct PurgeUserUseCase<R>
where
    R: UserRepository + ?Sized,
{
    repository: Arc<R>,
}

impl<R> PurgeUserUseCase<R>
where
    R: UserRepository + ?Sized,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, user_id: UserId) -> Result<LifecycleConfirmation, AppError> {
        let deleted = self.repository.delete(user_id).await.map_err(|e| AppError::Database {
            message: format!("Failed to purge user: {e}"),
        })?;

        if !deleted {
            tracing::warn!("Purge requested for unknown user {}", user_id);
            return Err(AppError::user_not_found(user_id));
        }

        tracing::info!("User {} purged", user_id);
        Ok(LifecycleConfirmation { message: PURGED_MESSAGE.to_string(), id: user_id, active: false })
    }
}
