use std::sync::Arc;

use crate::{
    application::dto::LifecycleConfirmation,
    domain::{entities::UserId, repositories::UserRepository},
    presentation::middleware::error::AppError,
};

pub const REACTIVATED_MESSAGE: &str = "Usuario reactivado exitosamente";

/// Use case for putting a deactivated account back into use
pub struct ReactivateUserUseCase<R>
where
    R: UserRepository + ?Sized,
{
    repository: Arc<R>,
}

impl<R> ReactivateUserUseCase<R>
where
    R: UserRepository + ?Sized,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, user_id: UserId) -> Result<LifecycleConfirmation, AppError> {
        let mut user = self
            .repository
            .find_by_id(user_id)
            .await
            .map_err(|e| AppError::Database { message: format!("Failed to query user: {e}") })?
            .ok_or_else(|| AppError::user_not_found(user_id))?;

        if user.reactivate() {
            let updated = self.repository.update(&user).await.map_err(|e| {
                AppError::Database { message: format!("Failed to reactivate user: {e}") }
            })?;
            if !updated {
                return Err(AppError::user_not_found(user_id));
            }
            tracing::info!("User {} is {}", user_id, user.status);
        } else {
            tracing::debug!("User {} was already active", user_id);
        }

        Ok(LifecycleConfirmation {
            message: REACTIVATED_MESSAGE.to_string(),
            id: user.id,
            active: user.is_active(),
        })
    }
}
