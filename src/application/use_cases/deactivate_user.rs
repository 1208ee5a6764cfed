use std::sync::Arc;

use crate::{
    application::dto::LifecycleConfirmation,
    domain::{entities::UserId, repositories::UserRepository},
    presentation::middleware::error::AppError,
};

pub const DEACTIVATED_MESSAGE: &str = "Usuario desactivado exitosamente";

/// Use case for taking a user account out of active use
///
/// The record is kept; only its status changes. Calling it on an already
/// deactivated account succeeds with the same confirmation.
pub struct DeactivateUserUseCase<R>
where
    R: UserRepository + ?Sized,
{
    repository: Arc<R>,
}

impl<R> DeactivateUserUseCase<R>
where
    R: UserRepository + ?Sized,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// `acting_admin` is only recorded in the log line
    pub async fn execute(
        &self,
        user_id: UserId,
        acting_admin: Option<UserId>,
    ) -> Result<LifecycleConfirmation, AppError> {
        let mut user = self
            .repository
            .find_by_id(user_id)
            .await
            .map_err(|e| AppError::Database { message: format!("Failed to query user: {e}") })?
            .ok_or_else(|| AppError::user_not_found(user_id))?;

        if user.deactivate() {
            let updated = self.repository.update(&user).await.map_err(|e| {
                AppError::Database { message: format!("Failed to deactivate user: {e}") }
            })?;
            if !updated {
                return Err(AppError::user_not_found(user_id));
            }
        }

        match acting_admin {
            Some(admin) => {
                tracing::info!("User {} is {} (admin {})", user_id, user.status, admin);
            }
            None => tracing::info!("User {} is {}", user_id, user.status),
        }

        Ok(LifecycleConfirmation {
            message: DEACTIVATED_MESSAGE.to_string(),
            id: user.id,
            active: user.is_active(),
        })
    }
}
