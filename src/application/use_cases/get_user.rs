use std::sync::Arc;

use crate::{
    application::dto::UserDto,
    domain::{entities::UserId, repositories::UserRepository},
    presentation::middleware::error::AppError,
};

/// Use case for retrieving one user by ID
pub struct GetUserUseCase<R>
where
    R: UserRepository + ?Sized,
{
    repository: Arc<R>,
}

impl<R> GetUserUseCase<R>
where
    R: UserRepository + ?Sized,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, user_id: UserId) -> Result<UserDto, AppError> {
        let user = self.repository.find_by_id(user_id).await.map_err(|e| AppError::Database {
            message: format!("Failed to query user: {e}"),
        })?;

        if let Some(user) = user {
            Ok(UserDto::from(user))
        } else {
            tracing::warn!("User not found with ID: {}", user_id);
            Err(AppError::user_not_found(user_id))
        }
    }
}
