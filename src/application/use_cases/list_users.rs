use std::sync::Arc;

use crate::{
    application::dto::UserDto, domain::repositories::UserRepository,
    presentation::middleware::error::AppError,
};

/// Use case for listing every user with its role
pub struct ListUsersUseCase<R>
where
    R: UserRepository + ?Sized,
{
    repository: Arc<R>,
}

impl<R> ListUsersUseCase<R>
where
    R: UserRepository + ?Sized,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Public projection of all users, ascending by id
    pub async fn execute(&self) -> Result<Vec<UserDto>, AppError> {
        let users = self.repository.find_all().await.map_err(|e| AppError::Database {
            message: format!("Failed to list users: {e}"),
        })?;

        tracing::debug!("Listed {} users", users.len());
        Ok(users.into_iter().map(UserDto::from).collect())
    }
}
