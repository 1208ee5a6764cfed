use std::collections::HashMap;
use std::sync::Arc;

use crate::{
    application::dto::{UpdateUserRequest, UserDto},
    domain::{
        entities::{UserChanges, UserId},
        repositories::UserRepository,
    },
    presentation::middleware::error::AppError,
};

/// Use case for merging an administrator's edits into a user
pub struct UpdateUserUseCase<R>
where
    R: UserRepository + ?Sized,
{
    repository: Arc<R>,
}

impl<R> UpdateUserUseCase<R>
where
    R: UserRepository + ?Sized,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Apply only the supplied fields; everything else, activation included, is untouched
    pub async fn execute(
        &self,
        user_id: UserId,
        request: UpdateUserRequest,
    ) -> Result<UserDto, AppError> {
        validate_request(&request)?;

        let mut user = self
            .repository
            .find_by_id(user_id)
            .await
            .map_err(|e| AppError::Database { message: format!("Failed to query user: {e}") })?
            .ok_or_else(|| AppError::user_not_found(user_id))?;

        let role = match request.role_id {
            Some(role_id) => Some(
                self.repository
                    .find_role_by_id(role_id)
                    .await
                    .map_err(|e| AppError::Database {
                        message: format!("Failed to query role: {e}"),
                    })?
                    .ok_or_else(|| AppError::role_not_found(role_id))?,
            ),
            None => None,
        };

        let changes = UserChanges {
            email: request.email.map(|email| email.trim().to_string()),
            name: request.name,
            surname: request.surname,
            role,
        };
        if changes.is_empty() {
            return Ok(UserDto::from(user));
        }

        user.apply_changes(changes);

        let updated = self.repository.update(&user).await.map_err(update_error)?;
        if !updated {
            return Err(AppError::user_not_found(user_id));
        }

        tracing::info!("Updated user {}", user_id);
        Ok(UserDto::from(user))
    }
}

/// Keep a duplicate email as a 409; anything else from the store is a database fault
fn update_error<E>(err: E) -> AppError
where
    E: std::error::Error + Send + Sync + 'static,
{
    let boxed: Box<dyn std::error::Error + Send + Sync> = Box::new(err);
    match boxed.downcast::<AppError>() {
        Ok(app_error) if matches!(*app_error, AppError::Conflict { .. }) => *app_error,
        Ok(app_error) => AppError::Database { message: format!("Failed to update user: {app_error}") },
        Err(other) => AppError::Database { message: format!("Failed to update user: {other}") },
    }
}

fn validate_request(request: &UpdateUserRequest) -> Result<(), AppError> {
    let mut errors = HashMap::new();

    if let Some(email) = &request.email {
        let email = email.trim();
        if email.is_empty() || !email.contains('@') {
            errors.insert("email".to_string(), "must be a valid email address".to_string());
        }
    }
    if request.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
        errors.insert("nombre".to_string(), "must not be blank".to_string());
    }
    if request.surname.as_deref().is_some_and(|s| s.trim().is_empty()) {
        errors.insert("apellido".to_string(), "must not be blank".to_string());
    }

    if errors.is_empty() { Ok(()) } else { Err(AppError::Validation { errors }) }
}
