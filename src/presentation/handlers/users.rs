use axum::extract::State;

use super::AppState;
use crate::application::{
    dto::{LifecycleConfirmation, UpdateUserRequest, UserDto},
    use_cases::{
        DeactivateUserUseCase, GetUserUseCase, ListUsersUseCase, PurgeUserUseCase,
        ReactivateUserUseCase, UpdateUserUseCase,
    },
};
use crate::domain::entities::UserId;
use crate::presentation::extract::{Json, Path};
use crate::presentation::middleware::{auth::AdminUser, error::AppError};

/// List every user
///
/// # Errors
/// Returns 401/403 for non-administrators and 500 if the directory cannot be read
pub async fn list_users(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<UserDto>>, AppError> {
    let users = ListUsersUseCase::new(state.users).execute().await?;
    Ok(Json(users))
}

/// Get one user by ID
pub async fn get_user(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<UserDto>, AppError> {
    let user = GetUserUseCase::new(state.users).execute(UserId::new(id)).await?;
    Ok(Json(user))
}

/// Merge the supplied fields into a user
pub async fn update_user(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<UserDto>, AppError> {
    tracing::debug!("Admin {} updating user {}", admin.user_id, id);
    let user = UpdateUserUseCase::new(state.users).execute(UserId::new(id), request).await?;
    Ok(Json(user))
}

/// Deactivate a user; the record is kept
pub async fn deactivate_user(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<LifecycleConfirmation>, AppError> {
    let confirmation = DeactivateUserUseCase::new(state.users)
        .execute(UserId::new(id), Some(admin.user_id))
        .await?;
    Ok(Json(confirmation))
}

/// Reactivate a previously deactivated user
pub async fn reactivate_user(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<LifecycleConfirmation>, AppError> {
    let confirmation = ReactivateUserUseCase::new(state.users).execute(UserId::new(id)).await?;
    Ok(Json(confirmation))
}

/// Physically delete a user
pub async fn purge_user(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<LifecycleConfirmation>, AppError> {
    tracing::warn!("Admin {} purging user {}", admin.user_id, id);
    let confirmation = PurgeUserUseCase::new(state.users).execute(UserId::new(id)).await?;
    Ok(Json(confirmation))
}
