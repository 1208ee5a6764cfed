use axum::{extract::State, http::StatusCode};

use super::AppState;
use crate::application::{
    dto::{CreateLiveStreamRequest, LiveStreamDto, UpdateLiveStreamRequest},
    use_cases::{
        CreateLiveStreamUseCase, DeleteLiveStreamUseCase, FindActiveLiveStreamUseCase,
        GetLiveStreamUseCase, ListLiveStreamsUseCase, UpdateLiveStreamUseCase,
    },
};
use crate::domain::entities::LiveStreamId;
use crate::presentation::extract::{Json, Path};
use crate::presentation::middleware::error::AppError;

pub async fn create_live_stream(
    State(state): State<AppState>,
    Json(request): Json<CreateLiveStreamRequest>,
) -> Result<(StatusCode, Json<LiveStreamDto>), AppError> {
    let stream = CreateLiveStreamUseCase::new(state.live_streams).execute(request).await?;
    Ok((StatusCode::CREATED, Json(stream)))
}

pub async fn list_live_streams(
    State(state): State<AppState>,
) -> Result<Json<Vec<LiveStreamDto>>, AppError> {
    let streams = ListLiveStreamsUseCase::new(state.live_streams).execute().await?;
    Ok(Json(streams))
}

/// The active stream, or JSON `null` when nothing is on air
pub async fn get_active_live_stream(
    State(state): State<AppState>,
) -> Result<Json<Option<LiveStreamDto>>, AppError> {
    let active = FindActiveLiveStreamUseCase::new(state.live_streams).execute().await?;
    Ok(Json(active))
}

pub async fn get_live_stream(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<LiveStreamDto>, AppError> {
    let stream = GetLiveStreamUseCase::new(state.live_streams).execute(LiveStreamId::new(id)).await?;
    Ok(Json(stream))
}

pub async fn update_live_stream(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateLiveStreamRequest>,
) -> Result<Json<LiveStreamDto>, AppError> {
    let stream = UpdateLiveStreamUseCase::new(state.live_streams)
        .execute(LiveStreamId::new(id), request)
        .await?;
    Ok(Json(stream))
}

pub async fn delete_live_stream(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    DeleteLiveStreamUseCase::new(state.live_streams).execute(LiveStreamId::new(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
