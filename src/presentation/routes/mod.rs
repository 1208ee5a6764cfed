use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, patch, post},
    Router,
};

use crate::{
    infrastructure::http::{health_check, readiness_check},
    presentation::handlers::{live_streams, uploads, users, AppState},
};

/// Multipart framing allowance on top of the configured file limit
const UPLOAD_BODY_OVERHEAD: u64 = 64 * 1024;

/// Create all application routes with application state
pub fn create_routes(app_state: AppState) -> Router {
    let upload_body_limit =
        usize::try_from(app_state.max_upload_size.saturating_add(UPLOAD_BODY_OVERHEAD))
            .unwrap_or(usize::MAX);

    Router::new()
        .nest("/api", api_routes(upload_body_limit))
        .with_state(app_state)
}

fn api_routes(upload_body_limit: usize) -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .nest("/uploads", upload_routes(upload_body_limit))
        .nest("/usuarios", user_routes())
        .nest("/live-stream", live_stream_routes())
}

fn upload_routes(upload_body_limit: usize) -> Router<AppState> {
    Router::new()
        .route(
            "/image",
            post(uploads::upload_image).layer(DefaultBodyLimit::max(upload_body_limit)),
        )
        .route("/{filename}", get(uploads::get_image))
}

/// Administrator-only user directory routes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list_users))
        .route(
            "/{id}",
            get(users::get_user).patch(users::update_user).delete(users::deactivate_user),
        )
        .route("/{id}/activar", patch(users::reactivate_user))
        .route("/{id}/purge", delete(users::purge_user))
}

fn live_stream_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(live_streams::create_live_stream).get(live_streams::list_live_streams))
        .route("/active", get(live_streams::get_active_live_stream))
        .route(
            "/{id}",
            get(live_streams::get_live_stream)
                .patch(live_streams::update_live_stream)
                .delete(live_streams::delete_live_stream),
        )
}
