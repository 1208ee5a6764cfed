use axum::{
    extract::State,
    http::{header, Method, StatusCode},
    middleware,
    response::Json,
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

use crate::infrastructure::{
    config::AppConfig,
    persistence::{
        Database, DisconnectedLiveStreamRepository, DisconnectedUserRepository,
        PostgreSqlLiveStreamRepository, PostgreSqlUserRepository,
    },
    storage::FilesystemStorage,
};
use crate::presentation::{
    handlers::{AppState, DynLiveStreamRepository, DynUserRepository},
    middleware::{
        auth::JwtService,
        error::{attach_request_id, AppError},
        validation::{validation_middleware, RequestValidator, ValidationConfig},
    },
    routes,
};

/// Create the main application router
pub fn create_app(config: &AppConfig, app_state: AppState) -> Router {
    let validator =
        RequestValidator::new(ValidationConfig::for_upload_limit(config.server.max_upload_size));

    let middleware_stack = ServiceBuilder::new()
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(CompressionLayer::new())
        .layer(middleware::from_fn(attach_request_id))
        .layer(TimeoutLayer::new(Duration::from_secs(config.server.request_timeout_seconds)))
        .layer(create_cors_layer())
        .layer(middleware::from_fn(validation_middleware(validator)));

    routes::create_routes(app_state).fallback(not_found_handler).layer(middleware_stack)
}

/// Liveness check
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "service": "newsroom-admin-service"
    }))
}

/// Readiness check covering the database and the uploads directory
pub async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let users = state.users.health_check().await;
    let live_streams = state.live_streams.health_check().await;
    let storage = state.storage.health_check().await;

    let database_status = match (&users, &live_streams) {
        (Ok(()), Ok(())) => "ok".to_string(),
        (Err(e), _) | (_, Err(e)) => {
            tracing::warn!("Database readiness check failed: {}", e);
            "unavailable".to_string()
        }
    };
    let storage_status = match &storage {
        Ok(()) => "ok".to_string(),
        Err(e) => {
            tracing::warn!("Storage readiness check failed: {}", e);
            "unavailable".to_string()
        }
    };

    let ready = users.is_ok() && live_streams.is_ok() && storage.is_ok();
    let status = if ready { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };

    (
        status,
        Json(json!({
            "status": if ready { "ready" } else { "not_ready" },
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "checks": {
                "database": database_status,
                "storage": storage_status
            }
        })),
    )
}

/// Unknown routes get the same error body as every other failure
async fn not_found_handler() -> AppError {
    AppError::NotFound { message: "The requested resource was not found".to_string() }
}

/// Create CORS layer with appropriate settings
fn create_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(3600))
}

/// Build repositories, falling back to disconnected ones when the database is unreachable
async fn build_repositories(
    config: &AppConfig,
) -> (Option<Database>, Arc<DynUserRepository>, Arc<DynLiveStreamRepository>) {
    match Database::new(&config.database).await {
        Ok(database) => {
            let pool = database.pool().clone();
            let users: Arc<DynUserRepository> =
                Arc::new(PostgreSqlUserRepository::new(pool.clone()));
            let live_streams: Arc<DynLiveStreamRepository> =
                Arc::new(PostgreSqlLiveStreamRepository::new(pool));
            (Some(database), users, live_streams)
        }
        Err(e) => {
            tracing::warn!("Failed to connect to database: {}", e);
            tracing::info!("Starting server without database connection");
            let message = e.to_string();
            let users: Arc<DynUserRepository> =
                Arc::new(DisconnectedUserRepository::new(message.clone()));
            let live_streams: Arc<DynLiveStreamRepository> =
                Arc::new(DisconnectedLiveStreamRepository::new(message));
            (None, users, live_streams)
        }
    }
}

/// Start the HTTP server
///
/// # Errors
/// Returns an error if the uploads directory cannot be prepared or the server fails to start
pub async fn start_server(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let (database, users, live_streams) = build_repositories(&config).await;

    let storage = FilesystemStorage::open(
        &config.storage.uploads_dir,
        config.storage.public_url_prefix.clone(),
        config.storage.max_concurrent_io,
    )
    .await?;

    let app_state = AppState {
        users,
        live_streams,
        storage: Arc::new(storage),
        jwt: JwtService::new(&config.auth.jwt_secret),
        max_upload_size: config.server.max_upload_size,
    };

    let app = create_app(&config, app_state);
    let addr = config.server.socket_addr()?;

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    if let Some(database) = database {
        database.close().await;
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}
