use axum::{
    body::Body,
    extract::Request,
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::fmt::Display;
use thiserror::Error;
use tower_http::request_id::RequestId;
use tracing::{error, warn};
use uuid::Uuid;

use crate::infrastructure::storage::StorageError;

/// Everything a handler can fail with, mapped one-to-one onto an HTTP status
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    #[error("Authorization failed: {message}")]
    Authorization { message: String },

    #[error("Validation failed: {errors:?}")]
    Validation { errors: HashMap<String, String> },

    #[error("{message}")]
    NotFound { message: String },

    #[error("{message}")]
    Conflict { message: String },

    #[error("Invalid request: {message}")]
    BadRequest { message: String },

    #[error("Request too large: {message}")]
    PayloadTooLarge { message: String },

    #[error("Database error: {message}")]
    Database { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Internal server error: {message}")]
    Internal { message: String },
}

impl AppError {
    pub fn user_not_found(id: impl Display) -> Self {
        AppError::NotFound { message: format!("Usuario con ID {id} no encontrado") }
    }

    pub fn role_not_found(id: impl Display) -> Self {
        AppError::NotFound { message: format!("Rol con ID {id} no encontrado") }
    }

    pub fn live_stream_not_found(id: impl Display) -> Self {
        AppError::NotFound { message: format!("Transmisión {id} no encontrada") }
    }

    pub fn image_not_found() -> Self {
        AppError::NotFound { message: "Imagen no encontrada".to_string() }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Authentication { .. } => StatusCode::UNAUTHORIZED,
            AppError::Authorization { .. } => StatusCode::FORBIDDEN,
            AppError::Validation { .. } | AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Database { .. } | AppError::Storage { .. } | AppError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Stable machine-readable kind, rendered as `error.type`
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::Authentication { .. } => "authentication",
            AppError::Authorization { .. } => "authorization",
            AppError::Validation { .. } => "validation",
            AppError::NotFound { .. } => "not_found",
            AppError::Conflict { .. } => "conflict",
            AppError::BadRequest { .. } => "bad_request",
            AppError::PayloadTooLarge { .. } => "payload_too_large",
            AppError::Database { .. } => "database",
            AppError::Storage { .. } => "storage",
            AppError::Internal { .. } => "internal",
        }
    }

    /// Server faults are logged at error level, client faults at warn
    pub fn is_server_fault(&self) -> bool {
        self.status_code().is_server_error()
    }

    pub fn to_error_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: ErrorDetail {
                id: Uuid::new_v4().to_string(),
                error_type: self.error_type().to_string(),
                message: self.to_string(),
                details: match self {
                    AppError::Validation { errors } => Some(json!({ "validation_errors": errors })),
                    _ => None,
                },
                request_id: None,
                timestamp: chrono::Utc::now().to_rfc3339(),
            },
        }
    }
}

#[derive(serde::Serialize, Debug, Clone)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(serde::Serialize, Debug, Clone)]
pub struct ErrorDetail {
    pub id: String,
    #[serde(rename = "type")]
    pub error_type: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    pub timestamp: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = self.to_error_response();

        if self.is_server_fault() {
            error!(error_type = self.error_type(), error_id = %body.error.id, "{}", self);
        } else {
            warn!(error_type = self.error_type(), error_id = %body.error.id, "{}", self);
        }

        let mut response = (self.status_code(), Json(body.clone())).into_response();
        // Picked up by `attach_request_id` once the request id is known
        response.extensions_mut().insert(body);
        response
    }
}

/// Stamp the request id assigned by `SetRequestIdLayer` into error bodies
pub async fn attach_request_id(request: Request, next: Next) -> Response {
    let request_id = request
        .extensions()
        .get::<RequestId>()
        .and_then(|id| id.header_value().to_str().ok())
        .map(String::from);

    let mut response = next.run(request).await;

    let Some(request_id) = request_id else {
        return response;
    };
    let Some(mut body) = response.extensions_mut().remove::<ErrorResponse>() else {
        return response;
    };

    body.error.request_id = Some(request_id);
    let Ok(bytes) = serde_json::to_vec(&body) else {
        return response;
    };

    let (mut parts, _) = response.into_parts();
    parts.headers.remove(header::CONTENT_LENGTH);
    Response::from_parts(parts, Body::from(bytes))
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::Conflict { message: format!("Registro duplicado: {}", db.message()) }
            }
            other => AppError::Database { message: other.to_string() },
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Storage { message: err.to_string() }
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::FileNotFound { .. } => AppError::image_not_found(),
            StorageError::EmptyContent => {
                AppError::BadRequest { message: "No file content provided".to_string() }
            }
            StorageError::InvalidFilename { message } => AppError::BadRequest { message },
            StorageError::TooLarge { size, max_size } => AppError::PayloadTooLarge {
                message: format!(
                    "File size {size} bytes exceeds maximum allowed size of {max_size} bytes"
                ),
            },
            StorageError::NameCollision { .. } | StorageError::IoError { .. } => {
                AppError::Storage { message: err.to_string() }
            }
        }
    }
}
