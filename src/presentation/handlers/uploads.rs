use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use super::AppState;
use crate::application::{
    dto::UploadImageResponse,
    use_cases::{RetrieveAssetUseCase, UploadAssetUseCase},
};
use crate::presentation::extract::{Json, Path};
use crate::presentation::middleware::{auth::UserContext, error::AppError};

/// Multipart field carrying the image
const FILE_FIELD: &str = "file";

/// Name used when the client sends no filename
const DEFAULT_UPLOAD_NAME: &str = "upload";

const CACHE_CONTROL_VALUE: &str = "public, max-age=3600";

/// Upload an image sent as multipart field `file`
///
/// # Errors
/// 400 when the field is missing or not an image, 413 when it is too large
pub async fn upload_image(
    user: UserContext,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadImageResponse>), AppError> {
    let mut upload = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let original_name = field
            .file_name()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(DEFAULT_UPLOAD_NAME)
            .to_string();
        let content_type = field.content_type().map(str::to_string);
        let content = field.bytes().await.map_err(multipart_error)?;

        upload = Some((original_name, content_type, content));
        break;
    }

    let (original_name, content_type, content) = upload.ok_or_else(|| AppError::BadRequest {
        message: "No file provided in field 'file'".to_string(),
    })?;

    tracing::debug!("User {} uploading {} ({} bytes)", user.user_id, original_name, content.len());

    let response = UploadAssetUseCase::new(state.storage, state.max_upload_size)
        .execute(&content, &original_name, content_type.as_deref())
        .await?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// Serve a stored image
pub async fn get_image(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response, AppError> {
    let asset = RetrieveAssetUseCase::new(state.storage).execute(&filename).await?;

    Ok((
        [(header::CONTENT_TYPE, asset.content_type), (header::CACHE_CONTROL, CACHE_CONTROL_VALUE)],
        asset.content,
    )
        .into_response())
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge { message: err.body_text() }
    } else {
        AppError::BadRequest { message: format!("Invalid multipart body: {}", err.body_text()) }
    }
}
