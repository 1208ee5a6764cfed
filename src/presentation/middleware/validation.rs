use axum::{
    extract::Request,
    http::{header, HeaderMap, Method},
    middleware::Next,
    response::Response,
};
use std::collections::HashMap;
use tracing::debug;

use super::error::AppError;

/// Slack allowed on top of the file limit for multipart boundaries and part headers
const MULTIPART_OVERHEAD: u64 = 64 * 1024;

/// Header-level request validation configuration
///
/// Bodies are never buffered here; the extractors enforce the exact limits.
#[derive(Debug, Clone)]
pub struct ValidationConfig {
    /// Validate Content-Type headers on requests that carry a body
    pub validate_content_type: bool,
    /// Allowed content types per method
    pub allowed_content_types: HashMap<Method, Vec<String>>,
    /// Reject requests whose declared Content-Length exceeds `max_body_size`
    pub validate_body_size: bool,
    pub max_body_size: u64,
}

impl ValidationConfig {
    /// Configuration for a service accepting uploads up to `max_upload_size` bytes
    pub fn for_upload_limit(max_upload_size: u64) -> Self {
        let mut allowed_content_types = HashMap::new();
        allowed_content_types.insert(
            Method::POST,
            vec!["application/json".to_string(), "multipart/form-data".to_string()],
        );
        allowed_content_types.insert(Method::PATCH, vec!["application/json".to_string()]);

        Self {
            validate_content_type: true,
            allowed_content_types,
            validate_body_size: true,
            max_body_size: max_upload_size.saturating_add(MULTIPART_OVERHEAD),
        }
    }
}

/// Validation error types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    InvalidContentType { received: String, allowed: Vec<String> },
    BodyTooLarge { size: u64, max_size: u64 },
    InvalidHeaderValue { header: String, reason: String },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::InvalidContentType { received, allowed } => {
                write!(f, "Invalid content type '{}', allowed: {}", received, allowed.join(", "))
            }
            ValidationError::BodyTooLarge { size, max_size } => {
                write!(f, "Request body too large: {size} bytes (max: {max_size} bytes)")
            }
            ValidationError::InvalidHeaderValue { header, reason } => {
                write!(f, "Invalid header '{header}': {reason}")
            }
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(error: ValidationError) -> Self {
        match error {
            ValidationError::BodyTooLarge { .. } => {
                AppError::PayloadTooLarge { message: error.to_string() }
            }
            ValidationError::InvalidContentType { .. }
            | ValidationError::InvalidHeaderValue { .. } => {
                AppError::BadRequest { message: error.to_string() }
            }
        }
    }
}

/// Request validator
#[derive(Debug, Clone)]
pub struct RequestValidator {
    config: ValidationConfig,
}

impl RequestValidator {
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Validate method and headers, returning the first problem found
    pub fn validate_request(&self, method: &Method, headers: &HeaderMap) -> Result<(), ValidationError> {
        let content_length = Self::content_length(headers)?;

        if self.config.validate_body_size {
            if let Some(size) = content_length {
                if size > self.config.max_body_size {
                    return Err(ValidationError::BodyTooLarge {
                        size,
                        max_size: self.config.max_body_size,
                    });
                }
            }
        }

        let has_body = content_length.is_some_and(|size| size > 0)
            || headers.contains_key(header::TRANSFER_ENCODING);

        if self.config.validate_content_type && has_body {
            self.validate_content_type(method, headers)?;
        }

        Ok(())
    }

    fn content_length(headers: &HeaderMap) -> Result<Option<u64>, ValidationError> {
        let Some(value) = headers.get(header::CONTENT_LENGTH) else {
            return Ok(None);
        };

        value.to_str().ok().and_then(|v| v.trim().parse::<u64>().ok()).map(Some).ok_or_else(|| {
            ValidationError::InvalidHeaderValue {
                header: header::CONTENT_LENGTH.to_string(),
                reason: "not a valid length".to_string(),
            }
        })
    }

    fn validate_content_type(&self, method: &Method, headers: &HeaderMap) -> Result<(), ValidationError> {
        let Some(allowed_types) = self.config.allowed_content_types.get(method) else {
            return Ok(());
        };

        let content_type =
            headers.get(header::CONTENT_TYPE).and_then(|ct| ct.to_str().ok()).unwrap_or("");

        // Extract main content type (ignore parameters like charset or boundary)
        let main_content_type = content_type.split(';').next().unwrap_or("").trim();

        if allowed_types.iter().any(|allowed| main_content_type.eq_ignore_ascii_case(allowed)) {
            Ok(())
        } else {
            Err(ValidationError::InvalidContentType {
                received: if main_content_type.is_empty() {
                    "none".to_string()
                } else {
                    main_content_type.to_string()
                },
                allowed: allowed_types.clone(),
            })
        }
    }
}

/// Request validation middleware
pub fn validation_middleware(
    validator: RequestValidator,
) -> impl Fn(
    Request,
    Next,
)
    -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, AppError>> + Send>>
       + Clone {
    move |request: Request, next: Next| {
        let validator = validator.clone();
        Box::pin(async move {
            if let Err(error) = validator.validate_request(request.method(), request.headers()) {
                debug!("Request validation failed: {}", error);
                return Err(error.into());
            }

            Ok(next.run(request).await)
        })
    }
}
