use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    typed_header::TypedHeaderRejectionReason,
    TypedHeader,
};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::{debug, error};

use super::error::AppError;
use crate::domain::entities::UserId;
use crate::domain::value_objects::RoleName;

/// Bearer token claims issued by the platform's login service
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    pub sub: String, // User ID
    pub email: String,
    pub rol: String,
    pub exp: usize,
    pub iat: usize,
}

impl Claims {
    /// Claims for `user_id` valid for `expires_in_hours`
    #[must_use]
    pub fn new(user_id: UserId, email: String, role: RoleName, expires_in_hours: u64) -> Self {
        let now = chrono::Utc::now().timestamp().max(0) as usize;
        let exp = now + (expires_in_hours * 3600) as usize;

        Self { sub: user_id.to_string(), email, rol: role.as_str().to_string(), exp, iat: now }
    }
}

/// Caller identity extracted from a verified token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserContext {
    pub user_id: UserId,
    pub email: String,
    pub role: RoleName,
}

impl UserContext {
    pub fn is_administrator(&self) -> bool {
        self.role.is_administrator()
    }
}

impl TryFrom<Claims> for UserContext {
    type Error = JwtError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        let user_id = claims
            .sub
            .parse::<i64>()
            .map(UserId::new)
            .map_err(|_| JwtError::InvalidClaims(format!("sub is not a user id: {}", claims.sub)))?;
        let role = claims.rol.parse::<RoleName>().map_err(JwtError::InvalidClaims)?;

        Ok(Self { user_id, email: claims.email, role })
    }
}

impl fmt::Display for UserContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UserContext(user_id={}, role={})", self.user_id, self.role.as_str())
    }
}

/// JWT service for token operations
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtService {
    /// Create new HS256 JWT service with secret
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_ref()),
            decoding_key: DecodingKey::from_secret(secret.as_ref()),
            validation,
        }
    }

    /// Encode claims into JWT token
    pub fn encode_claims(&self, claims: &Claims) -> Result<String, JwtError> {
        encode(&Header::default(), claims, &self.encoding_key).map_err(|e| {
            error!("Failed to encode JWT: {}", e);
            JwtError::EncodingError(e.to_string())
        })
    }

    /// Decode JWT token and extract claims
    pub fn decode_token(&self, token: &str) -> Result<Claims, JwtError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| {
                debug!("Failed to decode JWT: {}", e);
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                    jsonwebtoken::errors::ErrorKind::InvalidToken => JwtError::InvalidToken,
                    _ => JwtError::DecodingError(e.to_string()),
                }
            })
    }

    /// Verify a bearer token and resolve the caller
    pub fn authenticate(&self, token: &str) -> Result<UserContext, JwtError> {
        UserContext::try_from(self.decode_token(token)?)
    }

    /// Create an access token; used by tooling and tests, tokens are normally issued elsewhere
    pub fn create_access_token(
        &self,
        user_id: UserId,
        email: String,
        role: RoleName,
        expires_in_hours: u64,
    ) -> Result<String, JwtError> {
        self.encode_claims(&Claims::new(user_id, email, role, expires_in_hours))
    }
}

/// JWT-related errors
#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Token has expired")]
    Expired,

    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("Invalid token format")]
    InvalidToken,

    #[error("Invalid token claims: {0}")]
    InvalidClaims(String),

    #[error("Missing authorization header")]
    MissingHeader,

    #[error("Invalid authorization header format")]
    InvalidHeaderFormat,

    #[error("Token encoding error: {0}")]
    EncodingError(String),

    #[error("Token decoding error: {0}")]
    DecodingError(String),
}

impl From<JwtError> for AppError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::Expired => {
                AppError::Authentication { message: "Token has expired".to_string() }
            }
            JwtError::InvalidSignature
            | JwtError::InvalidToken
            | JwtError::InvalidHeaderFormat
            | JwtError::InvalidClaims(_)
            | JwtError::DecodingError(_) => {
                AppError::Authentication { message: "Invalid token".to_string() }
            }
            JwtError::MissingHeader => {
                AppError::Authentication { message: "Authorization header required".to_string() }
            }
            JwtError::EncodingError(msg) => {
                AppError::Internal { message: format!("JWT processing error: {msg}") }
            }
        }
    }
}

/// Any caller holding a valid bearer token
impl<S> FromRequestParts<S> for UserContext
where
    JwtService: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let header: Result<TypedHeader<Authorization<Bearer>>, _> =
            TypedHeader::from_request_parts(parts, state).await;

        let TypedHeader(Authorization(bearer)) = header.map_err(|rejection| {
            if matches!(rejection.reason(), TypedHeaderRejectionReason::Missing) {
                JwtError::MissingHeader
            } else {
                JwtError::InvalidHeaderFormat
            }
        })?;

        let context = JwtService::from_ref(state).authenticate(bearer.token())?;
        debug!("Authenticated {}", context);
        Ok(context)
    }
}

/// A caller whose token carries the administrator role
#[derive(Debug, Clone)]
pub struct AdminUser(pub UserContext);

impl<S> FromRequestParts<S> for AdminUser
where
    JwtService: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let context = UserContext::from_request_parts(parts, state).await?;

        if !context.is_administrator() {
            return Err(AppError::Authorization {
                message: format!(
                    "Access denied. Required role: {}, user role: {}",
                    RoleName::Administrator.as_str(),
                    context.role.as_str()
                ),
            });
        }

        Ok(Self(context))
    }
}
