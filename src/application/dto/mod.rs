use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{LiveStream, LiveStreamId, Role, RoleId, User, UserId};
use crate::domain::value_objects::RoleName;

/// Public projection of a role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleDto {
    pub id: RoleId,
    #[serde(rename = "nombre")]
    pub name: RoleName,
}

impl From<Role> for RoleDto {
    fn from(role: Role) -> Self {
        Self { id: role.id, name: role.name }
    }
}

/// Public projection of a user; never carries credentials or profile internals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDto {
    pub id: UserId,
    pub email: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "apellido")]
    pub surname: String,
    #[serde(rename = "activo")]
    pub active: bool,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "rol")]
    pub role: RoleDto,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            active: user.is_active(),
            email: user.email,
            name: user.name,
            surname: user.surname,
            created_at: user.created_at,
            role: user.role.into(),
        }
    }
}

/// Partial user update; absent fields are left untouched
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    #[serde(rename = "nombre")]
    pub name: Option<String>,
    #[serde(rename = "apellido")]
    pub surname: Option<String>,
    #[serde(rename = "rolId")]
    pub role_id: Option<RoleId>,
}

/// Result of a deactivate, reactivate or purge call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleConfirmation {
    pub message: String,
    pub id: UserId,
    #[serde(rename = "activo")]
    pub active: bool,
}

/// Wire shape of a live stream record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveStreamDto {
    pub id: LiveStreamId,
    #[serde(rename = "titulo")]
    pub title: String,
    pub url: String,
    #[serde(rename = "descripcion")]
    pub description: Option<String>,
    #[serde(rename = "activo")]
    pub active: bool,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl From<LiveStream> for LiveStreamDto {
    fn from(stream: LiveStream) -> Self {
        Self {
            id: stream.id,
            title: stream.title,
            url: stream.url,
            description: stream.description,
            active: stream.active,
            created_at: stream.created_at,
            updated_at: stream.updated_at,
        }
    }
}

/// Request DTO for creating a live stream
#[derive(Debug, Clone, Deserialize)]
pub struct CreateLiveStreamRequest {
    #[serde(rename = "titulo")]
    pub title: String,
    pub url: String,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(rename = "activo", default)]
    pub active: bool,
}

/// Partial live stream update
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateLiveStreamRequest {
    #[serde(rename = "titulo")]
    pub title: Option<String>,
    pub url: Option<String>,
    #[serde(rename = "descripcion")]
    pub description: Option<String>,
    #[serde(rename = "activo")]
    pub active: Option<bool>,
}

/// Response DTO for a successful image upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadImageResponse {
    pub filename: String,
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::AccountStatus;
    use serde_json::json;

    fn sample_user() -> User {
        let now = Utc::now();
        User {
            id: UserId::new(7),
            email: "ana@example.com".to_string(),
            name: "Ana".to_string(),
            surname: "Pérez".to_string(),
            status: AccountStatus::Deactivated,
            role: Role::new(RoleId::new(2), RoleName::Journalist),
            profile: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_user_dto_uses_public_wire_names() {
        let value = serde_json::to_value(UserDto::from(sample_user())).unwrap();

        assert_eq!(value["id"], 7);
        assert_eq!(value["nombre"], "Ana");
        assert_eq!(value["apellido"], "Pérez");
        assert_eq!(value["activo"], false);
        assert_eq!(value["rol"], json!({ "id": 2, "nombre": "PERIODISTA" }));
        assert!(value.get("createdAt").is_some());
        assert!(value.get("password").is_none());
        assert!(value.get("profile").is_none());
    }

    #[test]
    fn test_update_user_request_accepts_partial_body() {
        let request: UpdateUserRequest = serde_json::from_value(json!({ "nombre": "X" })).unwrap();

        assert_eq!(request.name.as_deref(), Some("X"));
        assert!(request.email.is_none());
        assert!(request.role_id.is_none());
    }

    #[test]
    fn test_create_live_stream_request_defaults_to_inactive() {
        let request: CreateLiveStreamRequest =
            serde_json::from_value(json!({ "titulo": "Noticias", "url": "https://x.tv/live" }))
                .unwrap();

        assert!(!request.active);
        assert!(request.description.is_none());
    }

    #[test]
    fn test_lifecycle_confirmation_shape() {
        let confirmation = LifecycleConfirmation {
            message: "Usuario desactivado exitosamente".to_string(),
            id: UserId::new(3),
            active: false,
        };

        let value = serde_json::to_value(confirmation).unwrap();
        assert_eq!(
            value,
            json!({ "message": "Usuario desactivado exitosamente", "id": 3, "activo": false })
        );
    }
}
