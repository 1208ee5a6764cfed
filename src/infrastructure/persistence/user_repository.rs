use crate::presentation::middleware::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};

use crate::domain::entities::{ProfileInfo, Role, RoleId, User, UserId};
use crate::domain::repositories::UserRepository;
use crate::domain::value_objects::{AccountStatus, RoleName};

/// Columns shared by every user query; the profile is limited to one row per user
const USER_SELECT: &str = r"
    SELECT u.id, u.email, u.nombre, u.apellido, u.activo, u.created_at, u.updated_at,
           r.id AS rol_id, r.nombre AS rol_nombre,
           i.id AS informacion_id, i.biografia, i.avatar_url, i.telefono
    FROM usuarios u
    JOIN roles r ON r.id = u.rol_id
    LEFT JOIN LATERAL (
        SELECT id, biografia, avatar_url, telefono
        FROM informacion_usuario
        WHERE usuario_id = u.id
        ORDER BY id
        LIMIT 1
    ) i ON TRUE
";

/// `PostgreSQL` implementation of `UserRepository`
#[derive(Clone)]
pub struct PostgreSqlUserRepository {
    pool: PgPool,
}

impl PostgreSqlUserRepository {
    /// Create a new `PostgreSQL` user repository
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgreSqlUserRepository {
    type Error = AppError;

    async fn find_all(&self) -> Result<Vec<User>, Self::Error> {
        let query = format!("{USER_SELECT} ORDER BY u.id");

        let rows = sqlx::query(&query).fetch_all(&self.pool).await.map_err(AppError::from)?;

        rows.iter().map(map_row_to_user).collect()
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, Self::Error> {
        let query = format!("{USER_SELECT} WHERE u.id = $1");

        let row = sqlx::query(&query)
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)?;

        row.as_ref().map(map_row_to_user).transpose()
    }

    async fn find_role_by_id(&self, id: RoleId) -> Result<Option<Role>, Self::Error> {
        let row = sqlx::query(
            r"
            SELECT id, nombre
            FROM roles
            WHERE id = $1
            ",
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)?;

        match row {
            Some(row) => {
                let name: String = row.get("nombre");
                Ok(Some(Role::new(RoleId::new(row.get("id")), parse_role_name(&name)?)))
            }
            None => Ok(None),
        }
    }

    async fn update(&self, user: &User) -> Result<bool, Self::Error> {
        let result = sqlx::query(
            r"
            UPDATE usuarios
            SET email = $2, nombre = $3, apellido = $4, activo = $5, rol_id = $6, updated_at = $7
            WHERE id = $1
            ",
        )
        .bind(user.id.as_i64())
        .bind(&user.email)
        .bind(&user.name)
        .bind(&user.surname)
        .bind(user.status.is_active())
        .bind(user.role.id.as_i64())
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => AppError::Conflict {
                message: format!("El email {} ya está registrado", user.email),
            },
            other => AppError::from(other),
        })?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: UserId) -> Result<bool, Self::Error> {
        let mut tx = self.pool.begin().await.map_err(AppError::from)?;

        sqlx::query("DELETE FROM informacion_usuario WHERE usuario_id = $1")
            .bind(id.as_i64())
            .execute(&mut *tx)
            .await
            .map_err(AppError::from)?;

        let result = sqlx::query("DELETE FROM usuarios WHERE id = $1")
            .bind(id.as_i64())
            .execute(&mut *tx)
            .await
            .map_err(AppError::from)?;

        tx.commit().await.map_err(AppError::from)?;

        Ok(result.rows_affected() > 0)
    }

    async fn health_check(&self) -> Result<(), Self::Error> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::Database { message: format!("Health check failed: {e}") })?;
        Ok(())
    }
}

fn parse_role_name(name: &str) -> Result<RoleName, AppError> {
    name.parse::<RoleName>().map_err(|message| AppError::Database { message })
}

/// Helper function to map a joined user row to a `User` entity
fn map_row_to_user(row: &sqlx::postgres::PgRow) -> Result<User, AppError> {
    let role_name: String = row.get("rol_nombre");
    let role = Role::new(RoleId::new(row.get("rol_id")), parse_role_name(&role_name)?);

    let profile_id: Option<i64> = row.get("informacion_id");
    let profile = profile_id.map(|_| ProfileInfo {
        biography: row.get("biografia"),
        avatar_url: row.get("avatar_url"),
        phone: row.get("telefono"),
    });

    let active: bool = row.get("activo");
    let created_at: DateTime<Utc> = row.get("created_at");
    let updated_at: DateTime<Utc> = row.get("updated_at");

    Ok(User {
        id: UserId::new(row.get("id")),
        email: row.get("email"),
        name: row.get("nombre"),
        surname: row.get("apellido"),
        status: AccountStatus::from_active_flag(active),
        role,
        profile,
        created_at,
        updated_at,
    })
}

/// Stand-in used when the database could not be reached at startup
///
/// Every call fails, so the service stays up and readiness reports the outage.
#[derive(Clone)]
pub struct DisconnectedUserRepository {
    error_message: String,
}

impl DisconnectedUserRepository {
    /// Create a new disconnected repository with an error message
    #[must_use]
    pub fn new(error_message: String) -> Self {
        Self { error_message }
    }

    fn unavailable(&self) -> AppError {
        AppError::Database { message: format!("Database unavailable: {}", self.error_message) }
    }
}

#[async_trait]
impl UserRepository for DisconnectedUserRepository {
    type Error = AppError;

    async fn find_all(&self) -> Result<Vec<User>, Self::Error> {
        Err(self.unavailable())
    }

    async fn find_by_id(&self, _id: UserId) -> Result<Option<User>, Self::Error> {
        Err(self.unavailable())
    }

    async fn find_role_by_id(&self, _id: RoleId) -> Result<Option<Role>, Self::Error> {
        Err(self.unavailable())
    }

    async fn update(&self, _user: &User) -> Result<bool, Self::Error> {
        Err(self.unavailable())
    }

    async fn delete(&self, _id: UserId) -> Result<bool, Self::Error> {
        Err(self.unavailable())
    }

    async fn health_check(&self) -> Result<(), Self::Error> {
        Err(self.unavailable())
    }
}
