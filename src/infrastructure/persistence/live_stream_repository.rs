use crate::presentation::middleware::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Row, Transaction};

use crate::domain::entities::{LiveStream, LiveStreamId};
use crate::domain::repositories::LiveStreamRepository;

/// Advisory lock key serialising writes that activate a stream
const ACTIVATION_LOCK_KEY: i64 = 0x6c69_7665_7374; // "livest"

/// `PostgreSQL` implementation of `LiveStreamRepository`
#[derive(Clone)]
pub struct PostgreSqlLiveStreamRepository {
    pool: PgPool,
}

impl PostgreSqlLiveStreamRepository {
    /// Create a new `PostgreSQL` live stream repository
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Switch off every active stream except `keep`, inside the caller's transaction
///
/// The advisory lock makes concurrent activations queue up, so two writers can
/// never both observe "no other active stream".
async fn deactivate_others(
    tx: &mut Transaction<'_, Postgres>,
    keep: Option<LiveStreamId>,
    now: DateTime<Utc>,
) -> Result<u64, AppError> {
    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(ACTIVATION_LOCK_KEY)
        .execute(&mut **tx)
        .await
        .map_err(AppError::from)?;

    let result = sqlx::query(
        r"
        UPDATE live_streams
        SET activo = FALSE, updated_at = $2
        WHERE activo AND ($1::BIGINT IS NULL OR id <> $1)
        ",
    )
    .bind(keep.map(|id| id.as_i64()))
    .bind(now)
    .execute(&mut **tx)
    .await
    .map_err(AppError::from)?;

    Ok(result.rows_affected())
}

#[async_trait]
impl LiveStreamRepository for PostgreSqlLiveStreamRepository {
    type Error = AppError;

    async fn insert(&self, stream: &LiveStream) -> Result<LiveStream, Self::Error> {
        let mut tx = self.pool.begin().await.map_err(AppError::from)?;

        if stream.active {
            let switched_off = deactivate_others(&mut tx, None, stream.created_at).await?;
            if switched_off > 0 {
                tracing::info!("Deactivated {} previously active live stream(s)", switched_off);
            }
        }

        let row = sqlx::query(
            r"
            INSERT INTO live_streams (titulo, url, descripcion, activo, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, titulo, url, descripcion, activo, created_at, updated_at
            ",
        )
        .bind(&stream.title)
        .bind(&stream.url)
        .bind(&stream.description)
        .bind(stream.active)
        .bind(stream.created_at)
        .bind(stream.updated_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::from)?;

        tx.commit().await.map_err(AppError::from)?;

        Ok(map_row_to_live_stream(&row))
    }

    async fn find_by_id(&self, id: LiveStreamId) -> Result<Option<LiveStream>, Self::Error> {
        let row = sqlx::query(
            r"
            SELECT id, titulo, url, descripcion, activo, created_at, updated_at
            FROM live_streams
            WHERE id = $1
            ",
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)?;

        Ok(row.as_ref().map(map_row_to_live_stream))
    }

    async fn find_active(&self) -> Result<Option<LiveStream>, Self::Error> {
        let row = sqlx::query(
            r"
            SELECT id, titulo, url, descripcion, activo, created_at, updated_at
            FROM live_streams
            WHERE activo
            ORDER BY created_at DESC, id DESC
            LIMIT 1
            ",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)?;

        Ok(row.as_ref().map(map_row_to_live_stream))
    }

    async fn find_all(&self) -> Result<Vec<LiveStream>, Self::Error> {
        let rows = sqlx::query(
            r"
            SELECT id, titulo, url, descripcion, activo, created_at, updated_at
            FROM live_streams
            ORDER BY created_at DESC, id DESC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)?;

        Ok(rows.iter().map(map_row_to_live_stream).collect())
    }

    async fn update(&self, stream: &LiveStream) -> Result<bool, Self::Error> {
        let mut tx = self.pool.begin().await.map_err(AppError::from)?;

        if stream.active {
            deactivate_others(&mut tx, Some(stream.id), stream.updated_at).await?;
        }

        let result = sqlx::query(
            r"
            UPDATE live_streams
            SET titulo = $2, url = $3, descripcion = $4, activo = $5, updated_at = $6
            WHERE id = $1
            ",
        )
        .bind(stream.id.as_i64())
        .bind(&stream.title)
        .bind(&stream.url)
        .bind(&stream.description)
        .bind(stream.active)
        .bind(stream.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(AppError::from)?;

        if result.rows_affected() == 0 {
            tx.rollback().await.map_err(AppError::from)?;
            return Ok(false);
        }

        tx.commit().await.map_err(AppError::from)?;
        Ok(true)
    }

    async fn delete(&self, id: LiveStreamId) -> Result<bool, Self::Error> {
        let result = sqlx::query(
            r"
            DELETE FROM live_streams
            WHERE id = $1
            ",
        )
        .bind(id.as_i64())
        .execute(&self.pool)
        .await
        .map_err(AppError::from)?;

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

/// Helper function to map database row to `LiveStream` entity
fn map_row_to_live_stream(row: &sqlx::postgres::PgRow) -> LiveStream {
    LiveStream {
        id: LiveStreamId::new(row.get("id")),
        title: row.get("titulo"),
        url: row.get("url"),
        description: row.get("descripcion"),
        active: row.get("activo"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

/// Stand-in used when the database could not be reached at startup
#[derive(Clone)]
pub struct DisconnectedLiveStreamRepository {
    error_message: String,
}

impl DisconnectedLiveStreamRepository {
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
impl LiveStreamRepository for DisconnectedLiveStreamRepository {
    type Error = AppError;

    async fn insert(&self, _stream: &LiveStream) -> Result<LiveStream, Self::Error> {
        Err(self.unavailable())
    }

    async fn find_by_id(&self, _id: LiveStreamId) -> Result<Option<LiveStream>, Self::Error> {
        Err(self.unavailable())
    }

    async fn find_active(&self) -> Result<Option<LiveStream>, Self::Error> {
        Err(self.unavailable())
    }

    async fn find_all(&self) -> Result<Vec<LiveStream>, Self::Error> {
        Err(self.unavailable())
    }

    async fn update(&self, _stream: &LiveStream) -> Result<bool, Self::Error> {
        Err(self.unavailable())
    }

    async fn delete(&self, _id: LiveStreamId) -> Result<bool, Self::Error> {
        Err(self.unavailable())
    }

    async fn health_check(&self) -> Result<(), Self::Error> {
        Err(self.unavailable())
    }
}
