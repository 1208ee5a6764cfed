use crate::infrastructure::config::DatabaseConfig;
use anyhow::Result;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use tracing::info;

/// Database connection pool wrapper
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new database connection pool
    ///
    /// Every pooled connection has its `search_path` pointed at the configured schema.
    ///
    /// # Errors
    /// Returns an error if the database connection fails
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        let connection_url = config.connection_url();
        let set_search_path = search_path_statement(&config.schema);

        info!("Connecting to PostgreSQL database at {}:{}", config.host, config.port);

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
            .after_connect(move |conn, _meta| {
                let statement = set_search_path.clone();
                Box::pin(async move {
                    sqlx::query(&statement).execute(conn).await?;
                    Ok(())
                })
            })
            .connect(&connection_url)
            .await?;

        let _ = sqlx::query("SELECT 1").fetch_one(&pool).await?;

        info!("Successfully connected to PostgreSQL database");

        Ok(Self { pool })
    }

    /// Get a reference to the connection pool
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Close the database connection pool
    pub async fn close(&self) {
        if !self.pool.is_closed() {
            info!("Closing database connection pool");
            self.pool.close().await;
        }
    }
}

fn search_path_statement(schema: &str) -> String {
    format!("SET search_path TO \"{}\"", schema.replace('"', "\"\""))
}
