// src/db.rs

use std::str::FromStr;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::{config::Config, error::AppError};

/// Table definitions, applied idempotently.
pub const SCHEMA: &str = include_str!("../schema.sql");

const MAX_RETRIES: u32 = 5;

/// Opens the connection pool, retrying while the database is unavailable.
///
/// The database file is created if missing and foreign key enforcement is
/// switched on for every connection.
pub async fn connect(config: &Config) -> Result<SqlitePool, AppError> {
    let options = SqliteConnectOptions::from_str(&config.database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let mut retry_count = 0;
    loop {
        match SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect_with(options.clone())
            .await
        {
            Ok(pool) => return Ok(pool),
            Err(e) => {
                retry_count += 1;
                if retry_count > MAX_RETRIES {
                    tracing::error!(
                        "Failed to connect to database after {} retries: {}",
                        MAX_RETRIES,
                        e
                    );
                    return Err(AppError::from(e));
                }
                tracing::warn!(
                    "Database not ready, retrying in 2s... (Attempt {})",
                    retry_count
                );
                tokio::time::sleep(Duration::from_secs(2)).await;
            }
        }
    }
}

/// Creates every table and index that does not exist yet.
pub async fn init_schema(pool: &SqlitePool) -> Result<(), AppError> {
    sqlx::raw_sql(SCHEMA).execute(pool).await.map_err(|e| {
        tracing::error!("Failed to apply schema: {:?}", e);
        AppError::from(e)
    })?;
    Ok(())
}
