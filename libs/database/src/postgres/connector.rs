use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use tracing::info;

use super::PostgresConfig;
use crate::common::{DatabaseError, DatabaseResult, RetryConfig, retry_with_backoff};

/// Build a pool from explicit options.
///
/// SeaORM opens at least one connection here, so an unreachable server
/// fails fast.
pub async fn connect_with_options(options: ConnectOptions) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(options).await?;
    info!("Connected to PostgreSQL");
    Ok(db)
}

/// Build a pool from `config` with a single attempt.
pub async fn connect_from_config(config: PostgresConfig) -> DatabaseResult<DatabaseConnection> {
    connect_from_config_with_retry(config, Some(RetryConfig::none())).await
}

/// Build a pool from `config`, retrying with exponential backoff.
///
/// `None` uses the retry budget carried by the config
/// (`DB_CONNECT_RETRIES`).
pub async fn connect_from_config_with_retry(
    config: PostgresConfig,
    retry_config: Option<RetryConfig>,
) -> DatabaseResult<DatabaseConnection> {
    let retry = retry_config.unwrap_or_else(|| config.retry_config());
    let target = config.redacted_url();
    let options = config.into_connect_options();

    info!(url = %target, max_retries = retry.max_retries, "Connecting to PostgreSQL");

    retry_with_backoff(|| connect_with_options(options.clone()), retry)
        .await
        .map_err(|e| DatabaseError::ConnectionFailed(format!("{target}: {e}")))
}

/// Release every connection held by the pool.
pub async fn close(db: DatabaseConnection) -> DatabaseResult<()> {
    db.close()
        .await
        .map_err(|e| DatabaseError::CloseFailed(e.to_string()))?;
    info!("PostgreSQL pool closed");
    Ok(())
}
