/// Errors raised while acquiring, checking or releasing a connection pool.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// Driver error that does not fit a more specific variant
    #[cfg(feature = "postgres")]
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] sea_orm::DbErr),

    /// The pool could not be built, even after retries
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The pool exists but the server did not answer
    #[error("Health check failed: {0}")]
    HealthCheckFailed(String),

    /// Releasing the pool failed
    #[error("Close failed: {0}")]
    CloseFailed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type alias for database operations
pub type DatabaseResult<T> = Result<T, DatabaseError>;
