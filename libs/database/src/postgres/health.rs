use sea_orm::DatabaseConnection;
use tracing::debug;

use crate::common::DatabaseError;

/// Active liveness check: one round trip to the server.
///
/// Startup calls this right after the pool is built so a bad DSN or a
/// server that accepted the TCP connection but is not answering aborts
/// before anything else is acquired.
pub async fn ping(db: &DatabaseConnection) -> Result<(), DatabaseError> {
    debug!("Pinging PostgreSQL");
    db.ping()
        .await
        .map_err(|e| DatabaseError::HealthCheckFailed(format!("PostgreSQL ping failed: {e}")))?;
    debug!("PostgreSQL ping succeeded");
    Ok(())
}
