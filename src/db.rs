//! Postgres pool construction and the connectivity probe.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::DatabaseConfig;

/// Build a lazily-connecting pool.
///
/// Connections are only established on first use, so the process starts even
/// when the database is unreachable; the health endpoint reports that state
/// instead of the service failing to boot.
pub fn connect(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .connect_lazy(&config.url)
}

/// Connectivity probe: one trivial round-trip on a pooled connection.
///
/// This is the probe handed to the bounded health check. The pool itself is
/// owned by the application state; the check only invokes it.
pub async fn ping(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
