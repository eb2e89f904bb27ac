//! Shared application state for request handlers.

use std::sync::Arc;
use std::time::Instant;

use sqlx::PgPool;

use crate::cola::ColaRegistry;
use crate::config::AppConfig;

/// Shared application state, cloneable across handlers via Arc-wrapped fields.
///
/// Contains the application configuration, the database pool (itself a
/// cheap handle), the cola registry, and the process start time used for
/// uptime reporting.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub db: PgPool,
    pub colas: Arc<ColaRegistry>,
    started_at: Instant,
}

impl AppState {
    /// Creates a new application state from the given configuration and pool.
    pub fn new(config: AppConfig, db: PgPool) -> Self {
        Self {
            config: Arc::new(config),
            db,
            colas: Arc::new(ColaRegistry::default()),
            started_at: Instant::now(),
        }
    }

    /// Seconds since this state was created, i.e. process uptime.
    pub fn uptime_secs(&self) -> f64 {
        self.started_at.elapsed().as_secs_f64()
    }
}
