//! Health document endpoint backed by a bounded database ping.

use axum::extract::State;
use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::db;
use crate::health::{run_bounded_check, CheckOutcome, CheckStatus, DATABASE_TIMEOUT_ERROR};
use crate::state::AppState;

/// Health document returned by `GET /health`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    status: &'static str,
    timestamp: String,
    uptime: f64,
    version: String,
    git_commit: String,
    components: Components,
}

#[derive(Debug, Serialize)]
struct Components {
    database: ComponentHealth,
}

/// Per-component section of the health document.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentHealth {
    status: ComponentStatus,
    response_time_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
enum ComponentStatus {
    Ok,
    Down,
}

impl From<CheckOutcome> for ComponentHealth {
    fn from(outcome: CheckOutcome) -> Self {
        Self {
            status: match outcome.status {
                CheckStatus::Healthy => ComponentStatus::Ok,
                CheckStatus::Unhealthy => ComponentStatus::Down,
            },
            response_time_ms: outcome.latency_ms,
            error: outcome.error,
        }
    }
}

/// Health report handler.
///
/// Always responds 200: liveness is the status line, readiness is the body,
/// so a poller can tell "process answers but database is down" apart from
/// "process is gone".
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let outcome = run_bounded_check(
        db::ping(&state.db),
        state.config.database.health_timeout(),
        DATABASE_TIMEOUT_ERROR,
    )
    .await;

    Json(HealthResponse {
        status: "ok",
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        uptime: state.uptime_secs(),
        version: state.config.version.clone(),
        git_commit: state.config.git_commit.clone(),
        components: Components {
            database: outcome.into(),
        },
    })
}
