//! Bounded dependency checks for health reporting.
//!
//! A check races a caller-supplied probe against a hard deadline and always
//! resolves to structured outcome data: probe failures and timeouts are
//! captured into the returned [`CheckOutcome`], never propagated to the
//! caller.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;

/// Default deadline for a dependency probe.
pub const DEFAULT_CHECK_TIMEOUT: Duration = Duration::from_millis(3000);

/// Timeout message for the database probe.
pub const DATABASE_TIMEOUT_ERROR: &str = "Database timeout";

/// Fallback when a probe error renders as an empty message.
const UNKNOWN_ERROR: &str = "Unknown error";

/// Classification of a resolved check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    /// The probe resolved successfully before the deadline.
    Healthy,
    /// The probe failed, or the deadline elapsed first.
    Unhealthy,
}

/// Result of one bounded check. Constructed fresh per invocation and
/// immutable once returned.
///
/// `error` is `Some` exactly when `status` is [`CheckStatus::Unhealthy`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    pub status: CheckStatus,
    /// Wall-clock milliseconds from check start to resolution, measured once
    /// at the moment the race settled.
    pub latency_ms: u64,
    pub error: Option<String>,
}

impl CheckOutcome {
    pub fn is_healthy(&self) -> bool {
        self.status == CheckStatus::Healthy
    }

    fn healthy(latency_ms: u64) -> Self {
        Self {
            status: CheckStatus::Healthy,
            latency_ms,
            error: None,
        }
    }

    fn unhealthy(latency_ms: u64, error: String) -> Self {
        Self {
            status: CheckStatus::Unhealthy,
            latency_ms,
            error: Some(error),
        }
    }
}

/// Run `probe` under a hard deadline and classify the result.
///
/// Whichever of {probe, deadline} settles first determines the outcome; the
/// loser is dropped, which cancels it, so no timer remains scheduled after
/// this returns on any path. A failing probe surfaces its own message
/// (falling back to "Unknown error" when it renders empty); an elapsed
/// deadline surfaces `timeout_error`.
///
/// The check holds no state across calls; concurrent invocations are
/// independent.
pub async fn run_bounded_check<F, E>(probe: F, deadline: Duration, timeout_error: &str) -> CheckOutcome
where
    F: Future<Output = Result<(), E>>,
    E: fmt::Display,
{
    let start = Instant::now();
    let raced = tokio::time::timeout(deadline, probe).await;
    let latency_ms = start.elapsed().as_millis() as u64;

    match raced {
        Ok(Ok(())) => CheckOutcome::healthy(latency_ms),
        Ok(Err(err)) => {
            let mut message = err.to_string();
            if message.is_empty() {
                message = UNKNOWN_ERROR.to_string();
            }
            CheckOutcome::unhealthy(latency_ms, message)
        }
        Err(_elapsed) => CheckOutcome::unhealthy(latency_ms, timeout_error.to_string()),
    }
}
