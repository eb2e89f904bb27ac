//! Greeting endpoint.

/// Greeting handler.
///
/// Returns the canonical greeting; useful as a smoke test that routing and
/// middleware are wired up.
pub async fn hello() -> &'static str {
    "Hello World!"
}
