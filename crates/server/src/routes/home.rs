//! Liveness endpoints.

/// Root liveness text.
pub async fn index() -> &'static str {
    "Hello from the Feedback Server! The server is alive."
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check Slack.
pub async fn health() -> &'static str {
    "ok"
}
