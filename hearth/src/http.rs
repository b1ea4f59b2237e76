//! Shared HTTP client construction for upstream calls.

use std::time::Duration;

/// Upstream request timeout. Cache waiters are bounded by the same figure,
/// since they wait at most one in-flight fetch.
pub const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(30);

/// A `reqwest::Client` with the upstream timeout applied. Building one only
/// fails on a broken TLS backend; in that case fall back to library defaults.
pub(crate) fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(UPSTREAM_TIMEOUT)
        .build()
        .unwrap_or_else(|e| {
            tracing::warn!("http client build failed ({e}), using library defaults");
            reqwest::Client::new()
        })
}
