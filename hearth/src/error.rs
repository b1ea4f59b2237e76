//! Error taxonomy for upstream fetches.

use reqwest::StatusCode;
use thiserror::Error;

/// An upstream fetch failed. The cause stays attached (`source()` chains
/// through); handlers surface it to the caller, nothing retries beyond the
/// cache's retry-on-next-call policy.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure: connect, timeout, or body read.
    #[error("http request: {0}")]
    Transport(#[from] reqwest::Error),

    /// The upstream answered outside 200..=399.
    #[error("unexpected status code: {status}")]
    Status { status: StatusCode },

    /// The payload did not match the expected shape.
    #[error("decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    /// Maps a response to [`FetchError::Status`] unless the code is in the
    /// accepted 200..=399 range.
    pub(crate) fn check_status(status: StatusCode) -> Result<(), FetchError> {
        if status.as_u16() >= 200 && status.as_u16() <= 399 {
            Ok(())
        } else {
            Err(FetchError::Status { status })
        }
    }
}
