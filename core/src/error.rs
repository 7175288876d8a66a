//! Error types for the permafrust API client.
//!
//! # Design
//! The dispatcher never classifies or retries failures. Whatever the
//! transport reports is carried in `Transport` untouched, so callers can
//! downcast to the concrete error their transport produced. A response that
//! arrived but is unusable lands in `Status` or `Deserialization`.

use thiserror::Error;

/// Boxed error produced by a `Transport` implementation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors returned by `ApiClient::dispatch` and the verb wrappers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (connection refused, DNS, IO).
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// A 2xx body could not be decoded as JSON.
    #[error("deserialization failed: {0}")]
    Deserialization(#[from] serde_json::Error),
}

impl ApiError {
    /// Wrap any transport-level failure.
    pub fn transport<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        ApiError::Transport(Box::new(err))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::transport(err)
    }
}
