//! Service error types.

use std::time::Duration;

/// Failure of an external service call.
///
/// Callers treat every variant the same way for store safety: the outcome
/// never reaches the reconciler, so the section store stays untouched.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Network or protocol failure below the payload level.
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// The call did not complete within the configured bound.
    #[error("service call timed out after {0:?}")]
    Timeout(Duration),

    /// The service answered with an explicit failure payload.
    #[error("service reported failure: {0}")]
    Remote(String),

    /// The service answered success but the payload was unusable.
    #[error("malformed service response: {0}")]
    Decode(String),

    /// The configured base url could not be parsed or joined.
    #[error("invalid service url: {0}")]
    Url(#[from] url::ParseError),
}
