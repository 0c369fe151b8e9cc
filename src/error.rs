//! Error types
//!
//! Two layers:
//! - `ServiceError`: transport-level failures from the analysis service,
//!   classified as transient (retryable) or fatal
//! - `EnhancerError`: everything the crate surfaces to callers

use std::time::Duration;
use thiserror::Error;

/// Failure reported by the external analysis service or its transport.
///
/// Only transient variants are eligible for retry; everything else
/// propagates immediately so the caller can react (refresh credentials,
/// fix the request, back off on quota).
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("connection failed: {0}")]
    Connection(String),

    #[error("I/O failure during transmission: {0}")]
    Io(String),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("authentication rejected: {0}")]
    Auth(String),

    #[error("workspace does not have access: {0}")]
    Workspace(String),

    #[error("rate limit exceeded: {0}")]
    RateLimit(String),

    #[error("request rejected by service: {0}")]
    BadRequest(String),
}

impl ServiceError {
    /// Transient transport failures: interrupted connection, OS-level I/O
    /// failure, or a per-attempt timeout. Auth, quota and malformed-request
    /// failures are never transient.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ServiceError::Connection(_) | ServiceError::Io(_) | ServiceError::Timeout(_)
        )
    }
}

#[derive(Error, Debug)]
pub enum EnhancerError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("authentication failed: {0}")]
    Authentication(String),

    #[error("workspace error: {0}")]
    Workspace(String),

    #[error("rate limit exceeded: {0}")]
    RateLimit(String),

    #[error("analysis request rejected: {0}")]
    Api(String),

    #[error("analysis unavailable after {attempts} attempts: {source}")]
    AnalysisUnavailable {
        attempts: u32,
        #[source]
        source: ServiceError,
    },

    #[error("analysis cancelled")]
    Cancelled,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ServiceError> for EnhancerError {
    /// Maps a fatal service failure to its caller-facing kind. Transient
    /// failures go through the retry loop and arrive as
    /// `AnalysisUnavailable` instead.
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Auth(msg) => EnhancerError::Authentication(msg),
            ServiceError::Workspace(msg) => EnhancerError::Workspace(msg),
            ServiceError::RateLimit(msg) => EnhancerError::RateLimit(msg),
            ServiceError::BadRequest(msg) => EnhancerError::Api(msg),
            other => EnhancerError::AnalysisUnavailable {
                attempts: 1,
                source: other,
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, EnhancerError>;
