//! Analysis invocation with bounded retry
//!
//! The retry loop is an explicit state machine
//! (`Attempting(n) -> Waiting(n) -> Attempting(n+1) -> ...`) so cancellation
//! and timeout interrupt at defined transition points. Only transient
//! transport failures are retried; auth, quota and malformed-request
//! failures propagate immediately.

use std::future::Future;

use tokio_util::sync::CancellationToken;

use crate::auth::Credentials;
use crate::config::EnhancerConfig;
use crate::error::{EnhancerError, Result, ServiceError};
use crate::request::AnalysisRequest;

/// External multimodal analysis service.
///
/// Implementations receive the request plus a per-call credential snapshot
/// and return the raw textual response. They must not retry internally;
/// retry policy lives in `AnalysisInvoker`.
pub trait AnalysisService: Send + Sync {
    fn generate(
        &self,
        request: &AnalysisRequest,
        credentials: &Credentials,
    ) -> impl Future<Output = std::result::Result<String, ServiceError>> + Send;
}

enum RetryState {
    Attempting(u32),
    Waiting(u32),
}

/// Runs one request against the service under the configured retry policy.
pub struct AnalysisInvoker<'a> {
    config: &'a EnhancerConfig,
}

impl<'a> AnalysisInvoker<'a> {
    pub fn new(config: &'a EnhancerConfig) -> Self {
        Self { config }
    }

    /// Invoke the service, retrying transient failures up to
    /// `max_attempts` total attempts with linear backoff
    /// (`retry_delay * attempt` between attempts). Each attempt is bounded
    /// by `request_timeout`; a timeout counts as transient. Cancellation
    /// aborts pending waits immediately and never issues another call.
    pub async fn invoke<S: AnalysisService>(
        &self,
        service: &S,
        request: &AnalysisRequest,
        credentials: &Credentials,
        cancel: &CancellationToken,
    ) -> Result<String> {
        let max_attempts = self.config.max_attempts;
        let mut state = RetryState::Attempting(1);

        loop {
            match state {
                RetryState::Attempting(attempt) => {
                    if cancel.is_cancelled() {
                        return Err(EnhancerError::Cancelled);
                    }

                    tracing::info!(
                        clip_id = %request.clip_id,
                        attempt,
                        max_attempts,
                        "sending analysis request"
                    );

                    let call = tokio::time::timeout(
                        self.config.request_timeout,
                        service.generate(request, credentials),
                    );
                    let outcome = tokio::select! {
                        _ = cancel.cancelled() => return Err(EnhancerError::Cancelled),
                        outcome = call => outcome,
                    };

                    let error = match outcome {
                        Ok(Ok(text)) => return Ok(text),
                        Ok(Err(err)) if err.is_transient() => err,
                        Ok(Err(err)) => return Err(err.into()),
                        Err(_) => ServiceError::Timeout(self.config.request_timeout),
                    };

                    tracing::warn!(
                        clip_id = %request.clip_id,
                        attempt,
                        %error,
                        "transient failure"
                    );

                    if attempt >= max_attempts {
                        return Err(EnhancerError::AnalysisUnavailable {
                            attempts: attempt,
                            source: error,
                        });
                    }
                    state = RetryState::Waiting(attempt);
                }
                RetryState::Waiting(attempt) => {
                    let delay = self.config.retry_delay * attempt;
                    tracing::info!(
                        clip_id = %request.clip_id,
                        delay_secs = delay.as_secs(),
                        "waiting before retry"
                    );
                    tokio::select! {
                        _ = cancel.cancelled() => return Err(EnhancerError::Cancelled),
                        _ = tokio::time::sleep(delay) => {}
                    }
                    state = RetryState::Attempting(attempt + 1);
                }
            }
        }
    }
}
