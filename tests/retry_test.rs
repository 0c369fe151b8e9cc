//! Retry policy tests
//!
//! Paused tokio time makes the backoff schedule observable: waits of
//! 2s and 4s between the three attempts, fatal errors short-circuiting,
//! and cancellation aborting mid-wait.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use newsclip_ai::analyzer::{AnalysisInvoker, AnalysisService};
use newsclip_ai::request::{build_analysis, AnalysisRequest};
use newsclip_ai::{Credentials, EnhancerConfig, EnhancerError, ServiceError, ShotList};

/// Service returning a scripted sequence of outcomes, one per call.
struct ScriptedService {
    responses: Mutex<VecDeque<Result<String, ServiceError>>>,
    calls: AtomicU32,
}

impl ScriptedService {
    fn new(responses: Vec<Result<String, ServiceError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: AtomicU32::new(0),
        }
    }

    fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

impl AnalysisService for ScriptedService {
    async fn generate(
        &self,
        _request: &AnalysisRequest,
        _credentials: &Credentials,
    ) -> Result<String, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("no scripted response left")
    }
}

fn test_request(config: &EnhancerConfig) -> AnalysisRequest {
    build_analysis(
        &ShotList::default(),
        "clip-1",
        "clip.mp4",
        vec![0u8; 64],
        "",
        config,
    )
    .unwrap()
}

fn test_credentials() -> Credentials {
    Credentials {
        token: "tok".into(),
        project_id: "proj".into(),
        region: "us-central1".into(),
    }
}

fn connection_reset() -> ServiceError {
    ServiceError::Connection("connection reset by peer".into())
}

#[tokio::test(start_paused = true)]
async fn two_transient_failures_then_success() {
    let config = EnhancerConfig::default();
    let service = ScriptedService::new(vec![
        Err(connection_reset()),
        Err(ServiceError::Io("broken pipe".into())),
        Ok("analysis text".into()),
    ]);

    let start = tokio::time::Instant::now();
    let result = AnalysisInvoker::new(&config)
        .invoke(
            &service,
            &test_request(&config),
            &test_credentials(),
            &CancellationToken::new(),
        )
        .await;

    assert_eq!(result.unwrap(), "analysis text");
    assert_eq!(service.calls(), 3);
    // Linear backoff: 2s after attempt 1, 4s after attempt 2
    assert_eq!(start.elapsed(), Duration::from_secs(6));
}

#[tokio::test(start_paused = true)]
async fn three_transient_failures_exhaust_retries() {
    let config = EnhancerConfig::default();
    let service = ScriptedService::new(vec![
        Err(connection_reset()),
        Err(connection_reset()),
        Err(connection_reset()),
    ]);

    let start = tokio::time::Instant::now();
    let err = AnalysisInvoker::new(&config)
        .invoke(
            &service,
            &test_request(&config),
            &test_credentials(),
            &CancellationToken::new(),
        )
        .await
        .unwrap_err();

    match err {
        EnhancerError::AnalysisUnavailable { attempts, source } => {
            assert_eq!(attempts, 3);
            assert!(source.is_transient());
        }
        other => panic!("expected AnalysisUnavailable, got {:?}", other),
    }
    // Exactly 3 attempts, no fourth, total wait 2s + 4s
    assert_eq!(service.calls(), 3);
    assert_eq!(start.elapsed(), Duration::from_secs(6));
}

#[tokio::test(start_paused = true)]
async fn auth_failure_is_not_retried() {
    let config = EnhancerConfig::default();
    let service = ScriptedService::new(vec![Err(ServiceError::Auth("expired token".into()))]);

    let start = tokio::time::Instant::now();
    let err = AnalysisInvoker::new(&config)
        .invoke(
            &service,
            &test_request(&config),
            &test_credentials(),
            &CancellationToken::new(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, EnhancerError::Authentication(_)));
    assert_eq!(service.calls(), 1);
    assert_eq!(start.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn rate_limit_is_not_retried() {
    let config = EnhancerConfig::default();
    let service = ScriptedService::new(vec![Err(ServiceError::RateLimit("quota".into()))]);

    let err = AnalysisInvoker::new(&config)
        .invoke(
            &service,
            &test_request(&config),
            &test_credentials(),
            &CancellationToken::new(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, EnhancerError::RateLimit(_)));
    assert_eq!(service.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn timeout_counts_as_transient() {
    let mut config = EnhancerConfig::default();
    config.request_timeout = Duration::from_secs(10);
    config.max_attempts = 2;

    /// Never completes; forces the per-attempt timeout.
    struct HangingService {
        calls: AtomicU32,
    }

    impl AnalysisService for HangingService {
        async fn generate(
            &self,
            _request: &AnalysisRequest,
            _credentials: &Credentials,
        ) -> Result<String, ServiceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            std::future::pending().await
        }
    }

    let service = HangingService {
        calls: AtomicU32::new(0),
    };
    let err = AnalysisInvoker::new(&config)
        .invoke(
            &service,
            &test_request(&config),
            &test_credentials(),
            &CancellationToken::new(),
        )
        .await
        .unwrap_err();

    match err {
        EnhancerError::AnalysisUnavailable { attempts, source } => {
            assert_eq!(attempts, 2);
            assert!(matches!(source, ServiceError::Timeout(_)));
        }
        other => panic!("expected AnalysisUnavailable, got {:?}", other),
    }
    assert_eq!(service.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn pre_cancelled_token_issues_no_call() {
    let config = EnhancerConfig::default();
    let service = ScriptedService::new(vec![Ok("never used".into())]);
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = AnalysisInvoker::new(&config)
        .invoke(&service, &test_request(&config), &test_credentials(), &cancel)
        .await
        .unwrap_err();

    assert!(matches!(err, EnhancerError::Cancelled));
    assert_eq!(service.calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn cancellation_aborts_retry_wait() {
    let config = EnhancerConfig::default();
    // One transient failure puts the invoker into its 2s wait; cancel at 1s
    let service = ScriptedService::new(vec![Err(connection_reset()), Ok("never reached".into())]);
    let cancel = CancellationToken::new();

    let canceller = {
        let cancel = cancel.clone();
        async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            cancel.cancel();
        }
    };

    let invoker = AnalysisInvoker::new(&config);
    let request = test_request(&config);
    let credentials = test_credentials();
    let (result, _) = tokio::join!(
        invoker.invoke(&service, &request, &credentials, &cancel),
        canceller
    );

    assert!(matches!(result.unwrap_err(), EnhancerError::Cancelled));
    // The wait was aborted before a second network call
    assert_eq!(service.calls(), 1);
}
