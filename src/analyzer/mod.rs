//! Analysis orchestration
//!
//! `ClipEnhancer` chains the pipeline for one clip:
//! request building -> invocation (with retry) -> parsing -> shot matching.
//! Each call is independent and keyed by clip_id; the enhancer holds no
//! mutable state, so one instance is safe to share across workers.

mod invoker;
mod types;
mod vertex;

pub use invoker::{AnalysisInvoker, AnalysisService};
pub use types::{
    AnalysisResult, MetadataInput, MetadataShot, MetadataShotlist, ModelAnalysis, NewsMetadata,
    Verification,
};
pub use vertex::VertexClient;

use tokio_util::sync::CancellationToken;

use crate::auth::CredentialProvider;
use crate::config::EnhancerConfig;
use crate::error::Result;
use crate::parser::{self, ParsedMetadata, PARSE_FAILURE};
use crate::request;
use crate::shotlist::ShotList;
use crate::{matcher, validator};

pub struct ClipEnhancer<P, S> {
    provider: P,
    service: S,
    config: EnhancerConfig,
}

impl<P, S> ClipEnhancer<P, S>
where
    P: CredentialProvider,
    S: AnalysisService,
{
    pub fn new(provider: P, service: S) -> Self {
        Self::with_config(provider, service, EnhancerConfig::default())
    }

    pub fn with_config(provider: P, service: S, config: EnhancerConfig) -> Self {
        Self {
            provider,
            service,
            config,
        }
    }

    pub fn config(&self) -> &EnhancerConfig {
        &self.config
    }

    /// Analyze one clip against the operator shot list.
    ///
    /// Fatal errors (bad input, exhausted retries, credential failure)
    /// return `Err`; everything a human can recover from (parse
    /// degradation, stale shot references) comes back as data inside the
    /// result.
    pub async fn analyze(
        &self,
        clip_id: &str,
        file_name: &str,
        video: Vec<u8>,
        shot_list: &ShotList,
        context: &str,
    ) -> Result<AnalysisResult> {
        self.analyze_with_cancel(
            clip_id,
            file_name,
            video,
            shot_list,
            context,
            &CancellationToken::new(),
        )
        .await
    }

    /// Like `analyze`, with caller-controlled cancellation. Cancelling
    /// aborts retry waits immediately and issues no further network call.
    pub async fn analyze_with_cancel(
        &self,
        clip_id: &str,
        file_name: &str,
        video: Vec<u8>,
        shot_list: &ShotList,
        context: &str,
        cancel: &CancellationToken,
    ) -> Result<AnalysisResult> {
        let request =
            request::build_analysis(shot_list, clip_id, file_name, video, context, &self.config)?;
        let credentials = self.provider.credentials()?;

        let raw = AnalysisInvoker::new(&self.config)
            .invoke(&self.service, &request, &credentials, cancel)
            .await?;

        let parsed = parser::parse_response(&raw, clip_id);
        let result = matcher::resolve_dateline(parsed, clip_id, shot_list);

        tracing::info!(
            clip_id,
            degraded = result.is_degraded(),
            matched = result.analysis.matched_shot_numbers.len(),
            "clip analysis complete"
        );
        Ok(result)
    }

    /// Synthesize complete wire metadata for one video from the
    /// journalist-supplied facts.
    pub async fn generate_metadata(
        &self,
        clip_id: &str,
        file_name: &str,
        video: Vec<u8>,
        input: &MetadataInput,
    ) -> Result<NewsMetadata> {
        self.generate_metadata_with_cancel(
            clip_id,
            file_name,
            video,
            input,
            &CancellationToken::new(),
        )
        .await
    }

    pub async fn generate_metadata_with_cancel(
        &self,
        clip_id: &str,
        file_name: &str,
        video: Vec<u8>,
        input: &MetadataInput,
        cancel: &CancellationToken,
    ) -> Result<NewsMetadata> {
        let request = request::build_metadata(input, clip_id, file_name, video, &self.config)?;
        let credentials = self.provider.credentials()?;

        let raw = AnalysisInvoker::new(&self.config)
            .invoke(&self.service, &request, &credentials, cancel)
            .await?;

        let mut metadata = match parser::parse_metadata_response(&raw) {
            ParsedMetadata::Structured(metadata) => metadata,
            ParsedMetadata::Degraded { raw, .. } => NewsMetadata {
                error: Some(PARSE_FAILURE.into()),
                raw_response: Some(raw),
                ..Default::default()
            },
        };
        metadata.input = input.clone();

        Ok(metadata)
    }

    /// Validate synthesized metadata. Pure; also callable standalone via
    /// `validator::validate` after human edits.
    pub fn validate(&self, fields: &validator::MetadataFields) -> validator::ValidationReport {
        validator::validate(fields)
    }
}
