//! UGC video analysis and news metadata synthesis
//!
//! Turns one uploaded video plus journalist-supplied context into
//! structured, style-compliant publication metadata by calling a
//! multimodal model on Vertex AI and reconciling its output against the
//! operator shot list.
//!
//! Pipeline per clip:
//! 1. request assembly ([`request`])
//! 2. invocation with bounded retry ([`analyzer::AnalysisInvoker`])
//! 3. tolerant response parsing ([`parser`])
//! 4. dateline resolution against the shot list ([`matcher`])
//! 5. rule-based quality validation ([`validator`])
//!
//! Credential lifecycle, upload/storage, slate generation and export all
//! live in collaborators; this crate takes a credential snapshot per call
//! and returns plain data.

pub mod analyzer;
pub mod auth;
pub mod config;
pub mod error;
pub mod matcher;
pub mod parser;
pub mod prompts;
pub mod request;
pub mod shotlist;
pub mod validator;

pub use analyzer::{
    AnalysisResult, AnalysisService, ClipEnhancer, MetadataInput, ModelAnalysis, NewsMetadata,
    VertexClient,
};
pub use auth::{CredentialProvider, Credentials, StaticCredentials};
pub use config::{EnhancerConfig, GenerationConfig};
pub use error::{EnhancerError, Result, ServiceError};
pub use parser::{parse_metadata_response, parse_response, ParsedMetadata, ParsedResponse};
pub use shotlist::{Shot, ShotList, ShotListHeader};
pub use validator::{validate, MetadataFields, ValidationReport, REVIEW_THRESHOLD};
