//! Response parsing
//!
//! The model returns prose-wrapped, markdown-fenced, or bare JSON — or
//! garbage. Parsing is total: malformed content never raises, it yields an
//! explicit `Degraded` variant carrying the full original text.

use crate::analyzer::{ModelAnalysis, NewsMetadata};

/// Parse-failure tag attached to degraded results.
pub const PARSE_FAILURE: &str = "Failed to parse structured response";

/// Sentinel description for degraded results.
pub const UNKNOWN_DESCRIPTION: &str = "Unknown";

/// Outcome of parsing one clip-analysis response.
#[derive(Debug, Clone)]
pub enum ParsedResponse {
    Structured(ModelAnalysis),
    Degraded { raw: String, reason: String },
}

/// Outcome of parsing one metadata-synthesis response.
#[derive(Debug, Clone)]
pub enum ParsedMetadata {
    Structured(NewsMetadata),
    Degraded { raw: String, reason: String },
}

/// Extract the candidate JSON payload from a raw response.
///
/// Priority:
/// 1. ```json ... ``` fenced block
/// 2. first generic ``` ... ``` fenced block
/// 3. the full trimmed text
pub fn extract_candidate(response: &str) -> &str {
    if let Some(marker) = response.find("```json") {
        let start = marker + "```json".len();
        if let Some(end) = response[start..].find("```") {
            return response[start..start + end].trim();
        }
    }

    if let Some(marker) = response.find("```") {
        let start = marker + 3;
        if let Some(end) = response[start..].find("```") {
            return response[start..start + end].trim();
        }
    }

    response.trim()
}

/// Parse a clip-analysis response. Total: decode failure yields `Degraded`.
///
/// On success the result is normalized: an absent `clip_id` is filled from
/// the request, and absent shot numbers / flags decode to their defaults.
pub fn parse_response(response: &str, clip_id: &str) -> ParsedResponse {
    let candidate = extract_candidate(response);

    match serde_json::from_str::<ModelAnalysis>(candidate) {
        Ok(mut analysis) => {
            if analysis.clip_id.is_empty() {
                analysis.clip_id = clip_id.to_string();
            }
            ParsedResponse::Structured(analysis)
        }
        Err(err) => {
            tracing::warn!(clip_id, %err, "response not decodable, degrading");
            ParsedResponse::Degraded {
                raw: response.to_string(),
                reason: err.to_string(),
            }
        }
    }
}

/// Parse a metadata-synthesis response. Same fence handling and the same
/// degraded fallback as `parse_response`.
pub fn parse_metadata_response(response: &str) -> ParsedMetadata {
    let candidate = extract_candidate(response);

    match serde_json::from_str::<NewsMetadata>(candidate) {
        Ok(metadata) => ParsedMetadata::Structured(metadata),
        Err(err) => {
            tracing::warn!(%err, "metadata response not decodable, degrading");
            ParsedMetadata::Degraded {
                raw: response.to_string(),
                reason: err.to_string(),
            }
        }
    }
}
