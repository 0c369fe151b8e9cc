//! Shot matching and dateline resolution
//!
//! Reconciles the parsed model output against the authoritative shot list.
//! The model proposes shot numbers; the operator data decides the dateline.
//! Every result leaves here with non-empty dateline fields (given a
//! populated header), whether or not parsing succeeded.

use crate::analyzer::{AnalysisResult, ModelAnalysis};
use crate::parser::{ParsedResponse, PARSE_FAILURE, UNKNOWN_DESCRIPTION};
use crate::shotlist::ShotList;

/// Build the final result from a (possibly degraded) parse outcome.
///
/// Dateline resolution: the first shot in list order whose number appears
/// in `matched_shot_numbers` supplies location/date/source/restrictions.
/// Stale references and empty sets fall back to the header. Degraded
/// parses keep the raw text and a parse-failure tag alongside the header
/// dateline.
pub fn resolve_dateline(
    parsed: ParsedResponse,
    clip_id: &str,
    shot_list: &ShotList,
) -> AnalysisResult {
    match parsed {
        ParsedResponse::Structured(analysis) => {
            let mut result = AnalysisResult {
                analysis,
                ..Default::default()
            };

            match shot_list.find_first_match(&result.analysis.matched_shot_numbers) {
                Some(shot) => {
                    result.location = shot.location.clone();
                    result.date = shot.date.clone();
                    result.source = shot.source.clone();
                    result.restrictions = shot.restrictions.clone();
                }
                None => apply_header(&mut result, shot_list),
            }

            result
        }
        ParsedResponse::Degraded { raw, reason } => {
            tracing::warn!(clip_id, %reason, "building degraded result from header");
            let mut result = AnalysisResult {
                analysis: ModelAnalysis {
                    clip_id: clip_id.to_string(),
                    enhanced_description: UNKNOWN_DESCRIPTION.into(),
                    ..Default::default()
                },
                error: Some(PARSE_FAILURE.into()),
                raw_response: Some(raw),
                ..Default::default()
            };
            apply_header(&mut result, shot_list);
            result
        }
    }
}

fn apply_header(result: &mut AnalysisResult, shot_list: &ShotList) {
    result.location = shot_list.header.location.clone();
    result.date = shot_list.header.date.clone();
    result.source = shot_list.header.source.clone();
    result.restrictions = shot_list.header.restrictions.clone();
}
