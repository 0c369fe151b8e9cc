//! Analysis output types
//!
//! Everything the model returns is loosely structured, so every field has
//! a serde default and decoding tolerates omissions. `AnalysisResult` adds
//! the resolved dateline on top of the raw model output.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Raw structured output of one clip analysis, as decoded from the model
/// response. Absent fields decode to their defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelAnalysis {
    pub clip_id: String,
    /// Shot numbers the clip matches; may reference shots that do not
    /// exist in the operator list (stale references are ignored later)
    pub matched_shot_numbers: BTreeSet<u32>,
    pub is_slate: bool,
    pub is_part_of_various: bool,
    pub original_description: String,
    pub enhanced_description: String,
    pub audio_summary: String,
    pub languages_detected: Vec<String>,
    pub transcription: String,
    pub ambient_sounds: Vec<String>,
    pub primary_subject: String,
    pub key_action: String,
    pub news_category: String,
    pub emotional_tone: String,
    pub visual_quality: String,
    pub confidence_score: f32,
}

/// Final per-clip result: model output plus the resolved dateline.
///
/// Dateline fields are always populated — from the first matched shot, or
/// from the shot list header when no match exists. Created once per
/// invocation and never mutated afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(flatten)]
    pub analysis: ModelAnalysis,

    pub location: String,
    pub date: String,
    pub source: String,
    pub restrictions: String,

    /// Parse-failure tag when the response could not be decoded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Full original response text, kept for manual recovery
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<String>,
}

impl AnalysisResult {
    /// True when the response was not decodable and this result carries
    /// fallback values only.
    pub fn is_degraded(&self) -> bool {
        self.error.is_some()
    }
}

/// Journalist-supplied facts for metadata synthesis.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataInput {
    pub event_context: String,
    pub location: String,
    pub date: String,
    pub source: String,
    pub restrictions: String,
}

impl MetadataInput {
    pub fn new(event_context: &str, location: &str, date: &str, source: &str) -> Self {
        Self {
            event_context: event_context.into(),
            location: location.into(),
            date: date.into(),
            source: source.into(),
            restrictions: "Access all".into(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataShot {
    pub number: u32,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataShotlist {
    pub dateline: String,
    pub shots: Vec<MetadataShot>,
}

impl MetadataShotlist {
    /// Render as wire text: dateline line followed by numbered shots.
    pub fn to_text(&self) -> String {
        let mut lines = Vec::with_capacity(self.shots.len() + 1);
        lines.push(format!("DATELINE: {}", self.dateline));
        for shot in &self.shots {
            lines.push(format!("{}. {}", shot.number, shot.description));
        }
        lines.join("\n")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Verification {
    pub location_method: String,
    pub date_method: String,
    pub confidence: String,
}

/// Complete synthesized wire metadata for one video.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsMetadata {
    pub slug: String,
    pub headline: String,
    pub video_shows: String,
    pub shotlist: MetadataShotlist,
    pub story: String,
    pub verification: Verification,
    pub visual_analysis: String,
    pub audio_analysis: String,
    pub duration_seconds: f32,
    pub quality: String,
    pub confidence_score: f32,

    /// Echo of the journalist-supplied facts, attached after synthesis
    #[serde(skip_deserializing)]
    pub input: MetadataInput,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_analysis_decodes_with_defaults() {
        let json = r#"{"clip_id": "c1", "matched_shot_numbers": [2, 1, 2]}"#;
        let analysis: ModelAnalysis = serde_json::from_str(json).unwrap();
        assert_eq!(analysis.clip_id, "c1");
        // Set semantics: duplicates collapse
        assert_eq!(analysis.matched_shot_numbers.len(), 2);
        assert!(!analysis.is_slate);
        assert!(!analysis.is_part_of_various);
        assert_eq!(analysis.enhanced_description, "");
    }

    #[test]
    fn test_result_serializes_without_empty_error() {
        let result = AnalysisResult {
            location: "GAZA".into(),
            ..Default::default()
        };
        let json = serde_json::to_string(&result).unwrap();
        assert!(!json.contains("\"error\""));
        assert!(!json.contains("raw_response"));
    }

    #[test]
    fn test_shotlist_to_text() {
        let shotlist = MetadataShotlist {
            dateline: "GAZA (OCTOBER 19, 2024) (UGC - Access all)".into(),
            shots: vec![
                MetadataShot {
                    number: 1,
                    description: "SMOKE RISING FROM BUILDINGS".into(),
                },
                MetadataShot {
                    number: 2,
                    description: "DEBRIS ON STREET".into(),
                },
            ],
        };
        let text = shotlist.to_text();
        assert!(text.starts_with("DATELINE: GAZA"));
        assert!(text.contains("1. SMOKE RISING"));
        assert!(text.contains("2. DEBRIS"));
    }
}
