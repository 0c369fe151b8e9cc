//! Request assembly
//!
//! Builds the multimodal payload (prompt + video bytes + generation
//! parameters) and performs input validation. MIME resolution never fails;
//! unknown extensions fall back to video/mp4.

use crate::analyzer::MetadataInput;
use crate::config::EnhancerConfig;
use crate::error::{EnhancerError, Result};
use crate::prompts;
use crate::shotlist::ShotList;

/// One multimodal request to the analysis service.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub clip_id: String,
    pub prompt: String,
    pub video: Vec<u8>,
    pub mime_type: &'static str,
    pub generation: crate::config::GenerationConfig,
    /// Set when the payload exceeds the soft size threshold. Advisory only;
    /// the upstream hard limit (~20 MB) will reject oversized payloads.
    pub size_warning: bool,
}

/// MIME type from the file extension, defaulting to video/mp4.
pub fn mime_for_extension(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "mp4" => "video/mp4",
        "avi" => "video/x-msvideo",
        "mov" => "video/quicktime",
        "mkv" => "video/x-matroska",
        _ => "video/mp4",
    }
}

/// Build a clip-analysis request with the shot list embedded in the prompt.
///
/// # Arguments
/// * `shot_list` - Operator shot list (matching reference)
/// * `clip_id` - Caller-assigned identifier, must be non-blank
/// * `file_name` - Original file name, used only for MIME resolution
/// * `video` - Raw video bytes, must be non-empty
/// * `context` - Free-text journalist context
pub fn build_analysis(
    shot_list: &ShotList,
    clip_id: &str,
    file_name: &str,
    video: Vec<u8>,
    context: &str,
    config: &EnhancerConfig,
) -> Result<AnalysisRequest> {
    let prompt = prompts::build_analysis_prompt(shot_list, clip_id, context);
    build(clip_id, file_name, video, prompt, config)
}

/// Build a metadata-synthesis request from journalist-supplied facts.
pub fn build_metadata(
    input: &MetadataInput,
    clip_id: &str,
    file_name: &str,
    video: Vec<u8>,
    config: &EnhancerConfig,
) -> Result<AnalysisRequest> {
    let prompt = prompts::build_metadata_prompt(input);
    build(clip_id, file_name, video, prompt, config)
}

fn build(
    clip_id: &str,
    file_name: &str,
    video: Vec<u8>,
    prompt: String,
    config: &EnhancerConfig,
) -> Result<AnalysisRequest> {
    if clip_id.trim().is_empty() {
        return Err(EnhancerError::InvalidInput("clip_id is empty".into()));
    }
    if video.is_empty() {
        return Err(EnhancerError::InvalidInput(format!(
            "video bytes are empty for clip {}",
            clip_id
        )));
    }

    let size_warning = video.len() > config.size_warn_bytes;
    if size_warning {
        tracing::warn!(
            clip_id,
            size_mb = video.len() as f64 / 1024.0 / 1024.0,
            "video payload exceeds soft size threshold, upstream may reject it"
        );
    }

    Ok(AnalysisRequest {
        clip_id: clip_id.to_string(),
        prompt,
        mime_type: mime_for_extension(file_name),
        video,
        generation: config.generation,
        size_warning,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_lookup() {
        assert_eq!(mime_for_extension("clip.mp4"), "video/mp4");
        assert_eq!(mime_for_extension("CLIP.MOV"), "video/quicktime");
        assert_eq!(mime_for_extension("a.avi"), "video/x-msvideo");
        assert_eq!(mime_for_extension("b.mkv"), "video/x-matroska");
        // Unknown extension falls back, no failure
        assert_eq!(mime_for_extension("clip.webm"), "video/mp4");
        assert_eq!(mime_for_extension("noextension"), "video/mp4");
    }

    #[test]
    fn test_empty_video_rejected() {
        let err = build_analysis(
            &ShotList::default(),
            "clip-1",
            "clip.mp4",
            Vec::new(),
            "",
            &EnhancerConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, EnhancerError::InvalidInput(_)));
    }

    #[test]
    fn test_blank_clip_id_rejected() {
        let err = build_analysis(
            &ShotList::default(),
            "  ",
            "clip.mp4",
            vec![0u8; 16],
            "",
            &EnhancerConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, EnhancerError::InvalidInput(_)));
    }

    #[test]
    fn test_size_warning_flag() {
        let mut config = EnhancerConfig::default();
        config.size_warn_bytes = 10;

        let small = build_analysis(
            &ShotList::default(),
            "clip-1",
            "clip.mp4",
            vec![0u8; 10],
            "",
            &config,
        )
        .unwrap();
        assert!(!small.size_warning);

        let large = build_analysis(
            &ShotList::default(),
            "clip-1",
            "clip.mp4",
            vec![0u8; 11],
            "",
            &config,
        )
        .unwrap();
        assert!(large.size_warning);
    }
}
