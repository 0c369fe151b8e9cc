//! Prompt construction
//!
//! Two prompt families, both demanding a bare JSON object back:
//! - `build_analysis_prompt`: per-clip analysis with shot matching against
//!   the operator shot list
//! - `build_metadata_prompt`: full news-wire metadata synthesis (slug,
//!   headline, shotlist, story, verification)

use crate::analyzer::MetadataInput;
use crate::shotlist::ShotList;

/// System instruction fixed for every analysis call.
pub const SYSTEM_INSTRUCTION: &str = "\
You are an expert video analyst specializing in news and documentary footage analysis.

Your task is to analyze video clips and provide detailed, structured metadata in JSON format.

For each video clip, you should:
1. Provide an enhanced natural language description of what you see
2. Classify the shot type, size, and camera movement
3. Describe the composition and lighting
4. Identify primary subjects and actions
5. Assess visual quality
6. Determine the tone and news context

Be precise, objective, and thorough in your analysis. Focus on visual elements that would be important for video editing and news production.";

/// Clip analysis prompt with the full shot list as matching reference.
///
/// # Arguments
/// * `shot_list` - Operator shot list, serialized into the prompt verbatim
/// * `clip_id` - Caller-assigned clip identifier
/// * `context` - Free-text context from the journalist, may be empty
pub fn build_analysis_prompt(shot_list: &ShotList, clip_id: &str, context: &str) -> String {
    let shotlist_json =
        serde_json::to_string_pretty(shot_list).unwrap_or_else(|_| "{}".to_string());
    let context = if context.trim().is_empty() {
        "No additional context provided"
    } else {
        context
    };

    format!(
        r#"Analyze this video clip and provide detailed metadata.

CLIP ID: {clip_id}

CONTEXT: {context}

SHOTLIST REFERENCE:
{shotlist_json}

YOUR TASK:
Analyze the video and provide:

1. VISUAL ANALYSIS:
   - Detailed description of what you see
   - Shot-by-shot breakdown if multiple scenes
   - Key visual elements (people, objects, locations)
   - Any visible text or signs
   - Lighting and composition notes

2. AUDIO ANALYSIS:
   - Languages spoken (if any)
   - Transcription of speech (with timestamps if possible)
   - Ambient sounds (gunfire, explosions, sirens, crowd noise, etc.)
   - Audio quality notes

3. SHOT MATCHING:
   - Which shot number(s) from the shotlist does this clip match?
   - Is this a slate/title card? (true/false)
   - Is this part of a "VARIOUS" shot? (true/false)

4. METADATA:
   - Primary subject/action
   - News category (conflict, protest, disaster, etc.)
   - Emotional tone
   - Visual quality assessment

Return your analysis as a JSON object with this structure:
{{
  "clip_id": "{clip_id}",
  "matched_shot_numbers": [1, 2],
  "is_slate": false,
  "is_part_of_various": false,
  "original_description": "Brief description",
  "enhanced_description": "Detailed description of visual content",
  "audio_summary": "Description of audio elements",
  "languages_detected": ["English"],
  "transcription": "Transcribed speech if any",
  "ambient_sounds": ["gunfire", "sirens"],
  "primary_subject": "Main subject",
  "key_action": "Main action",
  "news_category": "conflict/protest/disaster/etc",
  "emotional_tone": "urgent/calm/tense/etc",
  "visual_quality": "HD/SD/poor/excellent",
  "confidence_score": 0.85
}}

Provide ONLY the JSON object, no additional text."#
    )
}

/// Metadata synthesis prompt, built from the journalist-supplied dateline
/// facts. The style rules here are the same ones the quality validator
/// checks after the fact.
pub fn build_metadata_prompt(input: &MetadataInput) -> String {
    let MetadataInput {
        event_context,
        location,
        date,
        source,
        restrictions,
    } = input;

    format!(
        r#"Analyze this UGC video and generate complete news-wire metadata.

EVENT CONTEXT: {event_context}

LOCATION: {location}
DATE: {date}
SOURCE: {source}
RESTRICTIONS: {restrictions}

YOUR TASK:
Generate complete wire-compliant metadata following these strict guidelines:

1. SLUG:
   - Format: CATEGORY-SUBCATEGORY/SPECIFIC-DETAIL
   - All caps, use hyphens, max 40 characters
   - Examples: "ISRAEL-PALESTINIANS/GAZA-STRIKE-UGC", "KENYA-ODINGA/TEARGAS-UGC"
   - Add UGC suffix if user-generated content

2. HEADLINE:
   - 6-8 words exactly
   - Present tense, active voice
   - Start with "Eyewitness video shows" or "Social media video shows"
   - Include location
   - Clear and punchy

3. VIDEO SHOWS (all caps):
   - Use -ing verb forms: RISING, SHOWING, FIRING, WALKING
   - Separate sequences with semicolons or slashes
   - Max 2 lines

4. SHOTLIST:
   - Start with DATELINE: LOCATION (DATE) (SOURCE - Restrictions)
   - Number each shot (1., 2., 3., etc.)
   - Use -ing verbs for descriptions
   - Describe action, NOT camera movements
   - DO NOT use: CUTAWAY, WIDE, PAN, TILT, VIEW OF
   - Use "/" for shot changes within same sequence
   - Use "," for multiple elements in one shot

5. STORY:
   - 3-4 paragraphs
   - Paragraph 1: Lead - What happened, where, when (most important first)
   - Paragraph 2: Context - Why it matters, background
   - Paragraph 3: Details - Description matching video content
   - Paragraph 4: Verification - How the location/date were verified
   - Simple past tense: "said," "fired," "killed"
   - Include date with day name if known
   - British English spelling
   - Factual and impartial
   - Must include verification statement

6. VERIFICATION:
   - How location was verified (buildings, landmarks, satellite imagery, etc.)
   - How date was verified (file metadata, corroborating reports, etc.)

Return your analysis as a JSON object with this structure:
{{
  "slug": "ISRAEL-PALESTINIANS/GAZA-STRIKE-UGC",
  "headline": "Eyewitness video shows smoke rising after Gaza airstrike",
  "video_shows": "SMOKE RISING FROM DESTROYED BUILDINGS / DEBRIS ON GROUND",
  "shotlist": {{
    "dateline": "GAZA (OCTOBER 19, 2024) (VIDEO OBTAINED BY REUTERS - Access all)",
    "shots": [
      {{"number": 1, "description": "SMOKE RISING FROM DESTROYED BUILDINGS"}},
      {{"number": 2, "description": "DEBRIS SCATTERED ON STREET / DAMAGED VEHICLES"}}
    ]
  }},
  "story": "First paragraph...\n\nSecond paragraph...\n\nVerification paragraph...",
  "verification": {{
    "location_method": "Building structures and street layout matched satellite imagery",
    "date_method": "Original file metadata",
    "confidence": "high"
  }},
  "visual_analysis": "Detailed description of what you see in the video",
  "audio_analysis": "Description of any sounds, speech, or ambient audio",
  "duration_seconds": 50,
  "quality": "HD/SD",
  "confidence_score": 0.85
}}

IMPORTANT: Use present tense for headlines, past tense for stories. Use -ing verbs in the shotlist. Be factual and impartial.

Provide ONLY the JSON object, no additional text."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shotlist::{Shot, ShotListHeader};

    #[test]
    fn test_analysis_prompt_embeds_shotlist_and_clip_id() {
        let shot_list = ShotList {
            header: ShotListHeader {
                location: "NAIROBI, KENYA".into(),
                ..Default::default()
            },
            shots: vec![Shot {
                number: 1,
                description: "CROWD MARCHING".into(),
                ..Default::default()
            }],
        };
        let prompt = build_analysis_prompt(&shot_list, "clip-007", "protest footage");
        assert!(prompt.contains("CLIP ID: clip-007"));
        assert!(prompt.contains("NAIROBI, KENYA"));
        assert!(prompt.contains("CROWD MARCHING"));
        assert!(prompt.contains("protest footage"));
    }

    #[test]
    fn test_analysis_prompt_empty_context_placeholder() {
        let prompt = build_analysis_prompt(&ShotList::default(), "clip-1", "  ");
        assert!(prompt.contains("No additional context provided"));
    }

    #[test]
    fn test_metadata_prompt_embeds_dateline_facts() {
        let input = MetadataInput {
            event_context: "Smoke rising after strike".into(),
            location: "Gaza".into(),
            date: "October 19, 2024".into(),
            source: "Video obtained by Reuters".into(),
            restrictions: "Access all".into(),
        };
        let prompt = build_metadata_prompt(&input);
        assert!(prompt.contains("LOCATION: Gaza"));
        assert!(prompt.contains("DATE: October 19, 2024"));
        assert!(prompt.contains("RESTRICTIONS: Access all"));
    }
}
