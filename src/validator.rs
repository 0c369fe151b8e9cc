//! Quality validation
//!
//! Deterministic, rule-based checks over the synthesized metadata fields.
//! Never fails: every call produces a full report with per-field pass/fail
//! and violation reasons, plus an aggregate confidence score. A score
//! below 0.70 flags the item for mandatory human review — advisory output,
//! not an error.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Reports below this confidence are flagged for human review.
pub const REVIEW_THRESHOLD: f32 = 0.70;

const HEADLINE_MIN_WORDS: usize = 6;
const HEADLINE_MAX_WORDS: usize = 8;
const HEADLINE_MAX_CHARS: usize = 100;
const SLUG_MAX_CHARS: usize = 40;
const STORY_MIN_PARAGRAPHS: usize = 2;
const STORY_MAX_PARAGRAPHS: usize = 5;

lazy_static! {
    /// Two uppercase hyphenated segments joined by a single slash
    static ref SLUG_RE: Regex =
        Regex::new(r"^[A-Z][A-Z0-9]*(?:-[A-Z0-9]+)*/[A-Z][A-Z0-9]*(?:-[A-Z0-9]+)*$").unwrap();
    static ref HEADLINE_FORBIDDEN_RE: Regex =
        Regex::new(r"(?i)\b(UGC|claims|alleged)\b").unwrap();
    static ref CAMERA_TERM_RE: Regex =
        Regex::new(r"\b(CUTAWAY|PAN|TILT|ZOOM|WIDE SHOT|VIEW OF)\b").unwrap();
    static ref SHOT_NUMBER_RE: Regex = Regex::new(r"(?m)^\s*(\d+)\.").unwrap();
    static ref PAST_TENSE_RE: Regex =
        Regex::new(r"(?i)\b(said|told|was|were|had|fired|killed|struck|showed|reported)\b")
            .unwrap();
}

/// The synthesized fields under validation. `location` is the journalist
/// ground truth, used only to check the slug carries a location token.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataFields {
    pub headline: String,
    pub slug: String,
    pub story: String,
    pub shotlist: String,
    pub restrictions: String,
    pub location: String,
}

impl MetadataFields {
    /// Assemble validator input from synthesized metadata, e.g. after a
    /// human reviewer edited individual fields.
    pub fn from_metadata(metadata: &crate::analyzer::NewsMetadata, restrictions: &str) -> Self {
        Self {
            headline: metadata.headline.clone(),
            slug: metadata.slug.clone(),
            story: metadata.story.clone(),
            shotlist: metadata.shotlist.to_text(),
            restrictions: restrictions.to_string(),
            location: metadata.input.location.clone(),
        }
    }
}

/// Outcome of one field's rule check.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleCheck {
    pub passed: bool,
    pub violations: Vec<String>,
}

impl RuleCheck {
    fn from_violations(violations: Vec<String>) -> Self {
        Self {
            passed: violations.is_empty(),
            violations,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub headline: RuleCheck,
    pub slug: RuleCheck,
    pub story: RuleCheck,
    pub shotlist: RuleCheck,
    pub restrictions: RuleCheck,
    /// Fraction of field rules passed, equally weighted, in [0.0, 1.0]
    pub confidence_score: f32,
    /// True when the score falls below `REVIEW_THRESHOLD`
    pub needs_review: bool,
}

impl ValidationReport {
    /// Field name to check, in a fixed order.
    pub fn field_checks(&self) -> [(&'static str, &RuleCheck); 5] {
        [
            ("headline", &self.headline),
            ("slug", &self.slug),
            ("story", &self.story),
            ("shotlist", &self.shotlist),
            ("restrictions", &self.restrictions),
        ]
    }
}

/// Run every rule over the supplied fields. Pure and deterministic.
pub fn validate(fields: &MetadataFields) -> ValidationReport {
    let headline = check_headline(&fields.headline);
    let slug = check_slug(&fields.slug, &fields.location);
    let story = check_story(&fields.story);
    let shotlist = check_shotlist(&fields.shotlist);
    let restrictions = check_restrictions(&fields.restrictions);

    let checks = [&headline, &slug, &story, &shotlist, &restrictions];
    let passed = checks.iter().filter(|c| c.passed).count();
    let confidence_score = passed as f32 / checks.len() as f32;

    ValidationReport {
        headline,
        slug,
        story,
        shotlist,
        restrictions,
        confidence_score,
        needs_review: confidence_score < REVIEW_THRESHOLD,
    }
}

fn check_headline(headline: &str) -> RuleCheck {
    let mut violations = Vec::new();

    let words = headline.split_whitespace().count();
    if !(HEADLINE_MIN_WORDS..=HEADLINE_MAX_WORDS).contains(&words) {
        violations.push(format!(
            "word count {} outside {}-{}",
            words, HEADLINE_MIN_WORDS, HEADLINE_MAX_WORDS
        ));
    }
    if headline.chars().count() > HEADLINE_MAX_CHARS {
        violations.push(format!("exceeds {} characters", HEADLINE_MAX_CHARS));
    }
    if let Some(m) = HEADLINE_FORBIDDEN_RE.find(headline) {
        violations.push(format!("contains forbidden term \"{}\"", m.as_str()));
    }

    RuleCheck::from_violations(violations)
}

fn check_slug(slug: &str, location: &str) -> RuleCheck {
    let mut violations = Vec::new();

    if !SLUG_RE.is_match(slug) {
        violations.push("not two uppercase hyphenated segments joined by \"/\"".into());
    }
    if slug.chars().count() > SLUG_MAX_CHARS {
        violations.push(format!("exceeds {} characters", SLUG_MAX_CHARS));
    }

    // Slug must carry a token derived from the stated location; skipped
    // when no location is supplied
    let tokens: Vec<String> = location
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|t| t.len() >= 3)
        .map(|t| t.to_ascii_uppercase())
        .collect();
    if !tokens.is_empty() && !tokens.iter().any(|t| slug.contains(t.as_str())) {
        violations.push(format!("missing location token from \"{}\"", location));
    }

    RuleCheck::from_violations(violations)
}

fn check_story(story: &str) -> RuleCheck {
    let mut violations = Vec::new();

    let paragraphs = story
        .split("\n\n")
        .filter(|p| !p.trim().is_empty())
        .count();
    if !(STORY_MIN_PARAGRAPHS..=STORY_MAX_PARAGRAPHS).contains(&paragraphs) {
        violations.push(format!(
            "paragraph count {} outside {}-{}",
            paragraphs, STORY_MIN_PARAGRAPHS, STORY_MAX_PARAGRAPHS
        ));
    }
    if !story.to_ascii_lowercase().contains("verif") {
        violations.push("missing verification clause".into());
    }
    if !PAST_TENSE_RE.is_match(story) {
        violations.push("no simple-past markers found".into());
    }

    RuleCheck::from_violations(violations)
}

fn check_shotlist(shotlist: &str) -> RuleCheck {
    let mut violations = Vec::new();

    let first_line = shotlist.lines().find(|l| !l.trim().is_empty());
    match first_line {
        Some(line) if line.trim_start().starts_with("DATELINE:") => {}
        _ => violations.push("does not begin with a DATELINE line".into()),
    }

    if let Some(m) = CAMERA_TERM_RE.find(shotlist) {
        violations.push(format!("contains camera-movement term \"{}\"", m.as_str()));
    }

    let numbers: Vec<u32> = SHOT_NUMBER_RE
        .captures_iter(shotlist)
        .filter_map(|c| c[1].parse().ok())
        .collect();
    if numbers.is_empty() {
        violations.push("no numbered shots".into());
    } else {
        let expected: Vec<u32> = (1..=numbers.len() as u32).collect();
        if numbers != expected {
            violations.push(format!(
                "shot numbers {:?} are not strictly increasing from 1",
                numbers
            ));
        }
    }

    RuleCheck::from_violations(violations)
}

fn check_restrictions(restrictions: &str) -> RuleCheck {
    let mut violations = Vec::new();
    let lower = restrictions.to_ascii_lowercase();

    if !lower.contains("broadcast") {
        violations.push("missing broadcast restriction line".into());
    }
    if !lower.contains("digital") {
        violations.push("missing digital restriction line".into());
    }

    RuleCheck::from_violations(violations)
}
