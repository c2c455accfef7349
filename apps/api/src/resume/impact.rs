//! Bullet-level impact checks: a 0–10 impact score, the resume skills a bullet
//! mentions, and whether its outcome is quantified.

use serde::{Deserialize, Serialize};

use crate::dictionaries::Dictionaries;
use crate::models::resume::{ParsedResume, ScoredBullet};
use crate::text::contains_term;

const MAX_IMPACT: u8 = 10;
const LONG_BULLET_CHARS: usize = 80;

const VAGUE_VERBS: &[&str] = &[
    "improved",
    "enhanced",
    "helped",
    "worked on",
    "assisted",
    "supported",
    "participated",
    "involved",
];

const VAGUE_SCALE_WORDS: &[&str] = &[
    "significant",
    "major",
    "large",
    "huge",
    "massive",
    "substantial",
    "considerable",
    "many",
    "numerous",
    "various",
    "several",
];

/// 0–10: +3 for a number, +2 for a leading action verb, +2 for technical
/// vocabulary, +1 for a long bullet.
pub fn impact_score(bullet: &str, dicts: &Dictionaries) -> u8 {
    let lower = bullet.trim().to_lowercase();
    let mut score = 0u8;
    if lower.chars().any(|c| c.is_ascii_digit()) {
        score += 3;
    }
    if dicts.action_verbs.starts(&lower) {
        score += 2;
    }
    if dicts.impact_terms.any_in(&lower) {
        score += 2;
    }
    if bullet.chars().count() > LONG_BULLET_CHARS {
        score += 1;
    }
    score.min(MAX_IMPACT)
}

/// Resume skills mentioned in `bullet`, case-insensitively, in skill order.
pub fn skills_in_bullet(bullet: &str, skills: &[String]) -> Vec<String> {
    let lower = bullet.to_lowercase();
    skills
        .iter()
        .filter(|s| !s.trim().is_empty() && contains_term(&lower, &s.trim().to_lowercase()))
        .cloned()
        .collect()
}

/// Every experience and project bullet, scored.
pub fn score_bullets(resume: &ParsedResume, dicts: &Dictionaries) -> Vec<ScoredBullet> {
    resume
        .all_bullets()
        .filter(|b| !b.trim().is_empty())
        .map(|b| ScoredBullet {
            text: b.to_string(),
            impact_score: impact_score(b, dicts),
            skills: skills_in_bullet(b, &resume.skills),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactGap {
    pub bullet: String,
    pub reason: String,
    pub suggestion: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactValidationResult {
    pub passed: bool,
    pub missing: Vec<ImpactGap>,
    pub suggestions: Vec<String>,
}

impl ImpactValidationResult {
    fn pass() -> Self {
        Self {
            passed: true,
            missing: vec![],
            suggestions: vec![],
        }
    }
}

fn is_quantified(text: &str) -> bool {
    // `~N`, `Nx` and `N%` all carry a digit.
    text.chars().any(|c| c.is_ascii_digit()) || text.contains(['%', '$', '€', '£'])
}

/// Checks one bullet for a quantified outcome: a number, a percentage or a
/// currency amount. A failing bullet gets one gap naming what made it vague.
pub fn validate_impact(bullet: &str) -> ImpactValidationResult {
    if is_quantified(bullet) {
        return ImpactValidationResult::pass();
    }

    let lower = bullet.to_lowercase();
    let vague_verb = VAGUE_VERBS.iter().find(|v| contains_term(&lower, v));
    let vague_scale = VAGUE_SCALE_WORDS.iter().find(|w| contains_term(&lower, w));

    let (reason, suggestion) = match (vague_verb, vague_scale) {
        (Some(verb), _) => (
            format!("Uses vague verb '{verb}' without a measurable result"),
            format!("Quantify '{verb}': by how much, for how many users, or how much time saved?"),
        ),
        (None, Some(word)) => (
            format!("Uses vague scale word '{word}' without a number"),
            format!("Replace '{word}' with a specific number or percentage"),
        ),
        (None, None) => (
            "No quantified outcome".to_string(),
            "Add a number, percentage or time metric to show the result".to_string(),
        ),
    };

    ImpactValidationResult {
        passed: false,
        missing: vec![ImpactGap {
            bullet: bullet.to_string(),
            reason,
            suggestion: suggestion.clone(),
        }],
        suggestions: vec![suggestion],
    }
}

/// Validates a batch of bullets, collecting every failure.
pub fn validate_bullets(bullets: &[String]) -> ImpactValidationResult {
    bullets
        .iter()
        .map(|b| validate_impact(b))
        .fold(ImpactValidationResult::pass(), |mut acc, r| {
            acc.passed &= r.passed;
            acc.missing.extend(r.missing);
            acc.suggestions.extend(r.suggestions);
            acc
        })
}
