//! Resume service layer: validation, parsing and scoring, each AI-first with a
//! heuristic fallback.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::assist::{resolve, AiAssistant, Outcome};
use crate::dictionaries::Dictionaries;
use crate::errors::AppError;
use crate::models::job::JobContext;
use crate::models::resume::{ParsedResume, ScoredBullet};
use crate::models::score::{AtsScoreResult, ValidationInfo};
use crate::resume::ats_score::{score_for_job, score_general};
use crate::resume::classifier::{classify, NOT_A_RESUME_MESSAGE};
use crate::resume::extract::sanitize;
use crate::resume::impact::{impact_score, score_bullets, skills_in_bullet};
use crate::resume::parser;
use crate::state::AppState;
use crate::text::truncate_chars;

const MIN_FRAGMENT_CHARS: usize = 30;
const MAX_FRAGMENTS: usize = 10;

#[derive(Debug, Serialize)]
pub struct ParseResumeResponse {
    pub id: Uuid,
    pub validation: ValidationInfo,
    pub parsed: Outcome<ParsedResume>,
    pub ats: Outcome<AtsScoreResult>,
    pub bullets: Vec<ScoredBullet>,
    pub raw_text: String,
    pub processed_at: DateTime<Utc>,
}

/// AI verdict first; the classifier decides whenever the AI does not confirm
/// the document is a resume.
pub async fn validate_document(
    assistant: &dyn AiAssistant,
    dicts: &Dictionaries,
    text: &str,
) -> ValidationInfo {
    let ai = assistant.validate_resume(text).await;

    if let Ok(verdict) = &ai {
        if verdict.is_resume {
            return ValidationInfo {
                ai_is_resume: Some(true),
                is_resume: true,
                reason: verdict.reason.clone(),
                heuristic_guess: true,
                low_confidence: false,
            };
        }
    }
    if let Err(e) = &ai {
        warn!(error = %e, "AI resume validation unavailable, using classifier");
    }

    let heuristic = classify(text, dicts);
    ValidationInfo {
        ai_is_resume: ai.ok().map(|v| v.is_resume),
        is_resume: heuristic.is_resume,
        reason: heuristic.reason,
        heuristic_guess: heuristic.is_resume,
        low_confidence: !heuristic.is_resume,
    }
}

/// General mode without a job, job-specific mode with one.
pub async fn score_resume(
    assistant: &dyn AiAssistant,
    dicts: &Dictionaries,
    resume: &ParsedResume,
    raw_text: &str,
    job: Option<&JobContext>,
) -> Outcome<AtsScoreResult> {
    match job {
        None => resolve(
            "score_resume",
            assistant.score_resume(resume, raw_text).await,
            || score_general(resume, raw_text, dicts),
        ),
        Some(job) => resolve(
            "score_against_job",
            assistant.score_against_job(resume, job).await,
            || score_for_job(resume, raw_text, job, dicts),
        ),
    }
}

/// Scored bullets from the parsed resume, or sentence fragments of the raw
/// text when the parse found none.
pub fn extract_bullets(resume: &ParsedResume, raw_text: &str, dicts: &Dictionaries) -> Vec<ScoredBullet> {
    let scored = score_bullets(resume, dicts);
    if !scored.is_empty() {
        return scored;
    }
    raw_text
        .split(['\n', '.', ';'])
        .map(str::trim)
        .filter(|f| f.chars().count() > MIN_FRAGMENT_CHARS)
        .take(MAX_FRAGMENTS)
        .map(|f| ScoredBullet {
            text: f.to_string(),
            impact_score: impact_score(f, dicts),
            skills: skills_in_bullet(f, &resume.skills),
        })
        .collect()
}

/// Full resume pipeline over already-extracted text.
pub async fn parse_resume(state: &AppState, text: &str) -> Result<ParseResumeResponse, AppError> {
    let cleaned = sanitize(text);
    let text = truncate_chars(&cleaned, state.config.max_input_chars);
    if text.is_empty() {
        return Err(AppError::Validation("Resume text is required".to_string()));
    }

    let assistant = state.assistant.as_ref();
    let dicts = state.dicts.as_ref();

    let validation = validate_document(assistant, dicts, text).await;
    if validation.low_confidence {
        if state.config.strict_resume_validation {
            return Err(AppError::UnprocessableEntity(NOT_A_RESUME_MESSAGE.to_string()));
        }
        warn!(reason = %validation.reason, "document may not be a resume, proceeding");
    }

    let parsed = resolve("parse_resume", assistant.parse_resume(text).await, || {
        parser::parse(text, dicts)
    });
    let ats = score_resume(assistant, dicts, &parsed.value, text, None).await;
    let bullets = extract_bullets(&parsed.value, text, dicts);

    info!(
        ai_parse = parsed.is_ai(),
        score = ats.value.score,
        bullets = bullets.len(),
        "resume processed"
    );

    Ok(ParseResumeResponse {
        id: Uuid::new_v4(),
        validation,
        parsed,
        ats,
        bullets,
        raw_text: text.to_string(),
        processed_at: Utc::now(),
    })
}
