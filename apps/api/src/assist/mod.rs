//! AI assistance with deterministic fallback.
//!
//! Every AI-backed operation goes through the `AiAssistant` trait. Callers pair
//! the AI result with a heuristic and hand both to [`resolve`], which picks the
//! branch and records which one produced the value.
//!
//! `AppState` holds an `Arc<dyn AiAssistant>`, chosen at startup from config.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use crate::job::tailoring::{TailorMode, TailoringSuggestions};
use crate::llm_client::LlmError;
use crate::models::job::{JobContext, ParsedJobDescription};
use crate::models::resume::{ParsedResume, ScoredBullet};
use crate::models::score::{AtsScoreResult, ResumeVerdict};

pub mod llm;

pub use llm::LlmAssistant;

#[derive(Debug, Error)]
pub enum AssistError {
    #[error("AI assistance is disabled")]
    Disabled,

    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error("invalid AI response: {0}")]
    InvalidResponse(String),
}

/// The AI backend. Implement this to swap providers without touching handlers.
#[async_trait]
pub trait AiAssistant: Send + Sync {
    /// Short backend name for health output and logs.
    fn backend(&self) -> &'static str;

    async fn validate_resume(&self, text: &str) -> Result<ResumeVerdict, AssistError>;

    async fn parse_resume(&self, text: &str) -> Result<ParsedResume, AssistError>;

    async fn score_resume(
        &self,
        resume: &ParsedResume,
        raw_text: &str,
    ) -> Result<AtsScoreResult, AssistError>;

    async fn score_against_job(
        &self,
        resume: &ParsedResume,
        job: &JobContext,
    ) -> Result<AtsScoreResult, AssistError>;

    async fn analyze_job(&self, job_text: &str) -> Result<ParsedJobDescription, AssistError>;

    async fn suggest_tailoring(
        &self,
        resume: &ParsedResume,
        job: &ParsedJobDescription,
        mode: TailorMode,
        reference: &[ScoredBullet],
    ) -> Result<TailoringSuggestions, AssistError>;
}

/// Used when no API key is configured or AI is switched off.
pub struct DisabledAssistant;

#[async_trait]
impl AiAssistant for DisabledAssistant {
    fn backend(&self) -> &'static str {
        "disabled"
    }

    async fn validate_resume(&self, _text: &str) -> Result<ResumeVerdict, AssistError> {
        Err(AssistError::Disabled)
    }

    async fn parse_resume(&self, _text: &str) -> Result<ParsedResume, AssistError> {
        Err(AssistError::Disabled)
    }

    async fn score_resume(
        &self,
        _resume: &ParsedResume,
        _raw_text: &str,
    ) -> Result<AtsScoreResult, AssistError> {
        Err(AssistError::Disabled)
    }

    async fn score_against_job(
        &self,
        _resume: &ParsedResume,
        _job: &JobContext,
    ) -> Result<AtsScoreResult, AssistError> {
        Err(AssistError::Disabled)
    }

    async fn analyze_job(&self, _job_text: &str) -> Result<ParsedJobDescription, AssistError> {
        Err(AssistError::Disabled)
    }

    async fn suggest_tailoring(
        &self,
        _resume: &ParsedResume,
        _job: &ParsedJobDescription,
        _mode: TailorMode,
        _reference: &[ScoredBullet],
    ) -> Result<TailoringSuggestions, AssistError> {
        Err(AssistError::Disabled)
    }
}

/// Why the heuristic produced a value instead of the AI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FallbackCause {
    Disabled,
    Failed { message: String },
}

impl From<&AssistError> for FallbackCause {
    fn from(err: &AssistError) -> Self {
        match err {
            AssistError::Disabled => FallbackCause::Disabled,
            other => FallbackCause::Failed {
                message: other.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum Provenance {
    Ai,
    Heuristic { cause: FallbackCause },
}

/// A value and the path that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome<T> {
    pub value: T,
    pub provenance: Provenance,
}

impl<T> Outcome<T> {
    pub fn is_ai(&self) -> bool {
        self.provenance == Provenance::Ai
    }
}

/// Takes the AI value when there is one, otherwise runs `heuristic`.
pub fn resolve<T>(
    label: &str,
    ai: Result<T, AssistError>,
    heuristic: impl FnOnce() -> T,
) -> Outcome<T> {
    match ai {
        Ok(value) => Outcome {
            value,
            provenance: Provenance::Ai,
        },
        Err(err) => {
            warn!(operation = label, error = %err, "AI unavailable, using heuristic");
            Outcome {
                value: heuristic(),
                provenance: Provenance::Heuristic {
                    cause: FallbackCause::from(&err),
                },
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_prefers_ai() {
        let out = resolve("op", Ok(7), || 1);
        assert_eq!(out.value, 7);
        assert!(out.is_ai());
    }

    #[test]
    fn test_resolve_falls_back_when_disabled() {
        let out = resolve("op", Err::<i32, _>(AssistError::Disabled), || 1);
        assert_eq!(out.value, 1);
        assert_eq!(
            out.provenance,
            Provenance::Heuristic {
                cause: FallbackCause::Disabled
            }
        );
    }

    #[test]
    fn test_resolve_records_failure_message() {
        let err = AssistError::InvalidResponse("score out of range".into());
        let out = resolve("op", Err::<i32, _>(err), || 2);
        match out.provenance {
            Provenance::Heuristic {
                cause: FallbackCause::Failed { message },
            } => assert!(message.contains("score out of range")),
            other => panic!("unexpected provenance {other:?}"),
        }
    }

    #[test]
    fn test_heuristic_not_run_on_ai_success() {
        let out = resolve("op", Ok("ai"), || panic!("heuristic must not run"));
        assert_eq!(out.value, "ai");
    }

    #[test]
    fn test_provenance_serialization() {
        let json = serde_json::to_value(Provenance::Heuristic {
            cause: FallbackCause::Disabled,
        })
        .unwrap();
        assert_eq!(json["source"], "heuristic");
        assert_eq!(json["cause"]["kind"], "disabled");
        assert_eq!(serde_json::to_value(Provenance::Ai).unwrap()["source"], "ai");
    }

    #[tokio::test]
    async fn test_disabled_assistant_refuses_everything() {
        let a = DisabledAssistant;
        assert!(matches!(a.parse_resume("x").await, Err(AssistError::Disabled)));
        assert!(matches!(a.analyze_job("x").await, Err(AssistError::Disabled)));
        assert_eq!(a.backend(), "disabled");
    }
}
