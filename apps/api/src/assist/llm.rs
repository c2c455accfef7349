//! `AiAssistant` backed by the chat-completions client.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::info;

use crate::assist::{AiAssistant, AssistError};
use crate::job::prompts::{
    ANALYZE_PROMPT_TEMPLATE, ASSISTIVE_INSTRUCTION, FAST_INSTRUCTION, REFERENCE_BULLETS_HEADER,
    TAILOR_PROMPT_TEMPLATE,
};
use crate::job::tailoring::{TailorMode, TailoringSuggestions};
use crate::llm_client::prompts::{excerpt, JSON_ONLY_SYSTEM, NO_INVENTION_INSTRUCTION};
use crate::llm_client::{LlmClient, RetryPolicy};
use crate::models::job::{JobContext, ParsedJobDescription};
use crate::models::resume::{ParsedResume, ScoredBullet};
use crate::models::score::{AtsAnalysis, AtsScoreResult, ResumeVerdict};
use crate::resume::prompts::{
    ATS_GENERAL_PROMPT_TEMPLATE, ATS_JOB_PROMPT_TEMPLATE, PARSE_PROMPT_TEMPLATE,
    VALIDATE_PROMPT_TEMPLATE,
};

/// Validation only needs the top of a document.
const VALIDATE_EXCERPT_CHARS: usize = 4_000;

pub struct LlmAssistant {
    client: LlmClient,
    max_input_chars: usize,
}

/// Score as the model returned it, checked before use.
#[derive(Debug, Deserialize)]
struct RawScore {
    score: serde_json::Value,
    #[serde(default)]
    analysis: Option<AtsAnalysis>,
}

impl RawScore {
    /// Accepts integral or fractional numbers within [0, 100]; anything else is
    /// a failed AI call.
    fn into_result(self) -> Result<AtsScoreResult, AssistError> {
        let value = self
            .score
            .as_f64()
            .ok_or_else(|| AssistError::InvalidResponse(format!("non-numeric score {}", self.score)))?;
        if !(0.0..=100.0).contains(&value) {
            return Err(AssistError::InvalidResponse(format!(
                "score {value} outside 0-100"
            )));
        }
        Ok(AtsScoreResult {
            score: value.round() as u8,
            analysis: self.analysis,
        })
    }
}

fn reference_section(reference: &[ScoredBullet]) -> String {
    if reference.is_empty() {
        return String::new();
    }
    let lines: Vec<String> = reference
        .iter()
        .map(|b| format!("- {} (impact: {})", b.text, b.impact_score))
        .collect();
    format!("{REFERENCE_BULLETS_HEADER}\n{}", lines.join("\n"))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, AssistError> {
    serde_json::to_string_pretty(value).map_err(|e| AssistError::InvalidResponse(e.to_string()))
}

impl LlmAssistant {
    pub fn new(client: LlmClient, max_input_chars: usize) -> Self {
        info!(model = crate::llm_client::MODEL, "AI assistance enabled");
        Self {
            client,
            max_input_chars,
        }
    }

    async fn score(&self, prompt: String) -> Result<AtsScoreResult, AssistError> {
        let raw: RawScore = self
            .client
            .call_json(&prompt, JSON_ONLY_SYSTEM, RetryPolicy::NONE)
            .await?;
        raw.into_result()
    }
}

#[async_trait]
impl AiAssistant for LlmAssistant {
    fn backend(&self) -> &'static str {
        "openai"
    }

    async fn validate_resume(&self, text: &str) -> Result<ResumeVerdict, AssistError> {
        let prompt = VALIDATE_PROMPT_TEMPLATE.replace("{document}", excerpt(text, VALIDATE_EXCERPT_CHARS));
        Ok(self
            .client
            .call_json(&prompt, JSON_ONLY_SYSTEM, RetryPolicy::NONE)
            .await?)
    }

    async fn parse_resume(&self, text: &str) -> Result<ParsedResume, AssistError> {
        let prompt = PARSE_PROMPT_TEMPLATE
            .replace("{no_invention}", NO_INVENTION_INSTRUCTION)
            .replace("{resume_text}", excerpt(text, self.max_input_chars));
        Ok(self
            .client
            .call_json(&prompt, JSON_ONLY_SYSTEM, RetryPolicy::PARSE)
            .await?)
    }

    async fn score_resume(
        &self,
        resume: &ParsedResume,
        raw_text: &str,
    ) -> Result<AtsScoreResult, AssistError> {
        let prompt = ATS_GENERAL_PROMPT_TEMPLATE
            .replace("{resume_json}", &to_json(resume)?)
            .replace("{resume_text}", excerpt(raw_text, self.max_input_chars));
        self.score(prompt).await
    }

    async fn score_against_job(
        &self,
        resume: &ParsedResume,
        job: &JobContext,
    ) -> Result<AtsScoreResult, AssistError> {
        let prompt = ATS_JOB_PROMPT_TEMPLATE
            .replace("{resume_json}", &to_json(resume)?)
            .replace("{job_json}", &to_json(&job.parsed)?);
        self.score(prompt).await
    }

    async fn analyze_job(&self, job_text: &str) -> Result<ParsedJobDescription, AssistError> {
        let prompt = ANALYZE_PROMPT_TEMPLATE.replace("{job_text}", excerpt(job_text, self.max_input_chars));
        Ok(self
            .client
            .call_json(&prompt, JSON_ONLY_SYSTEM, RetryPolicy::NONE)
            .await?)
    }

    async fn suggest_tailoring(
        &self,
        resume: &ParsedResume,
        job: &ParsedJobDescription,
        mode: TailorMode,
        reference: &[ScoredBullet],
    ) -> Result<TailoringSuggestions, AssistError> {
        let mode_instruction = match mode {
            TailorMode::Fast => FAST_INSTRUCTION,
            TailorMode::Assistive => ASSISTIVE_INSTRUCTION,
        };
        let prompt = TAILOR_PROMPT_TEMPLATE
            .replace("{mode_instruction}", mode_instruction)
            .replace("{reference_bullets}", &reference_section(reference))
            .replace("{resume_json}", &to_json(resume)?)
            .replace("{job_json}", &to_json(job)?);
        Ok(self
            .client
            .call_json(&prompt, JSON_ONLY_SYSTEM, RetryPolicy::NONE)
            .await?)
    }
}
