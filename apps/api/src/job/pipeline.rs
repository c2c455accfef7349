use std::collections::BTreeMap;

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use tracing::info;

use crate::assist::{resolve, Outcome};
use crate::errors::AppError;
use crate::job::analyzer::analyze;
use crate::job::equivalents::map_equivalents;
use crate::models::job::ParsedJobDescription;
use crate::state::AppState;
use crate::text::truncate_chars;

const AI_CONFIDENCE: f32 = 0.85;
const HEURISTIC_CONFIDENCE: f32 = 0.5;

#[derive(Debug, Serialize)]
pub struct AnalysisMetadata {
    pub extracted_at: String,
    pub confidence: f32,
}

#[derive(Debug, Serialize)]
pub struct JobAnalysisResponse {
    pub parsed: Outcome<ParsedJobDescription>,
    pub source_url: Option<String>,
    pub tech_equivalents: BTreeMap<String, Vec<String>>,
    pub keyword_count: usize,
    pub metadata: AnalysisMetadata,
}

pub async fn analyze_job(
    state: &AppState,
    job_text: &str,
    source_url: Option<String>,
) -> Result<JobAnalysisResponse, AppError> {
    let text = truncate_chars(job_text.trim(), state.config.max_input_chars);
    if text.is_empty() {
        return Err(AppError::Validation("Job description text is required".to_string()));
    }

    let parsed = resolve("analyze_job", state.assistant.analyze_job(text).await, || {
        analyze(text, &state.dicts)
    });

    let tech_equivalents = map_equivalents(&parsed.value.tech_stack, &state.dicts.tech_clusters);
    let keyword_count = parsed.value.all_keywords().len();
    let confidence = if parsed.is_ai() {
        AI_CONFIDENCE
    } else {
        HEURISTIC_CONFIDENCE
    };

    info!(
        ai = parsed.is_ai(),
        title = %parsed.value.title,
        keyword_count,
        "job analyzed"
    );

    Ok(JobAnalysisResponse {
        parsed,
        source_url,
        tech_equivalents,
        keyword_count,
        metadata: AnalysisMetadata {
            extracted_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            confidence,
        },
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::assist::testing::ScriptedAssistant;
    use crate::assist::DisabledAssistant;
    use crate::config::Config;

    const POSTING: &str = "Platform Engineer\nRequired: Git, Docker and AWS\nBachelor's degree preferred";

    #[tokio::test]
    async fn test_heuristic_analysis_when_ai_disabled() {
        let state = AppState::new(Config::default(), Arc::new(DisabledAssistant));
        let resp = analyze_job(&state, POSTING, Some("https://jobs.example/1".into()))
            .await
            .unwrap();

        assert!(!resp.parsed.is_ai());
        assert_eq!(resp.metadata.confidence, HEURISTIC_CONFIDENCE);
        assert_eq!(resp.source_url.as_deref(), Some("https://jobs.example/1"));
        assert_eq!(resp.keyword_count, resp.parsed.value.all_keywords().len());
        assert!(resp.tech_equivalents.contains_key("git"));
        assert!(resp.tech_equivalents["git"].contains(&"Bitbucket".to_string()));
        assert!(!resp.tech_equivalents["git"].contains(&"GitHub".to_string()));
    }

    #[tokio::test]
    async fn test_ai_analysis_is_used_when_available() {
        let ai = ScriptedAssistant {
            job: Some(ParsedJobDescription {
                title: "Data Engineer".into(),
                tech_stack: vec!["Kafka".into(), "Spark".into()],
                keywords: vec!["streaming".into()],
                ..Default::default()
            }),
            ..Default::default()
        };
        let state = AppState::new(Config::default(), Arc::new(ai));
        let resp = analyze_job(&state, POSTING, None).await.unwrap();

        assert!(resp.parsed.is_ai());
        assert_eq!(resp.parsed.value.title, "Data Engineer");
        assert_eq!(resp.keyword_count, 3);
        assert_eq!(resp.metadata.confidence, AI_CONFIDENCE);
        assert_eq!(resp.tech_equivalents.len(), 2);
        assert!(chrono::DateTime::parse_from_rfc3339(&resp.metadata.extracted_at).is_ok());
    }

    #[tokio::test]
    async fn test_blank_posting_is_rejected() {
        let state = AppState::new(Config::default(), Arc::new(DisabledAssistant));
        let err = analyze_job(&state, "   \n ", None).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
