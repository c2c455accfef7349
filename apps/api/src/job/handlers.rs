use std::collections::BTreeMap;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::job::equivalents::map_equivalents;
use crate::job::pipeline::{analyze_job, JobAnalysisResponse};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct AnalyzeJobRequest {
    pub job_text: String,
    #[serde(default)]
    pub source_url: Option<String>,
}

#[derive(Deserialize)]
pub struct TechEquivalentsRequest {
    pub tech_stack: Vec<String>,
}

#[derive(Serialize)]
pub struct TechEquivalentsResponse {
    pub equivalents: BTreeMap<String, Vec<String>>,
}

/// POST /api/v1/jobs/analyze
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeJobRequest>,
) -> Result<Json<JobAnalysisResponse>, AppError> {
    let response = analyze_job(&state, &req.job_text, req.source_url).await?;
    Ok(Json(response))
}

/// POST /api/v1/jobs/tech-equivalents
pub async fn handle_tech_equivalents(
    State(state): State<AppState>,
    Json(req): Json<TechEquivalentsRequest>,
) -> Result<Json<TechEquivalentsResponse>, AppError> {
    if req.tech_stack.iter().all(|t| t.trim().is_empty()) {
        return Err(AppError::Validation("tech_stack must list at least one technology".to_string()));
    }
    Ok(Json(TechEquivalentsResponse {
        equivalents: map_equivalents(&req.tech_stack, &state.dicts.tech_clusters),
    }))
}
