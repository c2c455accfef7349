use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::assist::Outcome;
use crate::errors::AppError;
use crate::job::tailoring::{tailor, TailorMode, TailorResponse};
use crate::models::job::JobContext;
use crate::models::resume::ParsedResume;
use crate::models::score::{AtsScoreResult, ValidationInfo};
use crate::resume::extract::{extract_text, sanitize};
use crate::resume::pipeline::{parse_resume, score_resume, validate_document, ParseResumeResponse};
use crate::state::AppState;
use crate::text::truncate_chars;

const FILE_FIELD: &str = "file";

#[derive(Deserialize)]
pub struct TextRequest {
    pub text: String,
}

#[derive(Deserialize)]
pub struct AtsScoreRequest {
    pub resume: ParsedResume,
    #[serde(default)]
    pub raw_text: Option<String>,
    #[serde(default)]
    pub job: Option<JobContext>,
}

#[derive(Serialize)]
pub struct AtsScoreResponse {
    pub ats: Outcome<AtsScoreResult>,
}

#[derive(Deserialize)]
pub struct TailorRequest {
    pub resume: ParsedResume,
    pub job: JobContext,
    #[serde(default)]
    pub mode: TailorMode,
}

struct Upload {
    file_name: String,
    content_type: Option<String>,
    data: Bytes,
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        AppError::Validation(format!("Invalid multipart body: {}", e.body_text()))
    }
}

async fn read_upload(multipart: &mut Multipart, max_bytes: usize) -> Result<Upload, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or("upload").to_string();
        let content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await.map_err(multipart_error)?;
        if data.len() > max_bytes {
            return Err(AppError::PayloadTooLarge(format!(
                "File exceeds the {max_bytes} byte upload limit"
            )));
        }
        return Ok(Upload {
            file_name,
            content_type,
            data,
        });
    }
    Err(AppError::Validation(format!(
        "Missing multipart field '{FILE_FIELD}'"
    )))
}

/// POST /api/v1/resumes/validate
pub async fn handle_validate(
    State(state): State<AppState>,
    Json(req): Json<TextRequest>,
) -> Result<Json<ValidationInfo>, AppError> {
    let cleaned = sanitize(&req.text);
    let text = truncate_chars(&cleaned, state.config.max_input_chars);
    if text.is_empty() {
        return Err(AppError::Validation("Text is required".to_string()));
    }
    let info = validate_document(state.assistant.as_ref(), &state.dicts, text).await;
    Ok(Json(info))
}

/// POST /api/v1/resumes/parse
pub async fn handle_parse_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ParseResumeResponse>, AppError> {
    let upload = read_upload(&mut multipart, state.config.max_upload_bytes).await?;
    info!(
        file = %upload.file_name,
        bytes = upload.data.len(),
        "resume upload received"
    );

    // PDF decoding is CPU-bound.
    let text = tokio::task::spawn_blocking(move || {
        extract_text(
            &upload.file_name,
            upload.content_type.as_deref(),
            &upload.data,
        )
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in extraction: {e}")))??;

    Ok(Json(parse_resume(&state, &text).await?))
}

/// POST /api/v1/resumes/parse-text
pub async fn handle_parse_text(
    State(state): State<AppState>,
    Json(req): Json<TextRequest>,
) -> Result<Json<ParseResumeResponse>, AppError> {
    Ok(Json(parse_resume(&state, &req.text).await?))
}

/// POST /api/v1/resumes/ats-score
pub async fn handle_ats_score(
    State(state): State<AppState>,
    Json(req): Json<AtsScoreRequest>,
) -> Result<Json<AtsScoreResponse>, AppError> {
    let raw_text = req.raw_text.unwrap_or_default();
    let raw_text = truncate_chars(&raw_text, state.config.max_input_chars);
    let ats = score_resume(
        state.assistant.as_ref(),
        &state.dicts,
        &req.resume,
        raw_text,
        req.job.as_ref(),
    )
    .await;
    Ok(Json(AtsScoreResponse { ats }))
}

/// POST /api/v1/resumes/tailor
pub async fn handle_tailor(
    State(state): State<AppState>,
    Json(req): Json<TailorRequest>,
) -> Result<Json<TailorResponse>, AppError> {
    let response = tailor(
        state.assistant.as_ref(),
        &state.dicts,
        &req.resume,
        &req.job,
        req.mode,
    )
    .await?;
    Ok(Json(response))
}
