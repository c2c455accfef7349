pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::job::handlers as job;
use crate::resume::handlers as resume;
use crate::state::AppState;

/// Room for multipart framing around an upload at the size limit.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes + MULTIPART_OVERHEAD_BYTES;

    Router::new()
        .route("/health", get(health::health_handler))
        // Resume API
        .route("/api/v1/resumes/validate", post(resume::handle_validate))
        .route("/api/v1/resumes/parse", post(resume::handle_parse_upload))
        .route("/api/v1/resumes/parse-text", post(resume::handle_parse_text))
        .route("/api/v1/resumes/ats-score", post(resume::handle_ats_score))
        .route("/api/v1/resumes/tailor", post(resume::handle_tailor))
        // Job API
        .route("/api/v1/jobs/analyze", post(job::handle_analyze))
        .route(
            "/api/v1/jobs/tech-equivalents",
            post(job::handle_tech_equivalents),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::assist::DisabledAssistant;
    use crate::config::Config;

    const SCENARIO_RESUME: &str = "Experienced Software Engineer\njohn@x.com\n555-123-4567\nEXPERIENCE\n- Led team of 5, increased revenue by 20%\nEDUCATION\nBS Computer Science, MIT\nSKILLS\nPython, AWS, Docker";

    fn app() -> Router {
        build_router(AppState::new(Config::default(), Arc::new(DisabledAssistant)))
    }

    async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn multipart(file_name: &str, content: &str) -> Request<Body> {
        let boundary = "XBOUNDARYX";
        let body = format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n\
             Content-Type: text/plain\r\n\r\n{content}\r\n--{boundary}--\r\n"
        );
        Request::builder()
            .method("POST")
            .uri("/api/v1/resumes/parse")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_reports_backend() {
        let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let (status, body) = send(app(), req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["ai"], "disabled");
    }

    #[tokio::test]
    async fn test_parse_text_end_to_end() {
        let (status, body) = send(
            app(),
            post_json("/api/v1/resumes/parse-text", json!({ "text": SCENARIO_RESUME })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ats"]["value"]["score"], 61);
        assert_eq!(body["ats"]["provenance"]["source"], "heuristic");
        assert_eq!(body["parsed"]["value"]["profile"]["email"], "john@x.com");
        assert_eq!(body["validation"]["isResume"], true);
    }

    #[tokio::test]
    async fn test_multipart_upload_is_parsed() {
        let (status, body) = send(app(), multipart("resume.txt", SCENARIO_RESUME)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["parsed"]["value"]["skills"], json!(["Python", "AWS", "Docker"]));
    }

    #[tokio::test]
    async fn test_oversized_upload_is_rejected() {
        let state = AppState::new(
            Config {
                max_upload_bytes: 16,
                ..Config::default()
            },
            Arc::new(DisabledAssistant),
        );
        let (status, body) = send(build_router(state), multipart("resume.txt", SCENARIO_RESUME)).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body["error"]["code"], "PAYLOAD_TOO_LARGE");
    }

    #[tokio::test]
    async fn test_empty_text_is_a_validation_error() {
        let (status, body) = send(
            app(),
            post_json("/api/v1/resumes/validate", json!({ "text": "  " })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_ats_score_against_job() {
        let request = json!({
            "resume": { "skills": ["React", "AWS"] },
            "job": { "parsed": { "requirements": { "required_skills": ["React", "Node.js", "AWS"] } } }
        });
        let (status, body) = send(app(), post_json("/api/v1/resumes/ats-score", request)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ats"]["value"]["score"], 70);
    }

    #[tokio::test]
    async fn test_tailor_without_ai_is_unavailable() {
        let request = json!({
            "resume": { "skills": ["React"] },
            "job": { "parsed": { "title": "Frontend Engineer" } },
            "mode": "assistive"
        });
        let (status, body) = send(app(), post_json("/api/v1/resumes/tailor", request)).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"]["code"], "SERVICE_UNAVAILABLE");
    }

    #[tokio::test]
    async fn test_job_analysis_and_equivalents() {
        let (status, body) = send(
            app(),
            post_json(
                "/api/v1/jobs/analyze",
                json!({ "job_text": "Backend Engineer\nWe use Python and Docker daily" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["metadata"]["confidence"], 0.5);
        assert!(body["tech_equivalents"]["docker"].is_array());

        let (status, body) = send(
            app(),
            post_json("/api/v1/jobs/tech-equivalents", json!({ "tech_stack": ["Docker"] })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["equivalents"]["Docker"], json!(["Kubernetes", "Podman", "containerd"]));
    }

    #[tokio::test]
    async fn test_empty_tech_stack_is_rejected() {
        let (status, _) = send(
            app(),
            post_json("/api/v1/jobs/tech-equivalents", json!({ "tech_stack": [] })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
