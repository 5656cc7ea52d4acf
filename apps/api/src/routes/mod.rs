pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::scoring::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Scoring API
        .route("/api/v1/resumes/score", post(handlers::handle_score))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::scoring::config::ScoringConfig;
    use crate::scoring::engine::ScoringEngine;

    fn app() -> Router {
        let state = AppState {
            engine: Arc::new(ScoringEngine::new(ScoringConfig::default()).unwrap()),
        };
        build_router(state)
    }

    async fn post_score(body: Value) -> (StatusCode, Value) {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/resumes/score")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let response = app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["scoring_config_version"], 1);
    }

    #[tokio::test]
    async fn test_score_returns_full_report() {
        let (status, body) = post_score(json!({
            "resume_content": {
                "personalInfo": {"name": "Test User"},
                "skills": ["python", "docker", "aws"],
                "experience": [],
                "education": []
            },
            "jd_content": {
                "text": "Senior Python Developer with FastAPI, React, AWS, Docker, CI/CD",
                "primary_skills": ["python", "fastapi", "react", "aws", "docker"]
            }
        }))
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        let data = &body["data"];
        assert!(data["ats_score"]["overall_score"].is_number());
        assert_eq!(data["ats_score"]["breakdown"]["skill_match"], 60.0);
        assert!(data["gap_analysis"]["improvement_suggestions"]
            .as_array()
            .unwrap()
            .iter()
            .any(|s| s["title"] == "Missing Keyword: fastapi"));
        assert_eq!(
            data["interviewer_simulation"]["recruiter_perspective"]["recommendation"],
            "Needs Improvement"
        );
        assert_eq!(
            data["interviewer_simulation"]["likely_questions"]
                .as_array()
                .unwrap()
                .len(),
            3
        );
    }

    #[tokio::test]
    async fn test_short_jd_rejected() {
        let (status, body) = post_score(json!({
            "resume_content": {"skills": [], "experience": [], "education": []},
            "jd_content": {"text": "Rust engineer"}
        }))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_missing_resume_keys_rejected() {
        let (status, body) = post_score(json!({
            "resume_content": {"skills": ["Rust"]},
            "jd_content": {"text": "Senior Rust engineer building distributed systems with Tokio and Axum"}
        }))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_empty_resume_rejected() {
        let (status, _) = post_score(json!({
            "resume_content": {},
            "jd_content": {"text": "Senior Rust engineer building distributed systems with Tokio and Axum"}
        }))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
