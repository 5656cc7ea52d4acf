//! Axum route handlers for the Scoring API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::scoring::document::{JobDescription, ResumeDocument};
use crate::scoring::engine::Evaluation;
use crate::state::AppState;

const MIN_JD_CHARS: usize = 50;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub resume_content: Value,
    pub jd_content: JobDescription,
}

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    pub success: bool,
    pub data: Evaluation,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resumes/score
///
/// Scores a resume against a JD: ATS score with breakdown, gap analysis,
/// and the recruiter scan simulation.
pub async fn handle_score(
    State(state): State<AppState>,
    Json(request): Json<ScoreRequest>,
) -> Result<Json<ScoreResponse>, AppError> {
    let is_empty = match &request.resume_content {
        Value::Object(map) => map.is_empty(),
        Value::Null => true,
        _ => false,
    };
    if is_empty {
        return Err(AppError::Validation(
            "Resume content cannot be empty".to_string(),
        ));
    }

    if request.jd_content.text.trim().chars().count() < MIN_JD_CHARS {
        return Err(AppError::Validation(format!(
            "Job description must be at least {MIN_JD_CHARS} characters"
        )));
    }

    let resume = ResumeDocument::from_value(request.resume_content)?;
    let jd = request.jd_content;

    let engine = state.engine.clone();
    let data = tokio::task::spawn_blocking(move || engine.evaluate(&resume, &jd))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("scoring task failed: {e}")))?;

    info!(
        overall_score = data.ats_score.overall_score,
        match_score = data.gap_analysis.overall_match_score,
        gaps = data.gap_analysis.missing_skills.len(),
        "resume scored"
    );

    Ok(Json(ScoreResponse {
        success: true,
        data,
    }))
}
