//! Axum route handlers for the analysis and chat endpoints.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::analysis::chat::respond_to_chat;
use crate::analysis::scoring::{analyze, AnalysisReport};
use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::extract::extract_text;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// A report previously returned by /analyze. The client retains it;
    /// nothing is stored server-side.
    pub analysis: Option<AnalysisReport>,
    pub question: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub answer: String,
}

/// POST /analyze
///
/// Multipart form: `resume_text` / `job_text` fields, optionally overridden
/// by uploaded `resume` / `job` documents. Requires a bearer token.
pub async fn handle_analyze(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    mut multipart: Multipart,
) -> Result<Json<AnalysisReport>, AppError> {
    let mut resume_text = String::new();
    let mut job_text = String::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart payload: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resume_text" => {
                resume_text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid resume_text field: {e}")))?;
            }
            "job_text" => {
                job_text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid job_text field: {e}")))?;
            }
            "resume" | "job" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid {name} upload: {e}")))?;
                // An uploaded document replaces the corresponding text field
                if !file_name.is_empty() && !data.is_empty() {
                    let text = extract_text(&file_name, &data);
                    if name == "resume" {
                        resume_text = text;
                    } else {
                        job_text = text;
                    }
                }
            }
            _ => {}
        }
    }

    tracing::info!(
        user = %user.email,
        resume_chars = resume_text.len(),
        job_chars = job_text.len(),
        "Analysis requested"
    );

    let report = analyze(
        &resume_text,
        &job_text,
        &state.vocabulary,
        &state.weights,
        state.model.as_ref(),
    )?;

    Ok(Json(report))
}

/// POST /chat
///
/// Answers a free-text question about a previously returned report.
pub async fn handle_chat(
    AuthUser(user): AuthUser,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let report = request.analysis.ok_or(AppError::ChatContextMissing)?;

    tracing::debug!(user = %user.email, "Chat question received");

    Ok(Json(ChatResponse {
        answer: respond_to_chat(&report, &request.question),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_without_analysis_deserializes_to_none() {
        let request: ChatRequest =
            serde_json::from_str(r#"{"question": "am i ready?"}"#).unwrap();
        assert!(request.analysis.is_none());
        assert_eq!(request.question, "am i ready?");
    }

    #[test]
    fn test_chat_request_round_trips_a_report() {
        let raw = r#"{
            "question": "how can i improve?",
            "analysis": {
                "final_score": 2.0,
                "score_breakdown": {
                    "skill_match_percent": 50.0,
                    "keyword_coverage_percent": 25.0,
                    "semantic_similarity": 0.0,
                    "model_probability_score": 0.0
                },
                "matched_skills": ["python"],
                "missing_skills": ["sql"],
                "years_experience_estimate": 0.0,
                "recommendations": []
            }
        }"#;
        let request: ChatRequest = serde_json::from_str(raw).unwrap();
        let report = request.analysis.unwrap();
        assert_eq!(report.matched_skills, vec!["python"]);
        assert_eq!(report.score_breakdown.skill_match_percent, 50.0);
    }
}
