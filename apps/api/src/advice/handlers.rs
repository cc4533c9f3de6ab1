//! Axum route handlers for the JSON advice API.
//!
//! These are stateless: the caller keeps the advice text and sends it back for export.

use axum::{extract::State, response::Response, Json};
use serde::{Deserialize, Serialize};

use crate::advice::{AdviceOutcome, MISSING_GOAL_MESSAGE};
use crate::errors::AppError;
use crate::models::FitnessProfile;
use crate::state::AppState;
use crate::web::pdf_attachment;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Either a structured profile or an already flattened profile string.
/// A structured profile wins when both are sent.
#[derive(Debug, Deserialize)]
pub struct AdviceRequest {
    pub profile: Option<FitnessProfile>,
    pub profile_string: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AdviceResponse {
    pub profile_string: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advice: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PdfRequest {
    pub advice: String,
    #[serde(default)]
    pub name: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/advice
pub async fn handle_generate_advice(
    State(state): State<AppState>,
    Json(request): Json<AdviceRequest>,
) -> Result<Json<AdviceResponse>, AppError> {
    let profile_string = match (request.profile, request.profile_string) {
        (Some(profile), _) => {
            profile.validate()?;
            profile.to_profile_string()
        }
        (None, Some(text)) => text,
        (None, None) => String::new(),
    };

    let response = match state.generator.generate(&profile_string).await? {
        AdviceOutcome::Advice(advice) => AdviceResponse {
            profile_string,
            advice: Some(advice),
            message: None,
        },
        AdviceOutcome::MissingGoal => AdviceResponse {
            profile_string,
            advice: None,
            message: Some(MISSING_GOAL_MESSAGE.to_string()),
        },
    };

    Ok(Json(response))
}

/// POST /api/v1/advice/pdf
///
/// Renders the supplied advice text; responds with the PDF as an attachment.
pub async fn handle_export_pdf(
    State(state): State<AppState>,
    Json(request): Json<PdfRequest>,
) -> Result<Response, AppError> {
    let renderer = state.renderer.clone();
    let advice = request.advice;
    let bytes = tokio::task::spawn_blocking(move || renderer.render(&advice))
        .await
        .map_err(|e| AppError::Internal(e.into()))??;

    pdf_attachment(bytes, &request.name)
}
