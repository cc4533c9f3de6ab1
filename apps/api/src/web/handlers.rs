//! Axum route handlers for the HTML form.

use axum::{
    extract::State,
    http::HeaderMap,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use tracing::info;

use crate::advice::{AdviceOutcome, MISSING_GOAL_MESSAGE};
use crate::errors::AppError;
use crate::models::FitnessProfile;
use crate::session::{session_id_from_headers, ExportableAdvice};
use crate::state::AppState;
use crate::web::page::{render_page, PageView};
use crate::web::{pdf_attachment, with_session_cookie};

/// GET /
///
/// Renders the form, pre-filled from the session, with any advice it still holds.
pub async fn handle_index(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let (session_id, is_new) = state.sessions.resolve(session_id_from_headers(&headers));
    let ctx = state.sessions.get(session_id);

    let profile = ctx
        .as_ref()
        .and_then(|c| c.profile.clone())
        .unwrap_or_default();
    let advice = ctx.as_ref().and_then(|c| c.advice.as_deref());

    let html = render_page(&PageView {
        profile: &profile,
        advice,
        message: None,
    });
    with_session_cookie(Html(html).into_response(), session_id, is_new)
}

/// POST /advice
///
/// Flattens the submitted form into the profile string and asks the generator.
/// Completion failures are not caught here; they surface as the standard error body.
pub async fn handle_advice(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(profile): Form<FitnessProfile>,
) -> Result<Response, AppError> {
    profile.validate()?;
    let (session_id, is_new) = state.sessions.resolve(session_id_from_headers(&headers));

    let profile_string = profile.to_profile_string();

    let html = match state.generator.generate(&profile_string).await? {
        AdviceOutcome::Advice(advice) => {
            let html = render_page(&PageView {
                profile: &profile,
                advice: Some(&advice),
                message: None,
            });
            state.sessions.store_advice(session_id, Some(profile), advice);
            html
        }
        AdviceOutcome::MissingGoal => render_page(&PageView {
            profile: &profile,
            advice: None,
            message: Some(MISSING_GOAL_MESSAGE),
        }),
    };

    Ok(with_session_cookie(Html(html).into_response(), session_id, is_new))
}

/// POST /pdf
///
/// Exports the session's advice and clears it. Encoding failures propagate.
pub async fn handle_pdf(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    // Only an existing session can hold advice; never start one here.
    let session_id = session_id_from_headers(&headers).ok_or_else(no_advice)?;
    let ExportableAdvice { advice, profile } =
        state.sessions.take_advice(session_id).ok_or_else(no_advice)?;

    let renderer = state.renderer.clone();
    let text = advice.clone();
    let rendered = tokio::task::spawn_blocking(move || renderer.render(&text))
        .await
        .map_err(|e| AppError::Internal(e.into()))?;

    let bytes = match rendered {
        Ok(bytes) => bytes,
        Err(e) => {
            // Failed exports leave the advice in the session.
            state.sessions.store_advice(session_id, profile, advice);
            return Err(e.into());
        }
    };
    let name = profile.map(|p| p.name).unwrap_or_default();

    info!(session = %session_id, bytes = bytes.len(), "Plan PDF exported");
    pdf_attachment(bytes, &name)
}

/// POST /reset
///
/// Drops the session and starts over with an empty form.
pub async fn handle_reset(State(state): State<AppState>, headers: HeaderMap) -> Redirect {
    if let Some(session_id) = session_id_from_headers(&headers) {
        state.sessions.clear(session_id);
    }
    Redirect::to("/")
}

fn no_advice() -> AppError {
    AppError::NotFound("No advice in this session yet; press Get Advice first".to_string())
}
