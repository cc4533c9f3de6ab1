pub mod health;


use axum::{
    routing::{get, post},
    Router,
};

use crate::advice::handlers as advice_api;
use crate::state::AppState;
use crate::web::handlers as form;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Form page
        .route("/", get(form::handle_index))
        .route("/advice", post(form::handle_advice))
        .route("/pdf", post(form::handle_pdf))
        .route("/reset", post(form::handle_reset))
        // JSON API
        .route("/api/v1/advice", post(advice_api::handle_generate_advice))
        .route("/api/v1/advice/pdf", post(advice_api::handle_export_pdf))
        .with_state(state)
}
