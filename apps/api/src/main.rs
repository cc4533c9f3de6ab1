mod advice;
mod config;
mod errors;
mod export;
mod llm_client;
mod models;
mod routes;
mod session;
mod state;
mod web;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::advice::AdviceGenerator;
use crate::config::Config;
use crate::export::{default_page_layout, PdfRenderer};
use crate::llm_client::build_completion_service;
use crate::routes::build_router;
use crate::session::SessionStore;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing API credentials)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting AI Fitness Trainer v{}", env!("CARGO_PKG_VERSION"));

    // Initialize completion service
    let completion = build_completion_service(&config)?;
    let generator = AdviceGenerator::new(completion);
    info!(
        "Completion service initialized (provider: {}, model: {}, timeout: {:?})",
        config.provider.as_str(),
        generator.model(),
        config.request_timeout
    );

    // PDF exporter: A4, Helvetica 12pt
    let page_layout = default_page_layout();
    info!(
        "PDF layout: {}x{}mm, {}pt, {} lines per page",
        page_layout.page_width_mm,
        page_layout.page_height_mm,
        page_layout.font_size_pt,
        page_layout.lines_per_page()
    );

    let state = AppState {
        generator,
        renderer: Arc::new(PdfRenderer::new(page_layout)),
        sessions: SessionStore::new(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
