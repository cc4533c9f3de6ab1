use std::sync::Arc;

use crate::advice::AdviceGenerator;
use crate::export::DocumentRenderer;
use crate::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub generator: AdviceGenerator,
    /// Pluggable document backend. Default: `PdfRenderer`.
    pub renderer: Arc<dyn DocumentRenderer>,
    pub sessions: SessionStore,
}
