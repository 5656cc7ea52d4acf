use std::sync::Arc;

use crate::scoring::engine::ScoringEngine;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Stateless scoring engine, constructed once at startup.
    pub engine: Arc<ScoringEngine>,
}
