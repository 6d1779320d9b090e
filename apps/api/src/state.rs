use std::sync::Arc;

use rolefit_core::ScoringConfig;

use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
/// Read-only after startup; handlers never mutate it.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Validated once at startup and shared by every scoring call.
    pub scoring: Arc<ScoringConfig>,
}

impl AppState {
    pub fn new(config: Config, scoring: ScoringConfig) -> Self {
        Self {
            config,
            scoring: Arc::new(scoring),
        }
    }
}
