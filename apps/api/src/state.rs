use std::sync::Arc;

use crate::analysis_client::AnalysisBackend;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable analysis transport. Default: HttpAnalysisBackend.
    pub analysis: Arc<dyn AnalysisBackend>,
}
