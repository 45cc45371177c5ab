use std::sync::Arc;

use crate::linkedin::LinkedInClient;
use crate::pipeline::agents::PostAgents;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub linkedin: LinkedInClient,
    /// Pluggable pipeline steps. Production: `LlmAgents`; tests script them.
    pub agents: Arc<dyn PostAgents>,
}
