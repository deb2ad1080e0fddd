use std::sync::Arc;

use crate::config::Config;
use crate::export::PdfExporter;
use crate::llm_client::CompletionProvider;
use crate::onboarding::OnboardingGate;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Completion backend. Default: `LlmClient` against the configured endpoint.
    pub completion: Arc<dyn CompletionProvider>,
    /// Ordered PDF strategies: HTML snapshot, then direct drawing.
    pub exporter: Arc<PdfExporter>,
    pub onboarding: Arc<OnboardingGate>,
}
