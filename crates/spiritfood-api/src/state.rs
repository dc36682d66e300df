//! Shared application state.

use std::sync::Arc;
use std::time::Duration;

use spiritfood_content::domain::catalog::QuizCatalog;
use spiritfood_core::clock::Clock;
use spiritfood_core::repository::EventRepository;
use spiritfood_enrichment::application::enrich::DEFAULT_ENRICHMENT_TIMEOUT;
use spiritfood_enrichment::domain::port::EnrichmentPort;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Validated quiz content, read-only for the life of the process.
    pub catalog: Arc<QuizCatalog>,
    pub clock: Arc<dyn Clock>,
    pub event_repository: Arc<dyn EventRepository>,
    /// `None` when no enrichment service is configured.
    pub enrichment: Option<Arc<dyn EnrichmentPort>>,
    pub enrichment_timeout: Duration,
}

impl AppState {
    /// Creates state with enrichment disabled.
    #[must_use]
    pub fn new(
        catalog: Arc<QuizCatalog>,
        clock: Arc<dyn Clock>,
        event_repository: Arc<dyn EventRepository>,
    ) -> Self {
        Self {
            catalog,
            clock,
            event_repository,
            enrichment: None,
            enrichment_timeout: DEFAULT_ENRICHMENT_TIMEOUT,
        }
    }

    /// Enables enrichment through `port`, bounded by `timeout`.
    #[must_use]
    pub fn with_enrichment(mut self, port: Arc<dyn EnrichmentPort>, timeout: Duration) -> Self {
        self.enrichment = Some(port);
        self.enrichment_timeout = timeout;
        self
    }
}
