//! Spirit Food API server entry point.

use std::sync::Arc;

use spiritfood_api::config::Config;
use spiritfood_api::error::AppError;
use spiritfood_api::state::AppState;
use spiritfood_content::application::loader::{builtin_catalog, load_catalog_from_path};
use spiritfood_core::clock::SystemClock;
use spiritfood_enrichment::infrastructure::http_client::HttpEnrichmentClient;
use spiritfood_event_store::memory_event_repository::InMemoryEventRepository;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting Spirit Food API server");

    let config = Config::from_env()?;

    // Broken content is fatal: never serve a partially valid quiz.
    let catalog = match &config.content_path {
        Some(path) => load_catalog_from_path(path)?,
        None => builtin_catalog()?,
    };

    let mut app_state = AppState::new(
        Arc::new(catalog),
        Arc::new(SystemClock),
        Arc::new(InMemoryEventRepository::with_max_streams(config.max_attempts)),
    );
    if let Some(url) = &config.enrichment_url {
        tracing::info!(%url, timeout_ms = config.enrichment_timeout.as_millis(), "enrichment enabled");
        let client = HttpEnrichmentClient::new(url, config.enrichment_timeout);
        app_state = app_state.with_enrichment(Arc::new(client), config.enrichment_timeout);
    }

    // TODO: Replace CorsLayer::permissive() with the presentation layer's origin.
    let app = spiritfood_api::build_router(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = config.socket_addr()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
