//! Spirit Food API: library surface shared by the binary and its tests.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use axum::Router;

/// Builds the full router: health at the root, attempts under `/api/v1`.
pub fn build_router(state: state::AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/attempts", routes::attempts::router())
        .with_state(state)
}
