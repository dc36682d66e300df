//! Routes for quiz attempts.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Json, Router, routing::get, routing::post};
use serde::{Deserialize, Serialize};
use spiritfood_core::command::Command;
use spiritfood_enrichment::application::enrich::{EnrichedResult, enrich_result};
use spiritfood_scoring::domain::reduction::QuizResult;
use spiritfood_session::application::command_handlers;
use spiritfood_session::application::query_handlers::{self, AttemptView};
use spiritfood_session::domain::commands;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /{id}/choices.
#[derive(Debug, Deserialize)]
pub struct SelectChoiceRequest {
    /// Label of the choice, exactly as presented.
    pub label: String,
}

/// Response body for GET /{id}/result.
#[derive(Debug, Serialize)]
pub struct ResultResponse {
    pub attempt_id: Uuid,
    pub completed: bool,
    pub result: QuizResult,
    /// Whether the personality text came from the enrichment service.
    pub enriched: bool,
    pub cached: bool,
}

/// POST /
#[instrument(skip(state))]
async fn start_attempt(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<AttemptView>), ApiError> {
    let command = commands::StartAttempt {
        correlation_id: Uuid::new_v4(),
    };

    info!(
        command_type = command.command_type(),
        correlation_id = %command.correlation_id,
        "handling start_attempt command"
    );

    let result = command_handlers::handle_start_attempt(
        &command,
        &state.catalog,
        state.clock.as_ref(),
        &*state.event_repository,
    )
    .await?;

    let view =
        query_handlers::get_attempt(result.aggregate_id, &state.catalog, &*state.event_repository)
            .await?;

    Ok((StatusCode::CREATED, Json(view)))
}

/// GET /{id}
#[instrument(skip(state))]
async fn get_attempt(
    State(state): State<AppState>,
    Path(attempt_id): Path<Uuid>,
) -> Result<Json<AttemptView>, ApiError> {
    let view =
        query_handlers::get_attempt(attempt_id, &state.catalog, &*state.event_repository).await?;
    Ok(Json(view))
}

/// POST /{id}/choices
#[instrument(skip(state, request), fields(label = %request.label))]
async fn select_choice(
    State(state): State<AppState>,
    Path(attempt_id): Path<Uuid>,
    Json(request): Json<SelectChoiceRequest>,
) -> Result<Json<AttemptView>, ApiError> {
    let command = commands::SelectChoice {
        correlation_id: Uuid::new_v4(),
        attempt_id,
        choice_label: request.label,
    };

    info!(
        command_type = command.command_type(),
        correlation_id = %command.correlation_id,
        "handling select_choice command"
    );

    command_handlers::handle_select_choice(
        &command,
        &state.catalog,
        state.clock.as_ref(),
        &*state.event_repository,
    )
    .await?;

    let view =
        query_handlers::get_attempt(attempt_id, &state.catalog, &*state.event_repository).await?;
    Ok(Json(view))
}

/// GET /{id}/result
///
/// Enrichment is only attempted for completed attempts.
#[instrument(skip(state))]
async fn get_result(
    State(state): State<AppState>,
    Path(attempt_id): Path<Uuid>,
) -> Result<Json<ResultResponse>, ApiError> {
    let view =
        query_handlers::get_attempt_result(attempt_id, &state.catalog, &*state.event_repository)
            .await?;

    let outcome = match (&state.enrichment, view.completed) {
        (Some(port), true) => {
            enrich_result(view.result, port.as_ref(), state.enrichment_timeout).await
        }
        _ => EnrichedResult::fallback(view.result),
    };

    Ok(Json(ResultResponse {
        attempt_id: view.attempt_id,
        completed: view.completed,
        result: outcome.result,
        enriched: outcome.enriched,
        cached: outcome.cached,
    }))
}

/// Returns the router for quiz attempts.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(start_attempt))
        .route("/{id}", get(get_attempt))
        .route("/{id}/choices", post(select_choice))
        .route("/{id}/result", get(get_result))
}
