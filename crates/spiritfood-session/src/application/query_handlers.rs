//! Query handlers for the Session context.
//!
//! Queries replay an attempt and return read-only view DTOs. Nothing here
//! appends events.

use serde::Serialize;
use spiritfood_content::domain::catalog::QuizCatalog;
use spiritfood_core::aggregate::AggregateRoot;
use spiritfood_core::error::DomainError;
use spiritfood_core::repository::EventRepository;
use spiritfood_narrative::domain::graph::Progress;
use spiritfood_narrative::domain::scene::{Scene, SceneId};
use spiritfood_narrative::domain::traversal::HistoryEntry;
use spiritfood_scoring::domain::reduction::QuizResult;
use uuid::Uuid;

use crate::application::command_handlers::load_attempt;

/// Whether an attempt still accepts choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttemptStatus {
    Active,
    Completed,
}

/// The scene currently on screen.
#[derive(Debug, Clone, Serialize)]
pub struct SceneView {
    pub id: SceneId,
    pub prompt: String,
    pub image: Option<String>,
    /// Choice labels in presentation order.
    pub choices: Vec<String>,
    pub progress: Progress,
}

impl SceneView {
    fn of(scene: &Scene, catalog: &QuizCatalog) -> Self {
        Self {
            id: scene.id.clone(),
            prompt: scene.prompt.clone(),
            image: scene.image.clone(),
            choices: scene.choice_labels().map(str::to_owned).collect(),
            progress: catalog.graph().progress(scene),
        }
    }
}

/// Read-only view of a quiz attempt.
#[derive(Debug, Clone, Serialize)]
pub struct AttemptView {
    /// The attempt identifier.
    pub attempt_id: Uuid,
    pub status: AttemptStatus,
    /// `None` once the attempt is completed.
    pub scene: Option<SceneView>,
    /// Every choice taken, oldest first.
    pub history: Vec<HistoryEntry>,
    /// Version hash of the content the attempt started against.
    pub content_version: Option<String>,
    /// Current version (event count).
    pub version: i64,
}

/// The attempt's result. While the attempt is active the result is
/// speculative: it reduces the scores accumulated so far.
#[derive(Debug, Clone, Serialize)]
pub struct AttemptResultView {
    pub attempt_id: Uuid,
    pub completed: bool,
    pub result: QuizResult,
}

/// Retrieves an attempt's current scene, progress and history.
///
/// # Errors
///
/// Returns `DomainError::AggregateNotFound` if no events exist for the ID,
/// `DomainError::Infrastructure` if event decoding fails, and
/// `DomainError::Configuration` if the current scene is missing from the
/// catalog.
pub async fn get_attempt(
    attempt_id: Uuid,
    catalog: &QuizCatalog,
    repo: &dyn EventRepository,
) -> Result<AttemptView, DomainError> {
    let attempt = load_attempt(attempt_id, catalog, repo).await?;
    let Some(traversal) = attempt.traversal() else {
        return Err(DomainError::Infrastructure(format!(
            "attempt {attempt_id} has events but never started"
        )));
    };

    let scene = traversal
        .current_scene(catalog.graph())?
        .map(|scene| SceneView::of(scene, catalog));

    Ok(AttemptView {
        attempt_id,
        status: if attempt.is_completed() {
            AttemptStatus::Completed
        } else {
            AttemptStatus::Active
        },
        scene,
        history: traversal.history().to_vec(),
        content_version: attempt.content_version().map(str::to_owned),
        version: attempt.version(),
    })
}

/// Reduces an attempt's scores to its result.
///
/// # Errors
///
/// Returns `DomainError::AggregateNotFound` if no events exist for the ID,
/// and `DomainError::Infrastructure` if event decoding fails.
pub async fn get_attempt_result(
    attempt_id: Uuid,
    catalog: &QuizCatalog,
    repo: &dyn EventRepository,
) -> Result<AttemptResultView, DomainError> {
    let attempt = load_attempt(attempt_id, catalog, repo).await?;
    Ok(AttemptResultView {
        attempt_id,
        completed: attempt.is_completed(),
        result: catalog.reduce(attempt.scores()),
    })
}
