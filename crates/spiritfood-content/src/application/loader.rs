//! Loads quiz documents into a [`QuizCatalog`].
//!
//! All cross-reference checks happen here, before any attempt can start.
//! Problems that make the quiz unplayable are `DomainError::Configuration`;
//! gaps covered by a fallback value are logged and accepted.

use std::collections::HashMap;
use std::path::Path;

use sha2::{Digest, Sha256};
use spiritfood_core::dimension::Contribution;
use spiritfood_core::error::DomainError;
use spiritfood_narrative::domain::graph::SceneGraph;
use spiritfood_narrative::domain::scene::{Choice, Scene, SceneId, Successor};
use spiritfood_scoring::domain::tables::{ResultTables, parse_adjective_key};
use spiritfood_scoring::domain::vocabulary::DishVocabulary;
use tracing::{debug, info, warn};

use crate::domain::catalog::QuizCatalog;
use crate::domain::schema::{ChoiceDocument, QuizDocument, SceneDocument};

/// Source text of the built-in "Spirit Food" quiz.
pub const BUILTIN_QUIZ_YAML: &str = include_str!("../../content/spirit_food.yaml");

/// Hex-encoded SHA-256 of a document's source text.
#[must_use]
pub fn content_hash(source: &str) -> String {
    format!("{:x}", Sha256::digest(source.as_bytes()))
}

/// Loads the built-in quiz.
///
/// # Errors
///
/// Returns `DomainError::Configuration` if the bundled document is invalid.
pub fn builtin_catalog() -> Result<QuizCatalog, DomainError> {
    load_catalog_from_str(BUILTIN_QUIZ_YAML)
}

/// Reads and loads a quiz document from disk.
///
/// # Errors
///
/// Returns `DomainError::Configuration` if the file cannot be read or the
/// document is invalid.
pub fn load_catalog_from_path(path: impl AsRef<Path>) -> Result<QuizCatalog, DomainError> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path).map_err(|e| {
        DomainError::Configuration(format!("cannot read quiz document {}: {e}", path.display()))
    })?;
    info!(path = %path.display(), "loading quiz document");
    load_catalog_from_str(&source)
}

/// Parses and validates a quiz document.
///
/// # Errors
///
/// Returns `DomainError::Configuration` if the YAML is malformed, an axis
/// label or adjective key is unknown, a multiplier is 0, the default dish
/// has no personality, or the scene graph fails validation.
pub fn load_catalog_from_str(source: &str) -> Result<QuizCatalog, DomainError> {
    let document: QuizDocument = serde_yaml::from_str(source)
        .map_err(|e| DomainError::Configuration(format!("malformed quiz document: {e}")))?;
    let catalog = build_catalog(document, content_hash(source))?;
    info!(
        version_hash = %catalog.version_hash(),
        scenes = catalog.graph().len(),
        dishes = catalog.vocabulary().len(),
        "quiz catalog loaded"
    );
    Ok(catalog)
}

fn build_catalog(document: QuizDocument, version_hash: String) -> Result<QuizCatalog, DomainError> {
    let vocabulary = DishVocabulary::new(document.dishes)?;

    let mut adjectives = HashMap::with_capacity(document.adjectives.len());
    for (key, adjective) in document.adjectives {
        adjectives.insert(parse_adjective_key(&key)?, adjective);
    }

    for dish in document.personalities.keys() {
        if !vocabulary.contains(dish) {
            debug!(%dish, "personality for a dish outside the vocabulary");
        }
    }

    let tables = ResultTables::new(
        document.cuisines,
        adjectives,
        document.personalities,
        document.default_dish,
    )?;
    for (adventure, time) in tables.missing_adjectives() {
        warn!(%adventure, %time, "no adjective for axis pair, fallback will be used");
    }
    for dish in tables.dishes_without_cuisine(&vocabulary) {
        warn!(%dish, "no cuisine for dish, fallback will be used");
    }

    let scenes = document
        .scenes
        .into_iter()
        .map(|scene| build_scene(scene, &vocabulary))
        .collect::<Result<Vec<_>, _>>()?;
    let graph = SceneGraph::new(
        SceneId::new(document.entry_scene),
        scenes,
        document.total_scenes,
    )?;

    Ok(QuizCatalog::new(graph, vocabulary, tables, version_hash))
}

fn build_scene(scene: SceneDocument, vocabulary: &DishVocabulary) -> Result<Scene, DomainError> {
    let id = SceneId::new(scene.id);
    let choices = scene
        .choices
        .into_iter()
        .map(|choice| build_choice(&id, choice, vocabulary))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Scene {
        id,
        ordinal: scene.ordinal,
        prompt: scene.prompt,
        image: scene.image,
        is_terminal: scene.terminal,
        choices,
    })
}

fn build_choice(
    scene_id: &SceneId,
    choice: ChoiceDocument,
    vocabulary: &DishVocabulary,
) -> Result<Choice, DomainError> {
    if choice.multiplier == 0 {
        return Err(DomainError::Configuration(format!(
            "choice {:?} in scene {scene_id} has multiplier 0",
            choice.label
        )));
    }
    for dish in choice.dishes.iter().filter(|d| !vocabulary.contains(d)) {
        warn!(%scene_id, label = %choice.label, %dish, "dish tag outside the vocabulary is ignored");
    }
    Ok(Choice {
        next: Successor::from(choice.next.as_str()),
        label: choice.label,
        contribution: Contribution {
            dishes: choice.dishes,
            time: choice.time,
            adventure: choice.adventure,
            multiplier: choice.multiplier,
            time_bonus: choice.time_bonus,
            adventure_bonus: choice.adventure_bonus,
        },
    })
}
