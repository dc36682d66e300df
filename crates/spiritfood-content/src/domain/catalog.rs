//! The validated, immutable quiz catalog.

use spiritfood_narrative::domain::graph::SceneGraph;
use spiritfood_scoring::domain::reduction::{QuizResult, reduce};
use spiritfood_scoring::domain::score_state::ScoreState;
use spiritfood_scoring::domain::tables::ResultTables;
use spiritfood_scoring::domain::vocabulary::DishVocabulary;

/// Everything an attempt needs: the scene graph, the dish vocabulary and
/// the result tables. Built once at startup and shared read-only.
#[derive(Debug, Clone)]
pub struct QuizCatalog {
    graph: SceneGraph,
    vocabulary: DishVocabulary,
    tables: ResultTables,
    version_hash: String,
}

impl QuizCatalog {
    /// Assembles a catalog from already-validated parts.
    #[must_use]
    pub fn new(
        graph: SceneGraph,
        vocabulary: DishVocabulary,
        tables: ResultTables,
        version_hash: String,
    ) -> Self {
        Self {
            graph,
            vocabulary,
            tables,
            version_hash,
        }
    }

    #[must_use]
    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    #[must_use]
    pub fn vocabulary(&self) -> &DishVocabulary {
        &self.vocabulary
    }

    #[must_use]
    pub fn tables(&self) -> &ResultTables {
        &self.tables
    }

    /// Hex SHA-256 of the source document.
    #[must_use]
    pub fn version_hash(&self) -> &str {
        &self.version_hash
    }

    /// A zeroed score state over this catalog's vocabulary.
    #[must_use]
    pub fn new_score_state(&self) -> ScoreState {
        ScoreState::new(&self.vocabulary)
    }

    /// Reduces `state` with this catalog's tables.
    #[must_use]
    pub fn reduce(&self, state: &ScoreState) -> QuizResult {
        reduce(state, &self.tables)
    }
}
