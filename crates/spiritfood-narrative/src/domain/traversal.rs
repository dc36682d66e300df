//! Traversal state machine over a [`SceneGraph`].
//!
//! States are one per scene plus an absorbing `Terminated`. The only input
//! is "choice selected by label". There is no backward navigation: a retake
//! starts a fresh traversal.

use serde::{Deserialize, Serialize};
use spiritfood_core::error::DomainError;

use super::graph::SceneGraph;
use super::scene::{Choice, Scene, SceneId};

/// The resolved effect of taking a choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "scene_id", rename_all = "snake_case")]
pub enum Transition {
    /// Move to the named scene.
    Advance(SceneId),
    /// End the quiz.
    Terminate,
}

/// Where the traversal currently is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraversalState {
    /// Showing a scene.
    AtScene(SceneId),
    /// Quiz finished.
    Terminated,
}

/// One step of the player's path, for replay and debugging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Scene the choice was made in.
    pub scene_id: SceneId,
    /// Label of the choice taken.
    pub choice_label: String,
}

/// A validated step: the choice found in the current scene and where it
/// leads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step<'g> {
    /// The scene the choice belongs to.
    pub scene: &'g Scene,
    /// The selected choice.
    pub choice: &'g Choice,
    /// Where the choice leads.
    pub transition: Transition,
}

/// Position in the scene graph plus the append-only path taken so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Traversal {
    state: TraversalState,
    history: Vec<HistoryEntry>,
}

impl Traversal {
    /// Starts a traversal at the graph's entry scene.
    #[must_use]
    pub fn start(graph: &SceneGraph) -> Self {
        Self::at(graph.entry().clone())
    }

    /// Starts a traversal at an explicit scene, e.g. when replaying events.
    #[must_use]
    pub fn at(scene_id: SceneId) -> Self {
        Self {
            state: TraversalState::AtScene(scene_id),
            history: Vec::new(),
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &TraversalState {
        &self.state
    }

    /// Whether the absorbing state has been reached.
    #[must_use]
    pub fn is_terminated(&self) -> bool {
        self.state == TraversalState::Terminated
    }

    /// The path taken so far.
    #[must_use]
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// The scene on screen, or `None` once terminated.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Configuration` if the current scene id is not
    /// in the graph.
    pub fn current_scene<'g>(&self, graph: &'g SceneGraph) -> Result<Option<&'g Scene>, DomainError> {
        match &self.state {
            TraversalState::AtScene(id) => graph.current_scene(id).map(Some),
            TraversalState::Terminated => Ok(None),
        }
    }

    /// Finds the labelled choice in the current scene and resolves where it
    /// leads, without changing state.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the traversal has terminated or
    /// the current scene has no such label, and `DomainError::Configuration`
    /// if the graph does not contain a scene it should.
    pub fn plan<'g>(&self, graph: &'g SceneGraph, label: &str) -> Result<Step<'g>, DomainError> {
        let Some(scene) = self.current_scene(graph)? else {
            return Err(DomainError::Validation(
                "quiz has already finished".to_owned(),
            ));
        };
        let choice = scene.choice(label).ok_or_else(|| {
            DomainError::Validation(format!(
                "scene {} has no choice labelled {label:?}",
                scene.id
            ))
        })?;
        let transition = graph.resolve(scene, choice)?;
        Ok(Step {
            scene,
            choice,
            transition,
        })
    }

    /// Records a step: appends to history and moves to the next state.
    pub fn record(&mut self, scene_id: SceneId, choice_label: String, transition: Transition) {
        self.history.push(HistoryEntry {
            scene_id,
            choice_label,
        });
        self.state = match transition {
            Transition::Advance(next) => TraversalState::AtScene(next),
            Transition::Terminate => TraversalState::Terminated,
        };
    }

    /// Plans and records a step in one go.
    ///
    /// # Errors
    ///
    /// See [`Traversal::plan`]. State is unchanged on error.
    pub fn select<'g>(&mut self, graph: &'g SceneGraph, label: &str) -> Result<Step<'g>, DomainError> {
        let step = self.plan(graph, label)?;
        self.record(
            step.scene.id.clone(),
            step.choice.label.clone(),
            step.transition.clone(),
        );
        Ok(step)
    }
}
