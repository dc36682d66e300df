//! The immutable scene graph.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use spiritfood_core::error::DomainError;
use tracing::warn;

use super::scene::{Choice, Scene, SceneId, Successor, TERMINATION_SENTINEL};
use super::traversal::Transition;

/// Progress through the quiz, for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    /// Ordinal of the current scene.
    pub current: u32,
    /// Number of scenes a player passes through.
    pub total: u32,
}

/// Directed graph of scenes, validated once at construction and never mutated.
#[derive(Debug, Clone)]
pub struct SceneGraph {
    entry: SceneId,
    scenes: HashMap<SceneId, Scene>,
    declared_order: Vec<SceneId>,
    total_scenes: u32,
}

impl SceneGraph {
    /// Builds and validates a scene graph.
    ///
    /// `total_scenes` defaults to the largest scene ordinal: branches share
    /// ordinals, so the scene count overstates the length of any one path.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Configuration` if the graph is empty, the entry
    /// scene is missing, ids or labels are duplicated, a scene uses the
    /// termination sentinel as its id, a non-terminal scene has no choices
    /// or names a successor that does not exist, or a scene is unreachable
    /// from the entry.
    pub fn new(
        entry: SceneId,
        scenes: Vec<Scene>,
        total_scenes: Option<u32>,
    ) -> Result<Self, DomainError> {
        if scenes.is_empty() {
            return Err(DomainError::Configuration(
                "scene graph has no scenes".to_owned(),
            ));
        }

        let mut declared_order = Vec::with_capacity(scenes.len());
        let mut by_id = HashMap::with_capacity(scenes.len());
        for scene in scenes {
            if scene.id.as_str() == TERMINATION_SENTINEL {
                return Err(DomainError::Configuration(format!(
                    "scene id {TERMINATION_SENTINEL:?} is reserved for the termination sentinel"
                )));
            }
            let mut labels = HashSet::new();
            for choice in &scene.choices {
                if !labels.insert(choice.label.as_str()) {
                    return Err(DomainError::Configuration(format!(
                        "scene {} has duplicate choice label {:?}",
                        scene.id, choice.label
                    )));
                }
            }
            declared_order.push(scene.id.clone());
            if let Some(previous) = by_id.insert(scene.id.clone(), scene) {
                return Err(DomainError::Configuration(format!(
                    "duplicate scene id {}",
                    previous.id
                )));
            }
        }

        let max_ordinal = by_id.values().map(|s| s.ordinal).max().unwrap_or(0);
        let graph = Self {
            entry,
            scenes: by_id,
            declared_order,
            total_scenes: total_scenes.unwrap_or(max_ordinal),
        };
        graph.validate()?;
        Ok(graph)
    }

    fn validate(&self) -> Result<(), DomainError> {
        if !self.scenes.contains_key(&self.entry) {
            return Err(DomainError::Configuration(format!(
                "entry scene {} does not exist",
                self.entry
            )));
        }

        for scene in self.scenes() {
            if scene.is_terminal {
                continue;
            }
            if scene.choices.is_empty() {
                return Err(DomainError::Configuration(format!(
                    "non-terminal scene {} has no choices",
                    scene.id
                )));
            }
            for choice in &scene.choices {
                if let Successor::Scene(next) = &choice.next {
                    if !self.scenes.contains_key(next) {
                        return Err(DomainError::Configuration(format!(
                            "choice {:?} in scene {} leads to missing scene {next}",
                            choice.label, scene.id
                        )));
                    }
                }
            }
        }

        let reachable = self.reachable();
        if let Some(orphan) = self.declared_order.iter().find(|id| !reachable.contains(id)) {
            return Err(DomainError::Configuration(format!(
                "scene {orphan} is unreachable from entry scene {}",
                self.entry
            )));
        }

        if let Some(scene_id) = self.first_cycle() {
            warn!(%scene_id, "scene graph contains a cycle; no intended path may take it");
        }

        Ok(())
    }

    /// Outgoing edges actually followed during traversal.
    fn successors<'a>(&'a self, scene: &'a Scene) -> impl Iterator<Item = &'a SceneId> + 'a {
        scene
            .choices
            .iter()
            .filter(move |_| !scene.is_terminal)
            .filter_map(|c| match &c.next {
                Successor::Scene(id) => Some(id),
                Successor::Terminate => None,
            })
    }

    fn reachable(&self) -> HashSet<&SceneId> {
        let mut seen = HashSet::new();
        let mut stack = vec![&self.entry];
        while let Some(id) = stack.pop() {
            if !seen.insert(id) {
                continue;
            }
            if let Some(scene) = self.scenes.get(id) {
                stack.extend(self.successors(scene));
            }
        }
        seen
    }

    fn successors_of(&self, id: &SceneId) -> Vec<&SceneId> {
        self.scenes
            .get(id)
            .map(|scene| self.successors(scene).collect())
            .unwrap_or_default()
    }

    /// Returns a scene that lies on a cycle, if any.
    ///
    /// Depth-first with an explicit stack, so arbitrarily long chains from
    /// user-supplied content cannot exhaust the call stack.
    fn first_cycle(&self) -> Option<&SceneId> {
        #[derive(Clone, Copy, PartialEq)]
        enum Mark {
            Visiting,
            Done,
        }

        let mut marks: HashMap<&SceneId, Mark> = HashMap::new();
        marks.insert(&self.entry, Mark::Visiting);
        let mut stack = vec![(&self.entry, self.successors_of(&self.entry).into_iter())];

        while let Some((id, pending)) = stack.last_mut() {
            let id = *id;
            match pending.next() {
                Some(next) => match marks.get(next) {
                    Some(Mark::Visiting) => return Some(next),
                    Some(Mark::Done) => {}
                    None => {
                        marks.insert(next, Mark::Visiting);
                        stack.push((next, self.successors_of(next).into_iter()));
                    }
                },
                None => {
                    marks.insert(id, Mark::Done);
                    stack.pop();
                }
            }
        }
        None
    }

    /// The configured entry scene.
    #[must_use]
    pub fn entry(&self) -> &SceneId {
        &self.entry
    }

    /// Number of scenes a player passes through, for progress display.
    #[must_use]
    pub fn total_scenes(&self) -> u32 {
        self.total_scenes
    }

    /// Number of scene nodes in the graph.
    #[must_use]
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    /// Always false: construction rejects empty graphs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// Scenes in declaration order.
    pub fn scenes(&self) -> impl Iterator<Item = &Scene> {
        self.declared_order.iter().filter_map(|id| self.scenes.get(id))
    }

    /// Looks up a scene by id.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Configuration` if the id is not in the graph.
    /// A missing scene means the configuration is broken; callers must not
    /// substitute another scene.
    pub fn current_scene(&self, id: &SceneId) -> Result<&Scene, DomainError> {
        self.scenes
            .get(id)
            .ok_or_else(|| DomainError::Configuration(format!("scene not found: {id}")))
    }

    /// The choices of a scene, in presentation order.
    #[must_use]
    pub fn choices_of<'a>(&self, scene: &'a Scene) -> &'a [Choice] {
        &scene.choices
    }

    /// Resolves where taking `choice` in `scene` leads.
    ///
    /// A terminal scene ends the quiz whatever the choice's nominal
    /// successor says.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Configuration` if the successor scene is not in
    /// the graph.
    pub fn resolve(&self, scene: &Scene, choice: &Choice) -> Result<Transition, DomainError> {
        if scene.is_terminal {
            return Ok(Transition::Terminate);
        }
        match &choice.next {
            Successor::Terminate => Ok(Transition::Terminate),
            Successor::Scene(id) => {
                let next = self.current_scene(id)?;
                Ok(Transition::Advance(next.id.clone()))
            }
        }
    }

    /// Progress when `scene` is on screen.
    #[must_use]
    pub fn progress(&self, scene: &Scene) -> Progress {
        Progress {
            current: scene.ordinal,
            total: self.total_scenes,
        }
    }
}
