//! Scenes, choices and successor references.

use std::fmt;

use serde::{Deserialize, Serialize};
use spiritfood_core::dimension::Contribution;

/// The `next` value that ends the quiz instead of naming a scene.
pub const TERMINATION_SENTINEL: &str = "end";

/// Stable scene identifier. Strings allow branch names such as `3A`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SceneId(String);

impl SceneId {
    /// Wraps a scene identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SceneId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Where a choice leads, as written in configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Successor {
    /// Another scene.
    Scene(SceneId),
    /// The termination sentinel.
    Terminate,
}

impl From<&str> for Successor {
    fn from(next: &str) -> Self {
        if next == TERMINATION_SENTINEL {
            Self::Terminate
        } else {
            Self::Scene(SceneId::new(next))
        }
    }
}

/// One selectable option within a scene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    /// Label shown to the player; unique within its scene.
    pub label: String,
    /// Nominal successor. Ignored when the owning scene is terminal.
    pub next: Successor,
    /// Scoring contribution applied when the choice is taken.
    pub contribution: Contribution,
}

/// One prompt in the quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scene {
    /// Scene identifier.
    pub id: SceneId,
    /// 1-based position, for progress display only. Never used for routing.
    pub ordinal: u32,
    /// Prompt text.
    pub prompt: String,
    /// Optional image asset reference for the presentation layer.
    pub image: Option<String>,
    /// Every choice of a terminal scene ends the quiz.
    pub is_terminal: bool,
    /// Choices in presentation order.
    pub choices: Vec<Choice>,
}

impl Scene {
    /// Finds a choice by its label.
    #[must_use]
    pub fn choice(&self, label: &str) -> Option<&Choice> {
        self.choices.iter().find(|c| c.label == label)
    }

    /// Choice labels in presentation order.
    pub fn choice_labels(&self) -> impl Iterator<Item = &str> {
        self.choices.iter().map(|c| c.label.as_str())
    }
}
