//! Serialized shape of a quiz document.
//!
//! These types mirror the YAML one to one. Cross-references are checked
//! when the document is turned into a [`QuizCatalog`](super::catalog::QuizCatalog).

use std::collections::HashMap;

use serde::Deserialize;
use spiritfood_core::dimension::{AdventureAxis, TimeAxis};
use spiritfood_scoring::domain::personality::Personality;

fn default_multiplier() -> u32 {
    1
}

/// Top-level quiz document.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QuizDocument {
    pub entry_scene: String,
    #[serde(default)]
    pub total_scenes: Option<u32>,
    pub default_dish: String,
    pub dishes: Vec<String>,
    #[serde(default)]
    pub cuisines: HashMap<String, String>,
    /// Keyed by `"{adventure}_{time}"`.
    #[serde(default)]
    pub adjectives: HashMap<String, String>,
    pub personalities: HashMap<String, Personality>,
    pub scenes: Vec<SceneDocument>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneDocument {
    pub id: String,
    pub ordinal: u32,
    pub prompt: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub terminal: bool,
    #[serde(default)]
    pub choices: Vec<ChoiceDocument>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChoiceDocument {
    pub label: String,
    /// Scene id, or `end`.
    pub next: String,
    #[serde(default)]
    pub dishes: Vec<String>,
    #[serde(default)]
    pub time: Option<TimeAxis>,
    #[serde(default)]
    pub adventure: Option<AdventureAxis>,
    #[serde(default = "default_multiplier")]
    pub multiplier: u32,
    #[serde(default)]
    pub time_bonus: bool,
    #[serde(default)]
    pub adventure_bonus: bool,
}
