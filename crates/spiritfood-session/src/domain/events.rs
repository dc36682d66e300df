//! Domain events for the Session context.

use serde::{Deserialize, Serialize};
use spiritfood_core::dimension::Contribution;
use spiritfood_core::event::{DomainEvent, EventMetadata};
use spiritfood_narrative::domain::scene::SceneId;
use spiritfood_narrative::domain::traversal::Transition;
use uuid::Uuid;

pub const ATTEMPT_STARTED_EVENT_TYPE: &str = "session.attempt_started";
pub const CHOICE_SELECTED_EVENT_TYPE: &str = "session.choice_selected";

/// Emitted when an attempt begins at the entry scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptStarted {
    pub attempt_id: Uuid,
    pub entry_scene_id: SceneId,
    /// Version hash of the quiz content the attempt was started against.
    pub content_version: String,
}

/// Emitted when a choice is taken.
///
/// Carries the contribution and the resolved transition so the score state
/// and traversal can be replayed without consulting the scene graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceSelected {
    pub attempt_id: Uuid,
    pub scene_id: SceneId,
    pub choice_label: String,
    pub contribution: Contribution,
    pub transition: Transition,
}

/// Event payload variants for the Session context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttemptEventKind {
    AttemptStarted(AttemptStarted),
    ChoiceSelected(ChoiceSelected),
}

/// Domain event envelope for the Session context.
#[derive(Debug, Clone)]
pub struct AttemptEvent {
    pub metadata: EventMetadata,
    pub kind: AttemptEventKind,
}

impl DomainEvent for AttemptEvent {
    fn event_type(&self) -> &'static str {
        match &self.kind {
            AttemptEventKind::AttemptStarted(_) => ATTEMPT_STARTED_EVENT_TYPE,
            AttemptEventKind::ChoiceSelected(_) => CHOICE_SELECTED_EVENT_TYPE,
        }
    }

    fn to_payload(&self) -> serde_json::Value {
        // Plain derived structs with string keys always serialize.
        serde_json::to_value(&self.kind).expect("AttemptEventKind serialization is infallible")
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
