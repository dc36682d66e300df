//! Aggregate roots for the Session context.

use spiritfood_core::aggregate::AggregateRoot;
use spiritfood_core::clock::Clock;
use spiritfood_core::error::DomainError;
use spiritfood_core::event::EventMetadata;
use spiritfood_narrative::domain::graph::SceneGraph;
use spiritfood_narrative::domain::scene::SceneId;
use spiritfood_narrative::domain::traversal::Traversal;
use spiritfood_scoring::domain::score_state::ScoreState;
use spiritfood_scoring::domain::vocabulary::DishVocabulary;
use uuid::Uuid;

use super::events::{
    ATTEMPT_STARTED_EVENT_TYPE, AttemptEvent, AttemptEventKind, AttemptStarted,
    CHOICE_SELECTED_EVENT_TYPE, ChoiceSelected,
};

/// One player's run through the quiz.
///
/// Owns its score state exclusively; concurrent attempts never share
/// accumulators.
#[derive(Debug)]
pub struct QuizAttempt {
    /// Aggregate identifier.
    pub id: Uuid,
    /// Current version (event count).
    pub(crate) version: i64,
    /// `None` until the attempt has started.
    pub(crate) traversal: Option<Traversal>,
    pub(crate) scores: ScoreState,
    pub(crate) content_version: Option<String>,
    uncommitted_events: Vec<AttemptEvent>,
}

impl QuizAttempt {
    /// Creates an unstarted attempt with zeroed scores over `vocabulary`.
    #[must_use]
    pub fn new(id: Uuid, vocabulary: &DishVocabulary) -> Self {
        Self {
            id,
            version: 0,
            traversal: None,
            scores: ScoreState::new(vocabulary),
            content_version: None,
            uncommitted_events: Vec::new(),
        }
    }

    /// Starts the attempt at `entry_scene_id`, producing an `AttemptStarted`
    /// event.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the attempt has already started.
    pub fn start(
        &mut self,
        entry_scene_id: SceneId,
        content_version: &str,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        if self.traversal.is_some() || !self.uncommitted_events.is_empty() {
            return Err(DomainError::Validation(format!(
                "attempt {} has already started",
                self.id
            )));
        }

        let event = AttemptEvent {
            metadata: EventMetadata::for_command(
                ATTEMPT_STARTED_EVENT_TYPE,
                self.id,
                self.next_sequence_number(),
                correlation_id,
                clock.now(),
            ),
            kind: AttemptEventKind::AttemptStarted(AttemptStarted {
                attempt_id: self.id,
                entry_scene_id,
                content_version: content_version.to_owned(),
            }),
        };
        self.uncommitted_events.push(event);
        Ok(())
    }

    /// Takes the labelled choice in the current scene, producing a
    /// `ChoiceSelected` event.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the attempt has not started, has
    /// finished, or the current scene has no such label.
    pub fn select_choice(
        &mut self,
        graph: &SceneGraph,
        choice_label: &str,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        let Some(traversal) = &self.traversal else {
            return Err(DomainError::Validation(format!(
                "attempt {} has not started",
                self.id
            )));
        };
        let step = traversal.plan(graph, choice_label)?;

        let event = AttemptEvent {
            metadata: EventMetadata::for_command(
                CHOICE_SELECTED_EVENT_TYPE,
                self.id,
                self.next_sequence_number(),
                correlation_id,
                clock.now(),
            ),
            kind: AttemptEventKind::ChoiceSelected(ChoiceSelected {
                attempt_id: self.id,
                scene_id: step.scene.id.clone(),
                choice_label: step.choice.label.clone(),
                contribution: step.choice.contribution.clone(),
                transition: step.transition,
            }),
        };
        self.uncommitted_events.push(event);
        Ok(())
    }

    /// The traversal, once started.
    #[must_use]
    pub fn traversal(&self) -> Option<&Traversal> {
        self.traversal.as_ref()
    }

    /// Accumulated scores.
    #[must_use]
    pub fn scores(&self) -> &ScoreState {
        &self.scores
    }

    /// Whether the traversal has reached its absorbing state.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.traversal.as_ref().is_some_and(Traversal::is_terminated)
    }

    /// Content version hash recorded at start.
    #[must_use]
    pub fn content_version(&self) -> Option<&str> {
        self.content_version.as_deref()
    }
}

impl AggregateRoot for QuizAttempt {
    type Event = AttemptEvent;

    fn aggregate_id(&self) -> Uuid {
        self.id
    }

    fn version(&self) -> i64 {
        self.version
    }

    fn apply(&mut self, event: &Self::Event) {
        match &event.kind {
            AttemptEventKind::AttemptStarted(payload) => {
                self.traversal = Some(Traversal::at(payload.entry_scene_id.clone()));
                self.scores.reset();
                self.content_version = Some(payload.content_version.clone());
            }
            AttemptEventKind::ChoiceSelected(payload) => {
                if let Some(traversal) = &mut self.traversal {
                    traversal.record(
                        payload.scene_id.clone(),
                        payload.choice_label.clone(),
                        payload.transition.clone(),
                    );
                }
                self.scores.apply(&payload.contribution);
            }
        }
        self.version += 1;
    }

    fn uncommitted_events(&self) -> &[Self::Event] {
        &self.uncommitted_events
    }

    fn clear_uncommitted_events(&mut self) {
        self.uncommitted_events.clear();
    }
}
