//! Command handlers for the Session context.
//!
//! Each handler loads the attempt's events, replays them, runs the command
//! against the aggregate and appends what it produced.

use spiritfood_content::domain::catalog::QuizCatalog;
use spiritfood_core::aggregate::AggregateRoot;
use spiritfood_core::clock::Clock;
use spiritfood_core::error::DomainError;
use spiritfood_core::repository::{EventRepository, StoredEvent};
use spiritfood_narrative::domain::traversal::Transition;
use tracing::info;
use uuid::Uuid;

use crate::domain::aggregates::QuizAttempt;
use crate::domain::commands::{SelectChoice, StartAttempt};
use crate::domain::events::{AttemptEvent, AttemptEventKind};

/// Result of a successfully handled command.
#[derive(Debug)]
pub struct AttemptCommandResult {
    /// The attempt affected by the command.
    pub aggregate_id: Uuid,
    /// The stored events produced and persisted.
    pub stored_events: Vec<StoredEvent>,
}

/// Rebuilds a `QuizAttempt` by replaying its stored events.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if an event payload does not decode.
pub(crate) fn reconstitute(
    attempt_id: Uuid,
    catalog: &QuizCatalog,
    existing_events: &[StoredEvent],
) -> Result<QuizAttempt, DomainError> {
    let mut attempt = QuizAttempt::new(attempt_id, catalog.vocabulary());
    for stored in existing_events {
        let kind: AttemptEventKind = stored.decode_payload()?;
        attempt.apply(&AttemptEvent {
            metadata: stored.metadata(),
            kind,
        });
    }
    Ok(attempt)
}

/// Loads an attempt that must already exist.
pub(crate) async fn load_attempt(
    attempt_id: Uuid,
    catalog: &QuizCatalog,
    repo: &dyn EventRepository,
) -> Result<QuizAttempt, DomainError> {
    let existing_events = repo.load_events(attempt_id).await?;
    if existing_events.is_empty() {
        return Err(DomainError::AggregateNotFound(attempt_id));
    }
    reconstitute(attempt_id, catalog, &existing_events)
}

async fn persist(
    attempt: &QuizAttempt,
    repo: &dyn EventRepository,
) -> Result<AttemptCommandResult, DomainError> {
    let stored_events: Vec<StoredEvent> = attempt
        .uncommitted_events()
        .iter()
        .map(StoredEvent::from_event)
        .collect();

    repo.append_events(attempt.id, attempt.version(), &stored_events)
        .await?;

    Ok(AttemptCommandResult {
        aggregate_id: attempt.id,
        stored_events,
    })
}

/// Handles `StartAttempt`: creates a fresh attempt at the catalog's entry
/// scene with zeroed scores.
///
/// This is a CREATION command: the handler generates the `attempt_id`.
///
/// # Errors
///
/// Returns `DomainError` if event appending fails.
pub async fn handle_start_attempt(
    command: &StartAttempt,
    catalog: &QuizCatalog,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<AttemptCommandResult, DomainError> {
    let attempt_id = Uuid::new_v4();
    let mut attempt = QuizAttempt::new(attempt_id, catalog.vocabulary());

    attempt.start(
        catalog.graph().entry().clone(),
        catalog.version_hash(),
        command.correlation_id,
        clock,
    )?;

    let result = persist(&attempt, repo).await?;
    info!(%attempt_id, "attempt started");
    Ok(result)
}

/// Handles `SelectChoice`: replays the attempt, takes the labelled choice
/// and persists the `ChoiceSelected` event.
///
/// # Errors
///
/// Returns `DomainError::AggregateNotFound` for an unknown attempt,
/// `DomainError::Validation` if the attempt has finished or the label is
/// not in the current scene, and `DomainError::ConcurrencyConflict` if
/// another choice was recorded in between.
pub async fn handle_select_choice(
    command: &SelectChoice,
    catalog: &QuizCatalog,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<AttemptCommandResult, DomainError> {
    let mut attempt = load_attempt(command.attempt_id, catalog, repo).await?;

    attempt.select_choice(
        catalog.graph(),
        &command.choice_label,
        command.correlation_id,
        clock,
    )?;

    let completes = attempt.uncommitted_events().iter().any(|event| {
        matches!(
            &event.kind,
            AttemptEventKind::ChoiceSelected(payload) if payload.transition == Transition::Terminate
        )
    });

    let result = persist(&attempt, repo).await?;
    if completes {
        info!(attempt_id = %command.attempt_id, "attempt completed");
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use spiritfood_content::application::loader::load_catalog_from_str;
    use spiritfood_content::domain::catalog::QuizCatalog;
    use spiritfood_core::error::DomainError;
    use spiritfood_narrative::domain::traversal::Transition;
    use spiritfood_test_support::{
        EmptyEventRepository, FailingEventRepository, FixedClock, MINI_QUIZ_YAML,
        RecordingEventRepository, fixed_time,
    };
    use uuid::Uuid;

    use crate::application::command_handlers::{
        handle_select_choice, handle_start_attempt, reconstitute,
    };
    use crate::domain::commands::{SelectChoice, StartAttempt};
    use crate::domain::events::{
        ATTEMPT_STARTED_EVENT_TYPE, AttemptEventKind, CHOICE_SELECTED_EVENT_TYPE,
    };

    fn catalog() -> QuizCatalog {
        load_catalog_from_str(MINI_QUIZ_YAML).unwrap()
    }

    fn select(attempt_id: Uuid, label: &str) -> SelectChoice {
        SelectChoice {
            correlation_id: Uuid::new_v4(),
            attempt_id,
            choice_label: label.to_owned(),
        }
    }

    #[tokio::test]
    async fn test_handle_start_attempt_persists_attempt_started_event() {
        // Arrange
        let catalog = catalog();
        let correlation_id = Uuid::new_v4();
        let repo = RecordingEventRepository::default();

        // Act
        let result = handle_start_attempt(
            &StartAttempt { correlation_id },
            &catalog,
            &FixedClock::default(),
            &repo,
        )
        .await
        .unwrap();

        // Assert
        let appended = repo.appended_events();
        assert_eq!(appended.len(), 1);

        let (agg_id, expected_version, events) = &appended[0];
        assert_eq!(*agg_id, result.aggregate_id);
        assert_eq!(*expected_version, 0);
        assert_eq!(events.len(), 1);

        let stored = &events[0];
        assert_eq!(stored.event_type, ATTEMPT_STARTED_EVENT_TYPE);
        assert_eq!(stored.sequence_number, 1);
        assert_eq!(stored.correlation_id, correlation_id);
        assert_eq!(stored.occurred_at, fixed_time());
    }

    #[tokio::test]
    async fn test_each_start_creates_a_distinct_attempt() {
        let catalog = catalog();
        let clock = FixedClock::default();
        let command = StartAttempt {
            correlation_id: Uuid::new_v4(),
        };

        let first = handle_start_attempt(&command, &catalog, &clock, &EmptyEventRepository)
            .await
            .unwrap();
        let second = handle_start_attempt(&command, &catalog, &clock, &EmptyEventRepository)
            .await
            .unwrap();

        assert_ne!(first.aggregate_id, second.aggregate_id);
    }

    #[tokio::test]
    async fn test_handle_select_choice_appends_at_current_version() {
        // Arrange
        let catalog = catalog();
        let clock = FixedClock::default();
        let repo = RecordingEventRepository::default();
        let started = handle_start_attempt(
            &StartAttempt {
                correlation_id: Uuid::new_v4(),
            },
            &catalog,
            &clock,
            &repo,
        )
        .await
        .unwrap();

        // Act
        let result = handle_select_choice(
            &select(started.aggregate_id, "Soup please"),
            &catalog,
            &clock,
            &repo,
        )
        .await
        .unwrap();

        // Assert
        let appended = repo.appended_events();
        assert_eq!(appended.len(), 2);
        let (_, expected_version, events) = &appended[1];
        assert_eq!(*expected_version, 1);
        assert_eq!(events[0].event_type, CHOICE_SELECTED_EVENT_TYPE);
        assert_eq!(events[0].sequence_number, 2);

        let kind: AttemptEventKind = result.stored_events[0].decode_payload().unwrap();
        match kind {
            AttemptEventKind::ChoiceSelected(payload) => {
                assert_eq!(payload.transition, Transition::Advance("3".into()));
            }
            other => panic!("expected ChoiceSelected, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_replaying_events_reproduces_state() {
        // Arrange
        let catalog = catalog();
        let clock = FixedClock::default();
        let repo = RecordingEventRepository::default();
        let attempt_id = handle_start_attempt(
            &StartAttempt {
                correlation_id: Uuid::new_v4(),
            },
            &catalog,
            &clock,
            &repo,
        )
        .await
        .unwrap()
        .aggregate_id;
        for label in ["Toast please", "Keep going", "Finish"] {
            handle_select_choice(&select(attempt_id, label), &catalog, &clock, &repo)
                .await
                .unwrap();
        }

        // Act
        let first = reconstitute(attempt_id, &catalog, &repo.stream()).unwrap();
        let second = reconstitute(attempt_id, &catalog, &repo.stream()).unwrap();

        // Assert
        assert!(first.is_completed());
        assert_eq!(first.scores(), second.scores());
        assert_eq!(first.traversal(), second.traversal());
        let labels: Vec<&str> = first
            .traversal()
            .unwrap()
            .history()
            .iter()
            .map(|h| h.choice_label.as_str())
            .collect();
        assert_eq!(labels, ["Toast please", "Keep going", "Finish"]);
    }

    #[tokio::test]
    async fn test_handle_select_choice_returns_not_found_for_unknown_attempt() {
        let attempt_id = Uuid::new_v4();

        let result = handle_select_choice(
            &select(attempt_id, "Toast please"),
            &catalog(),
            &FixedClock::default(),
            &EmptyEventRepository,
        )
        .await;

        match result.unwrap_err() {
            DomainError::AggregateNotFound(id) => assert_eq!(id, attempt_id),
            other => panic!("expected AggregateNotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_handle_select_choice_rejects_unknown_label_without_appending() {
        // Arrange
        let catalog = catalog();
        let clock = FixedClock::default();
        let repo = RecordingEventRepository::default();
        let attempt_id = handle_start_attempt(
            &StartAttempt {
                correlation_id: Uuid::new_v4(),
            },
            &catalog,
            &clock,
            &repo,
        )
        .await
        .unwrap()
        .aggregate_id;

        // Act
        let result =
            handle_select_choice(&select(attempt_id, "Pancakes"), &catalog, &clock, &repo).await;

        // Assert
        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert_eq!(repo.appended_events().len(), 1);
    }

    #[tokio::test]
    async fn test_handle_select_choice_propagates_repository_failure() {
        let result = handle_select_choice(
            &select(Uuid::new_v4(), "Toast please"),
            &catalog(),
            &FixedClock::default(),
            &FailingEventRepository,
        )
        .await;

        assert!(matches!(result, Err(DomainError::Infrastructure(_))));
    }
}
