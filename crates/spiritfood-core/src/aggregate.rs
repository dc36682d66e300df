//! Aggregate root abstraction.

use uuid::Uuid;

use crate::event::DomainEvent;

/// An event-sourced aggregate: state is rebuilt by folding its event stream.
///
/// Command methods never mutate state directly. They push events onto the
/// uncommitted list; state only changes through [`AggregateRoot::apply`].
pub trait AggregateRoot: Send + Sync {
    /// The event type this aggregate produces and consumes.
    type Event: DomainEvent;

    /// Returns the aggregate identifier.
    fn aggregate_id(&self) -> Uuid;

    /// Number of events applied so far.
    fn version(&self) -> i64;

    /// Folds one event into the aggregate state.
    fn apply(&mut self, event: &Self::Event);

    /// Events produced by command handling and not yet persisted.
    fn uncommitted_events(&self) -> &[Self::Event];

    /// Drops the uncommitted events once they are persisted.
    fn clear_uncommitted_events(&mut self);

    /// Sequence number the next produced event should carry.
    #[allow(clippy::cast_possible_wrap)]
    fn next_sequence_number(&self) -> i64 {
        self.version() + self.uncommitted_events().len() as i64 + 1
    }
}
