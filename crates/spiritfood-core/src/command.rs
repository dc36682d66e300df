//! Command abstractions.

use uuid::Uuid;

/// A request to change an aggregate, traced by correlation id.
pub trait Command: Send + Sync + std::fmt::Debug {
    /// Dotted type name, e.g. `session.select_choice`, used in logs.
    fn command_type(&self) -> &'static str;

    /// Correlation ID shared by the command and every event it causes.
    fn correlation_id(&self) -> Uuid;
}
