//! Commands for the Session context.

use spiritfood_core::command::Command;
use uuid::Uuid;

/// Command to begin a new attempt. Retaking the quiz is another `StartAttempt`.
#[derive(Debug, Clone)]
pub struct StartAttempt {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

impl Command for StartAttempt {
    fn command_type(&self) -> &'static str {
        "session.start_attempt"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to take a choice in the attempt's current scene.
#[derive(Debug, Clone)]
pub struct SelectChoice {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The attempt making the choice.
    pub attempt_id: Uuid,
    /// Label of the choice, exactly as presented.
    pub choice_label: String,
}

impl Command for SelectChoice {
    fn command_type(&self) -> &'static str {
        "session.select_choice"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
