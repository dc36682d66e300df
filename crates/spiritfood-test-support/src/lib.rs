//! Shared test doubles and fixtures for Spirit Food.

mod clock;
mod fixtures;
mod repository;

pub use clock::{FixedClock, fixed_time};
pub use fixtures::MINI_QUIZ_YAML;
pub use repository::{EmptyEventRepository, FailingEventRepository, RecordingEventRepository};
