//! Spirit Food: Session bounded context.
//!
//! A quiz attempt is an event-sourced aggregate: starting it and selecting
//! choices append events, and the traversal, score state and history are
//! rebuilt by replaying them against the quiz catalog.

pub mod application;
pub mod domain;
