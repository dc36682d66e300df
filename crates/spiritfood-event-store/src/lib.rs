//! Event store implementations for the Spirit Food quiz engine.
//!
//! Attempts live only as long as the process: the store keeps each
//! attempt's event stream in memory.

pub mod memory_event_repository;
