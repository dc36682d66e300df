//! Spirit Food: Scene Graph bounded context.
//!
//! Responsible for the immutable graph of scenes and choices, and for the
//! traversal state machine that walks it one selected choice at a time.

pub mod domain;
