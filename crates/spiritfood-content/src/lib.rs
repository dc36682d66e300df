//! Spirit Food: Content bounded context.
//!
//! Responsible for the YAML quiz document, load-time validation into an
//! immutable catalog, the built-in "Spirit Food" quiz and content version
//! hashing.

pub mod application;
pub mod domain;
