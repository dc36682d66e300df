//! Spirit Food: Enrichment context.
//!
//! An optional external service may rewrite a result's descriptive text.
//! It never changes what the quiz computed, and when it is slow or down
//! the static result is used unchanged.

pub mod application;
pub mod domain;
pub mod infrastructure;
