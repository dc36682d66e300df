//! Spirit Food: Scoring bounded context.
//!
//! Responsible for the per-attempt accumulators, applying a choice's
//! weighted contribution to them, and reducing the final accumulators to a
//! deterministic result.

pub mod domain;
