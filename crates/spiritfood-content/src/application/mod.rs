//! Application layer for the Content context.

pub mod loader;
