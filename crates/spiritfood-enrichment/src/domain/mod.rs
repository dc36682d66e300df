//! Domain layer for the Enrichment context.

pub mod port;
