//! Application layer for the Enrichment context.

pub mod enrich;
