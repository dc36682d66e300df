//! Adapters for the Enrichment context.

pub mod http_client;
