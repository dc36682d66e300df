//! Domain layer for the Scoring context.

pub mod personality;
pub mod reduction;
pub mod score_state;
pub mod tables;
pub mod vocabulary;
