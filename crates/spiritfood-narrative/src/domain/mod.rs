//! Domain layer for the Scene Graph context.

pub mod graph;
pub mod scene;
pub mod traversal;
