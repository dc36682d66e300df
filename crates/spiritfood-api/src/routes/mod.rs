//! Route modules.

pub mod attempts;
pub mod health;
