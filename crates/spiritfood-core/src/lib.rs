//! Spirit Food Core: shared domain abstractions.
//!
//! This crate defines the traits and types every bounded context depends on:
//! the error taxonomy, event-sourcing plumbing, and the scoring dimensions
//! that choices contribute to. It contains no infrastructure code.

pub mod aggregate;
pub mod clock;
pub mod command;
pub mod dimension;
pub mod error;
pub mod event;
pub mod repository;
