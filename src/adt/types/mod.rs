//! Foundational data structures, error types, and column definitions.

pub mod column;
pub mod error;
pub mod models;
