//! mf-core: shared movie model, errors, and configuration.
//!
//! This crate is the foundational dependency for all other mf-* crates,
//! providing the canonical movie representation served to clients, a unified
//! error type, and application configuration.

pub mod config;
pub mod error;
pub mod movie;

// Re-export the most commonly used items at the crate root.
pub use error::{Error, Result};
pub use movie::*;
