//! Error handling.
//!
//! This module provides:
//! - Error type definitions (initialization and per-request resolution errors)
//! - Categorization of transport failures reported by `reqwest`
//!
//! Propagation is scoped as narrowly as possible: a failed hop ends that
//! request's walk, a failed request becomes an `error` field in its result,
//! and nothing short of a startup failure aborts the process.

mod categorization;
mod types;

// Re-export public API
pub use categorization::categorize_reqwest_error;
pub use types::{FetchFailure, InitializationError, ResolveError};
