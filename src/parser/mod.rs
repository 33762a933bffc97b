//! Stack trace parsing and schema definitions.
//!
//! This module handles:
//! - Reading error-like input values
//! - Matching trace lines against the known engine dialects
//! - Normalizing matches into uniform stack frames
//! - Defining the normalized output schema

pub mod dialects;
pub mod input;
pub mod normalizer;
pub mod schema;

// Re-export main types
pub use dialects::{Grammar, RawFrame, LEGACY_FAMILY, NATIVE_FAMILY};
pub use input::ErrorLike;
pub use normalizer::{compute, compute_from_stack_prop, compute_from_stacktrace_prop, pop_frames};
pub use schema::{NormalizedTrace, StackFrame};
