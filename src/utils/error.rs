//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.
//!
//! Note that `compute` never returns any of these: normalization failures are
//! represented in the trace itself. `NormalizeError` only travels between
//! internal stages and is logged where it is absorbed.

use thiserror::Error;

/// Degradations that can occur inside the stack normalizer
#[derive(Error, Debug, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("Invalid frame pop count: {0}")]
    InvalidPopCount(i64),

    #[error("No frames could be extracted from {0}")]
    NoFrames(&'static str),
}

/// Errors that can occur while loading error-like input
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Failed to read input: {0}")]
    ReadFailed(#[from] std::io::Error),

    #[error("JSON deserialization failed: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid input format: {0}")]
    InvalidFormat(String),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}

/// Errors that can occur while emitting a record to a sink
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("Failed to write record: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize record: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Sink writer lock poisoned")]
    Poisoned,
}
