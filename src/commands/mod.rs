//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod capture;
pub mod models;
pub mod normalize;
pub mod utils;

// Re-export main command functions
pub use capture::{execute_capture, parse_tag, validate_args};
pub use models::{CaptureArgs, NormalizeArgs, SinkKind};
pub use normalize::{execute_normalize, validate_normalize_args};
pub use utils::{display_dialects, display_version, validate_records_file};
