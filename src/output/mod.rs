//! Readers and writers for trace data.
//!
//! This module handles moving data across the file boundary:
//! - Loading error-like values from JSON files or stdin
//! - Writing normalized traces (pretty and compact)
//! - Reading back JSON lines record files

pub mod json;

// Re-export main functions
pub use json::{
    create_parent_dirs, parse_error_inputs, read_error_inputs, read_records, traces_to_string,
    validate_output_path, write_traces, STDIN_PATH,
};
