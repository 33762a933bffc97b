//! JSON input and output.
//!
//! Reads error-like values from files (or stdin) and writes normalized traces
//! and error records back out.

use crate::parser::{ErrorLike, NormalizedTrace};
use crate::record::ErrorRecord;
use crate::utils::error::{InputError, OutputError};
use log::{debug, info};
use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read};
use std::path::Path;

/// Path value that selects stdin
pub const STDIN_PATH: &str = "-";

/// Read error-like values from a JSON file
///
/// **Public** - main entry point for loading input
///
/// The file holds either a single error-like object or an array of them.
/// `-` reads from stdin.
///
/// # Errors
/// * `InputError::ReadFailed` - file or stdin could not be read
/// * `InputError::JsonError` - content is not valid JSON
pub fn read_error_inputs(input_path: impl AsRef<Path>) -> Result<Vec<ErrorLike>, InputError> {
    let input_path = input_path.as_ref();

    let mut content = String::new();
    if input_path.as_os_str() == STDIN_PATH {
        debug!("Reading error input from stdin");
        std::io::stdin().read_to_string(&mut content)?;
    } else {
        debug!("Reading error input from: {}", input_path.display());
        File::open(input_path)?.read_to_string(&mut content)?;
    }

    parse_error_inputs(&content)
}

/// Parse error-like values from JSON text
///
/// **Public** - useful for tests and in-memory use
///
/// # Errors
/// * `InputError::JsonError` - content is not valid JSON
/// * `InputError::InvalidFormat` - content is empty
pub fn parse_error_inputs(content: &str) -> Result<Vec<ErrorLike>, InputError> {
    if content.trim().is_empty() {
        return Err(InputError::InvalidFormat("Input is empty".to_string()));
    }

    let value: serde_json::Value = serde_json::from_str(content)?;
    let inputs = match &value {
        serde_json::Value::Array(items) => items.iter().map(ErrorLike::from_json).collect(),
        other => vec![ErrorLike::from_json(other)],
    };

    debug!("Loaded {} error-like values", inputs.len());
    Ok(inputs)
}

/// Write normalized traces to a JSON file
///
/// **Public** - main entry point for trace output
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_traces(
    traces: &[NormalizedTrace],
    output_path: impl AsRef<Path>,
    compact: bool,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();
    info!("Writing {} traces to: {}", traces.len(), output_path.display());
    write_json(traces, output_path, compact)
}

/// Serialize normalized traces to a string
///
/// **Public** - used when printing to stdout
pub fn traces_to_string(traces: &[NormalizedTrace], compact: bool) -> Result<String, OutputError> {
    let text = if compact {
        serde_json::to_string(traces)?
    } else {
        serde_json::to_string_pretty(traces)?
    };
    Ok(text)
}

/// Read error records from a JSON lines file
///
/// **Public** - useful for validation and testing
///
/// Blank lines are skipped.
///
/// # Errors
/// * `InputError::ReadFailed` - file could not be read
/// * `InputError::JsonError` - a line is not a valid record
pub fn read_records(input_path: impl AsRef<Path>) -> Result<Vec<ErrorRecord>, InputError> {
    let input_path = input_path.as_ref();
    debug!("Reading records from: {}", input_path.display());

    let reader = BufReader::new(File::open(input_path)?);
    let mut records = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        records.push(serde_json::from_str(&line)?);
    }

    debug!("Loaded {} records", records.len());
    Ok(records)
}

/// Write any serializable value as JSON
///
/// **Private** - shared by the writers above
fn write_json<T: Serialize + ?Sized>(
    value: &T,
    output_path: &Path,
    compact: bool,
) -> Result<(), OutputError> {
    validate_output_path(output_path)?;
    create_parent_dirs(output_path)?;

    let writer = BufWriter::new(File::create(output_path)?);
    if compact {
        serde_json::to_writer(writer, value)?;
    } else {
        serde_json::to_writer_pretty(writer, value)?;
    }

    info!(
        "Output written successfully ({} bytes)",
        calculate_file_size(output_path)
    );
    Ok(())
}

/// Create parent directories for an output file
///
/// **Public** - also used by the capture command before opening its sink
pub fn create_parent_dirs(path: &Path) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }
    Ok(())
}

/// Validate that output path is writable
///
/// **Public** - shared with command argument validation
pub fn validate_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    // Check if we're trying to overwrite a directory
    if path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

/// Calculate file size in bytes
///
/// **Private** - internal utility
fn calculate_file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}
