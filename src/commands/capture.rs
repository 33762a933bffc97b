//! Capture command implementation.
//!
//! The capture command:
//! 1. Loads error-like values
//! 2. Wraps each into an error record with the capture context
//! 3. Emits the records as JSON lines, or through the logger

use super::models::{CaptureArgs, SinkKind};
use crate::output::{create_parent_dirs, read_error_inputs, validate_output_path};
use crate::record::{build_record, CaptureContext, ErrorSink, JsonLinesSink, LogSink};
use anyhow::{Context, Result};
use log::{debug, info};
use std::fs::File;
use std::io::{BufWriter, Write};

/// Execute the capture command
///
/// **Public** - main entry point called from main.rs
///
/// # Returns
/// Number of records emitted
///
/// # Errors
/// * Input read or JSON errors
/// * Malformed tags
/// * Sink write errors
pub fn execute_capture(args: &CaptureArgs) -> Result<usize> {
    let context = build_context(args)?;

    info!("Loading error input from: {}", args.input.display());
    let inputs = read_error_inputs(&args.input).context("Failed to load error input")?;

    let sink = open_sink(args)?;

    for (index, error) in inputs.iter().enumerate() {
        let record = build_record(error, &context);
        debug!(
            "Record {}: {} ({} frames)",
            index,
            record.error_type,
            record.stack_trace.len()
        );
        sink.emit(&record)
            .with_context(|| format!("Failed to emit record {}", index))?;
    }

    info!("✓ Emitted {} records to stream '{}'", inputs.len(), context.stream);
    Ok(inputs.len())
}

/// Open the record destination selected by the arguments
///
/// **Private** - internal helper for execute_capture
fn open_sink(args: &CaptureArgs) -> Result<Box<dyn ErrorSink>> {
    if args.sink == SinkKind::Log {
        debug!("Emitting records through the logger");
        return Ok(Box::new(LogSink));
    }

    let writer: Box<dyn Write + Send> = match &args.output {
        Some(path) => {
            create_parent_dirs(path)?;
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(std::io::stdout()),
    };
    Ok(Box::new(JsonLinesSink::new(writer)))
}

/// Validate capture arguments
///
/// **Public** - can be called before execute_capture for early validation
pub fn validate_args(args: &CaptureArgs) -> Result<()> {
    if args.input.as_os_str().is_empty() {
        anyhow::bail!("Input path cannot be empty");
    }

    if args.stream.trim().is_empty() {
        anyhow::bail!("Stream name cannot be empty");
    }

    if let Some(output) = &args.output {
        if args.sink == SinkKind::Log {
            anyhow::bail!("--output cannot be combined with the log sink");
        }
        validate_output_path(output)?;
    }

    for tag in &args.tags {
        parse_tag(tag)?;
    }

    Ok(())
}

/// Split a `key=value` tag
///
/// **Public** - used by validate_args and build_context
pub fn parse_tag(tag: &str) -> Result<(String, String)> {
    match tag.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => anyhow::bail!("Tag must be of the form key=value: '{}'", tag),
    }
}

/// Build the capture context from CLI arguments
///
/// **Private** - internal helper for execute_capture
fn build_context(args: &CaptureArgs) -> Result<CaptureContext> {
    let mut context =
        CaptureContext::new(args.url.clone(), args.user_agent.clone()).with_stream(args.stream.clone());

    for tag in &args.tags {
        let (key, value) = parse_tag(tag)?;
        context = context.with_tag(key, value);
    }

    Ok(context)
}
