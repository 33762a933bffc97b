//! Normalize command implementation.
//!
//! The normalize command:
//! 1. Loads error-like values
//! 2. Computes a normalized trace for each
//! 3. Writes the traces as JSON

use super::models::NormalizeArgs;
use crate::output::{read_error_inputs, traces_to_string, validate_output_path, write_traces};
use crate::parser::{compute, NormalizedTrace};
use anyhow::{Context, Result};
use log::{debug, info};

/// Execute the normalize command
///
/// **Public** - main entry point called from main.rs
///
/// # Returns
/// The computed traces, in input order
///
/// # Errors
/// * Input read or JSON errors
/// * File write errors
pub fn execute_normalize(args: &NormalizeArgs) -> Result<Vec<NormalizedTrace>> {
    info!("Loading error input from: {}", args.input.display());
    let inputs = read_error_inputs(&args.input).context("Failed to load error input")?;

    let traces: Vec<NormalizedTrace> = inputs.iter().map(compute).collect();

    let failed = traces.iter().filter(|t| t.failed).count();
    let frames: usize = traces.iter().map(|t| t.frames.len()).sum();
    info!(
        "Normalized {} errors ({} frames, {} without a parsable stack)",
        traces.len(),
        frames,
        failed
    );

    match &args.output {
        Some(path) => {
            write_traces(&traces, path, args.compact).context("Failed to write traces")?;
            info!("✓ Traces written to: {}", path.display());
        }
        None => {
            debug!("Writing traces to stdout");
            println!("{}", traces_to_string(&traces, args.compact)?);
        }
    }

    Ok(traces)
}

/// Validate normalize arguments
///
/// **Public** - can be called before execute_normalize for early validation
pub fn validate_normalize_args(args: &NormalizeArgs) -> Result<()> {
    if args.input.as_os_str().is_empty() {
        anyhow::bail!("Input path cannot be empty");
    }

    if let Some(output) = &args.output {
        validate_output_path(output)?;
    }

    Ok(())
}
