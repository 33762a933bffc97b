//! Trace Normalizer CLI
//!
//! Normalizes captured JavaScript errors into uniform stack traces and
//! wraps them into transport-ready error records.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use trace_normalizer::commands::{
    display_dialects, display_version, execute_capture, execute_normalize, validate_args,
    validate_normalize_args, validate_records_file, CaptureArgs, NormalizeArgs, SinkKind,
};
use trace_normalizer::utils::config::DEFAULT_STREAM;

/// Trace Normalizer - uniform stack traces for captured runtime errors
#[derive(Parser, Debug)]
#[command(name = "trace-normalizer")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Normalize the stack traces of captured errors
    Normalize {
        /// JSON file with one error object or an array ("-" for stdin)
        #[arg(short, long, default_value = "-")]
        input: PathBuf,

        /// Output path for normalized traces (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Wrap captured errors into error records
    Capture {
        /// JSON file with one error object or an array ("-" for stdin)
        #[arg(short, long, default_value = "-")]
        input: PathBuf,

        /// Output path for JSON lines records (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Location of the document that raised the errors
        #[arg(long, env = "TRACE_NORMALIZER_URL", default_value = "")]
        url: String,

        /// Client identifier string
        #[arg(long, env = "TRACE_NORMALIZER_USER_AGENT", default_value = "")]
        user_agent: String,

        /// Stream identifier
        #[arg(long, env = "TRACE_NORMALIZER_STREAM", default_value = DEFAULT_STREAM)]
        stream: String,

        /// Extra tag as key=value (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,

        /// Record destination
        #[arg(long, value_enum, default_value_t = SinkKind::JsonLines)]
        sink: SinkKind,
    },

    /// Validate a JSON lines record file
    Validate {
        /// Path to record file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display the stack line grammars
    Dialects {
        /// Show full patterns
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Normalize {
            input,
            output,
            compact,
        } => {
            let args = NormalizeArgs {
                input,
                output,
                compact,
            };

            validate_normalize_args(&args)?;
            execute_normalize(&args)?;
        }

        Commands::Capture {
            input,
            output,
            url,
            user_agent,
            stream,
            tags,
            sink,
        } => {
            let args = CaptureArgs {
                input,
                output,
                url,
                user_agent,
                stream,
                tags,
                sink,
            };

            validate_args(&args)?;
            execute_capture(&args)?;
        }

        Commands::Validate { file } => {
            validate_records_file(file)?;
        }

        Commands::Dialects { show } => {
            display_dialects(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
