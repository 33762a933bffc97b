use crate::output::STDIN_PATH;
use crate::utils::config::DEFAULT_STREAM;
use std::path::PathBuf;

/// Arguments for the normalize command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct NormalizeArgs {
    /// JSON file holding one error-like object or an array (`-` for stdin)
    pub input: PathBuf,

    /// Output path for normalized traces (stdout if None)
    pub output: Option<PathBuf>,

    /// Write compact JSON instead of pretty-printed
    pub compact: bool,
}

impl Default for NormalizeArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::from(STDIN_PATH),
            output: None,
            compact: false,
        }
    }
}

/// Where the capture command sends records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum SinkKind {
    /// One JSON record per line, to the output file or stdout
    #[default]
    JsonLines,
    /// Through the logger, at error level
    Log,
}

/// Arguments for the capture command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct CaptureArgs {
    /// JSON file holding one error-like object or an array (`-` for stdin)
    pub input: PathBuf,

    /// Output path for JSON lines records (stdout if None)
    pub output: Option<PathBuf>,

    /// Location of the document that raised the errors
    pub url: String,

    /// Client identifier string
    pub user_agent: String,

    /// Stream identifier stamped on each record
    pub stream: String,

    /// Extra `key=value` tags
    pub tags: Vec<String>,

    /// Record destination
    pub sink: SinkKind,
}

impl Default for CaptureArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::from(STDIN_PATH),
            output: None,
            url: String::new(),
            user_agent: String::new(),
            stream: DEFAULT_STREAM.to_string(),
            tags: Vec::new(),
            sink: SinkKind::default(),
        }
    }
}
