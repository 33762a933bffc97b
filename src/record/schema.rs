//! Transport record definitions.
//!
//! An `ErrorRecord` is the normalized trace wrapped with capture metadata:
//! when it happened, which stream it belongs to, which document raised it and
//! which client was running.

use crate::parser::{compute, ErrorLike, StackFrame};
use crate::utils::config::{DEFAULT_ERROR_NAME, DEFAULT_STREAM};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Record envelope metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordMeta {
    /// RFC 3339 capture timestamp (UTC)
    pub dt: String,

    /// Stream identifier
    pub stream: String,
}

/// Error record handed to a sink
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub meta: RecordMeta,

    /// Object tag of the error, e.g. `[object TypeError]`
    #[serde(rename = "type")]
    pub error_type: String,

    pub message: String,

    /// Location of the document that raised the error
    pub url: String,

    /// Client identifier string
    pub user_agent: String,

    pub stack_trace: Vec<StackFrame>,

    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

/// Capture-time information about the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureContext {
    pub url: String,
    pub user_agent: String,
    pub stream: String,
    pub tags: BTreeMap<String, String>,
}

impl CaptureContext {
    pub fn new(url: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            user_agent: user_agent.into(),
            ..Self::default()
        }
    }

    pub fn with_stream(mut self, stream: impl Into<String>) -> Self {
        self.stream = stream.into();
        self
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }
}

impl Default for CaptureContext {
    fn default() -> Self {
        Self {
            url: String::new(),
            user_agent: String::new(),
            stream: DEFAULT_STREAM.to_string(),
            tags: BTreeMap::new(),
        }
    }
}

/// Build a transport record for a captured error
///
/// **Public** - main entry point for record construction
///
/// The stack trace is computed with [`compute`]; a failed trace simply
/// produces an empty `stack_trace`.
pub fn build_record(error: &ErrorLike, context: &CaptureContext) -> ErrorRecord {
    let trace = compute(error);
    let name = error.name.as_deref().unwrap_or(DEFAULT_ERROR_NAME);

    ErrorRecord {
        meta: RecordMeta {
            dt: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            stream: context.stream.clone(),
        },
        error_type: format!("[object {}]", name),
        message: trace.message,
        url: context.url.clone(),
        user_agent: context.user_agent.clone(),
        stack_trace: trace.frames,
        tags: context.tags.clone(),
    }
}
