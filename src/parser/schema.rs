//! Output schema definitions for normalized stack traces.
//!
//! These are the structures handed to the record layer and written to disk.
//! Field names follow the JSON shape consumers of the error stream expect.

use crate::utils::config::{NO_ERROR_MESSAGE, UNKNOWN_FUNCTION};
use serde::{Deserialize, Serialize};

/// One call-site entry in a stack trace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackFrame {
    /// Source location (file path, URL or `[native code]`)
    pub url: String,

    /// Function name, `?` when unknown
    #[serde(rename = "func")]
    pub function_name: String,

    /// Stringified call arguments (only some dialects expose them)
    #[serde(rename = "args", default)]
    pub arguments: Vec<String>,

    /// 1-based line number
    pub line: Option<u32>,

    /// 1-based column number
    pub column: Option<u32>,
}

impl StackFrame {
    /// Create a frame, filling the function name with the unknown-function
    /// marker when none was captured but a line is known.
    pub fn new(
        url: impl Into<String>,
        function_name: Option<String>,
        arguments: Vec<String>,
        line: Option<u32>,
        column: Option<u32>,
    ) -> Self {
        let function_name = match function_name.filter(|f| !f.is_empty()) {
            Some(name) => name,
            None if line.is_some() => UNKNOWN_FUNCTION.to_string(),
            None => String::new(),
        };

        Self {
            url: url.into(),
            function_name,
            arguments,
            line,
            column,
        }
    }
}

/// Result of normalizing one error-like value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedTrace {
    /// Error message, `No error message` when absent
    pub message: String,

    /// Error kind, if the input exposed one
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub name: Option<String>,

    /// Frames in source order
    pub frames: Vec<StackFrame>,

    /// True only when no dialect matched any line
    #[serde(default)]
    pub failed: bool,
}

impl NormalizedTrace {
    pub fn new(message: impl Into<String>, name: Option<String>, frames: Vec<StackFrame>) -> Self {
        Self {
            message: message.into(),
            name,
            frames,
            failed: false,
        }
    }

    /// Minimal trace returned when nothing could be parsed
    pub fn failed(message: impl Into<String>, name: Option<String>) -> Self {
        Self {
            message: message.into(),
            name,
            frames: Vec::new(),
            failed: true,
        }
    }
}

impl Default for NormalizedTrace {
    fn default() -> Self {
        Self::failed(NO_ERROR_MESSAGE, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_fills_unknown_function_when_line_present() {
        let frame = StackFrame::new("http://a.js", None, vec![], Some(3), None);
        assert_eq!(frame.function_name, "?");
    }

    #[test]
    fn test_frame_without_line_keeps_empty_function() {
        let frame = StackFrame::new("http://a.js", Some(String::new()), vec![], None, None);
        assert_eq!(frame.function_name, "");
    }

    #[test]
    fn test_trace_serializes_with_stream_field_names() {
        let trace = NormalizedTrace::new(
            "boom",
            None,
            vec![StackFrame::new("http://a.js", Some("foo".into()), vec![], Some(1), Some(2))],
        );
        let json = serde_json::to_value(&trace).unwrap();

        assert_eq!(json["frames"][0]["func"], "foo");
        assert_eq!(json["frames"][0]["args"], serde_json::json!([]));
        assert!(json.get("name").is_none());
        assert_eq!(json["failed"], false);
    }

    #[test]
    fn test_default_trace_is_failed() {
        let trace = NormalizedTrace::default();
        assert!(trace.failed);
        assert_eq!(trace.message, "No error message");
        assert!(trace.frames.is_empty());
    }
}
