//! Error-like input values.
//!
//! An `ErrorLike` is whatever the host managed to capture about an uncaught
//! error. Every field is optional and input built from JSON is read leniently:
//! a field of the wrong type is dropped, never rejected.

use crate::utils::config::{
    COLUMN_NUMBER_FIELD_NAMES, FRAMES_TO_POP_FIELD_NAMES, MESSAGE_FIELD_NAMES, NAME_FIELD_NAMES,
    NO_ERROR_MESSAGE, STACKTRACE_FIELD_NAMES, STACK_FIELD_NAMES,
};
use log::debug;
use serde_json::{Map, Value};

/// Captured error value handed to the normalizer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorLike {
    /// Message field, either a string or an event-like object
    pub message: Option<Value>,

    /// Error kind (e.g. `TypeError`)
    pub name: Option<String>,

    /// Line-paired legacy trace text
    pub stacktrace: Option<String>,

    /// Native trace text
    pub stack: Option<String>,

    /// Number of leading frames to discard
    pub frames_to_pop: Option<i64>,

    /// 0-based column of the top frame, reported out-of-band by some engines
    pub column_number: Option<i64>,
}

impl ErrorLike {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(Value::String(message.into()));
        self
    }

    pub fn with_message_value(mut self, message: Value) -> Self {
        self.message = Some(message);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    pub fn with_stacktrace(mut self, stacktrace: impl Into<String>) -> Self {
        self.stacktrace = Some(stacktrace.into());
        self
    }

    pub fn with_frames_to_pop(mut self, count: i64) -> Self {
        self.frames_to_pop = Some(count);
        self
    }

    pub fn with_column_number(mut self, column: i64) -> Self {
        self.column_number = Some(column);
        self
    }

    /// Build an error-like value from arbitrary JSON
    ///
    /// **Public** - never fails; unusable fields are dropped
    ///
    /// A bare JSON string is taken as the message. Any other non-object
    /// value yields an input with no fields.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Object(obj) => Self {
                message: lookup(obj, MESSAGE_FIELD_NAMES).cloned(),
                name: lookup_string(obj, NAME_FIELD_NAMES),
                stacktrace: lookup_string(obj, STACKTRACE_FIELD_NAMES),
                stack: lookup_string(obj, STACK_FIELD_NAMES),
                frames_to_pop: lookup_integer(obj, FRAMES_TO_POP_FIELD_NAMES),
                column_number: lookup_integer(obj, COLUMN_NUMBER_FIELD_NAMES),
            },
            Value::String(s) => Self::new().with_message(s.clone()),
            other => {
                debug!("Error-like input is not an object: {}", other);
                Self::default()
            }
        }
    }

    /// Legacy trace text, if present and non-empty
    pub fn stacktrace_text(&self) -> Option<&str> {
        self.stacktrace.as_deref().filter(|s| !s.is_empty())
    }

    /// Native trace text, if present and non-empty
    pub fn stack_text(&self) -> Option<&str> {
        self.stack.as_deref().filter(|s| !s.is_empty())
    }

    /// Extract the message to report
    ///
    /// Absent or falsy messages become `No error message`. Some hosts pass an
    /// event object instead of a string; its nested `error.message` is used.
    pub fn message_text(&self) -> String {
        let Some(message) = self.message.as_ref().filter(|m| is_truthy(m)) else {
            return NO_ERROR_MESSAGE.to_string();
        };

        if let Some(nested) = message
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(Value::as_str)
        {
            return nested.to_string();
        }

        match message {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

/// JS truthiness of a JSON value
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn lookup<'a>(obj: &'a Map<String, Value>, names: &[&str]) -> Option<&'a Value> {
    names
        .iter()
        .find_map(|name| obj.get(*name))
        .filter(|v| !v.is_null())
}

fn lookup_string(obj: &Map<String, Value>, names: &[&str]) -> Option<String> {
    let value = lookup(obj, names)?;
    match value.as_str() {
        Some(s) => Some(s.to_string()),
        None => {
            debug!("Ignoring non-string field {:?}: {}", names[0], value);
            None
        }
    }
}

fn lookup_integer(obj: &Map<String, Value>, names: &[&str]) -> Option<i64> {
    let value = lookup(obj, names)?;
    match value.as_i64() {
        Some(n) => Some(n),
        None => {
            debug!("Ignoring non-integer field {:?}: {}", names[0], value);
            None
        }
    }
}
