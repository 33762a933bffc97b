//! Configuration and constants for trace normalization.

/// Current output schema version for error records
pub const RECORD_SCHEMA_VERSION: &str = "1.0.0";

/// Function name used for any frame whose function could not be determined
pub const UNKNOWN_FUNCTION: &str = "?";

/// Message used when the error carries no usable message
pub const NO_ERROR_MESSAGE: &str = "No error message";

/// Function name given to eval frames that have none
pub const EVAL_FUNCTION: &str = "eval";

/// Default stream identifier stamped on every error record
pub const DEFAULT_STREAM: &str = "client-runtime-error";

/// Error kind used for the record type when the input has no name
pub const DEFAULT_ERROR_NAME: &str = "Error";

// Field names for error-like input (engines emit camelCase, serializers often snake_case)
pub const MESSAGE_FIELD_NAMES: &[&str] = &["message"];
pub const NAME_FIELD_NAMES: &[&str] = &["name"];
pub const STACKTRACE_FIELD_NAMES: &[&str] = &["stacktrace"];
pub const STACK_FIELD_NAMES: &[&str] = &["stack"];
pub const FRAMES_TO_POP_FIELD_NAMES: &[&str] = &["framesToPop", "frames_to_pop"];
pub const COLUMN_NUMBER_FIELD_NAMES: &[&str] = &["columnNumber", "column_number"];
