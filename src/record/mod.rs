//! Error records and their delivery.
//!
//! This module handles:
//! - Wrapping normalized traces with capture metadata
//! - Emitting records to sinks
//! - Registering a reporter with a host error hook

pub mod reporter;
pub mod schema;
pub mod sink;

// Re-export main types
pub use reporter::{register, CallbackSlot, ErrorCallback, ErrorHook, ErrorReporter};
pub use schema::{build_record, CaptureContext, ErrorRecord, RecordMeta};
pub use sink::{ErrorSink, JsonLinesSink, LogSink, MemorySink};
