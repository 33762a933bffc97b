//! Record sinks.
//!
//! A sink is wherever records end up. The core never decides that; hosts
//! pick one of these or implement [`ErrorSink`] themselves.

use super::schema::ErrorRecord;
use crate::utils::error::SinkError;
use log::error;
use std::io::Write;
use std::sync::Mutex;

/// Destination for error records
pub trait ErrorSink: Send + Sync {
    fn emit(&self, record: &ErrorRecord) -> Result<(), SinkError>;
}

/// Emits each record as compact JSON through the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl ErrorSink for LogSink {
    fn emit(&self, record: &ErrorRecord) -> Result<(), SinkError> {
        let line = serde_json::to_string(record)?;
        error!(target: "runtime_error", "{}", line);
        Ok(())
    }
}

/// Writes one JSON record per line
pub struct JsonLinesSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Recover the underlying writer
    pub fn into_inner(self) -> Result<W, SinkError> {
        self.writer.into_inner().map_err(|_| SinkError::Poisoned)
    }
}

impl<W: Write + Send> ErrorSink for JsonLinesSink<W> {
    fn emit(&self, record: &ErrorRecord) -> Result<(), SinkError> {
        let line = serde_json::to_string(record)?;
        let mut writer = self.writer.lock().map_err(|_| SinkError::Poisoned)?;
        writeln!(writer, "{}", line)?;
        writer.flush()?;
        Ok(())
    }
}

/// Keeps records in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<ErrorRecord>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything emitted so far
    pub fn records(&self) -> Vec<ErrorRecord> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }
}

impl ErrorSink for MemorySink {
    fn emit(&self, record: &ErrorRecord) -> Result<(), SinkError> {
        self.records
            .lock()
            .map_err(|_| SinkError::Poisoned)?
            .push(record.clone());
        Ok(())
    }
}

impl<S: ErrorSink + ?Sized> ErrorSink for std::sync::Arc<S> {
    fn emit(&self, record: &ErrorRecord) -> Result<(), SinkError> {
        (**self).emit(record)
    }
}
