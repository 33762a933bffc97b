//! Error reporting and handler registration.
//!
//! The host owns its native error hook. [`register`] only asks the host, via
//! [`ErrorHook`], to swap in a callback that builds and emits a record and
//! then hands the error on to whatever callback was installed before.

use super::schema::{build_record, CaptureContext, ErrorRecord};
use super::sink::ErrorSink;
use crate::parser::ErrorLike;
use log::{debug, warn};

/// Callback invoked by the host for every uncaught error
pub type ErrorCallback = Box<dyn Fn(&ErrorLike) + Send + Sync>;

/// Host-side slot holding the active error callback
pub trait ErrorHook {
    /// Remove and return the currently installed callback
    fn take_callback(&mut self) -> Option<ErrorCallback>;

    /// Install a callback
    fn set_callback(&mut self, callback: ErrorCallback);
}

/// Builds records for captured errors and emits them to a sink
pub struct ErrorReporter<S: ErrorSink> {
    context: CaptureContext,
    sink: S,
}

impl<S: ErrorSink> ErrorReporter<S> {
    pub fn new(context: CaptureContext, sink: S) -> Self {
        Self { context, sink }
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Build and emit a record
    ///
    /// Sink failures are logged and swallowed: reporting must never raise
    /// inside the host's error path.
    pub fn report(&self, error: &ErrorLike) -> ErrorRecord {
        let record = build_record(error, &self.context);
        debug!(
            "Reporting {} with {} frames",
            record.error_type,
            record.stack_trace.len()
        );

        if let Err(e) = self.sink.emit(&record) {
            warn!("Failed to emit error record: {}", e);
        }
        record
    }
}

/// Install `reporter` on `hook`, chaining to the previous callback
///
/// **Public** - the only registration entry point; no global state is touched
pub fn register<H, S>(hook: &mut H, reporter: ErrorReporter<S>)
where
    H: ErrorHook + ?Sized,
    S: ErrorSink + 'static,
{
    let previous = hook.take_callback();
    if previous.is_some() {
        debug!("Chaining to previously installed error callback");
    }

    hook.set_callback(Box::new(move |error: &ErrorLike| {
        reporter.report(error);
        if let Some(previous) = &previous {
            previous(error);
        }
    }));
}

/// Minimal [`ErrorHook`] holding a single callback
#[derive(Default)]
pub struct CallbackSlot {
    callback: Option<ErrorCallback>,
}

impl CallbackSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver an error to the installed callback, if any
    pub fn dispatch(&self, error: &ErrorLike) -> bool {
        match &self.callback {
            Some(callback) => {
                callback(error);
                true
            }
            None => false,
        }
    }
}

impl ErrorHook for CallbackSlot {
    fn take_callback(&mut self) -> Option<ErrorCallback> {
        self.callback.take()
    }

    fn set_callback(&mut self, callback: ErrorCallback) {
        self.callback = Some(callback);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::sink::MemorySink;
    use crate::utils::error::SinkError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct FailingSink;

    impl ErrorSink for FailingSink {
        fn emit(&self, _record: &ErrorRecord) -> Result<(), SinkError> {
            Err(SinkError::Poisoned)
        }
    }

    #[test]
    fn test_report_survives_sink_failure() {
        let reporter = ErrorReporter::new(CaptureContext::default(), FailingSink);
        let record = reporter.report(&ErrorLike::new().with_message("boom"));
        assert_eq!(record.message, "boom");
    }

    #[test]
    fn test_register_chains_previous_callback() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut slot = CallbackSlot::new();

        let counter = Arc::clone(&calls);
        slot.set_callback(Box::new(move |_: &ErrorLike| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        let sink = Arc::new(MemorySink::new());
        register(
            &mut slot,
            ErrorReporter::new(CaptureContext::default(), Arc::clone(&sink)),
        );

        assert!(slot.dispatch(&ErrorLike::new().with_message("first")));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(sink.records()[0].message, "first");
    }

    #[test]
    fn test_empty_slot_dispatch() {
        assert!(!CallbackSlot::new().dispatch(&ErrorLike::default()));
    }
}
