//! Stack normalizer.
//!
//! Turns an [`ErrorLike`] into a [`NormalizedTrace`]. The legacy `stacktrace`
//! field is always read before `stack`: at least one engine discards
//! `stacktrace` once `stack` has been accessed.
//!
//! Nothing in here fails. Lines that match no grammar are skipped, a path
//! that yields no frames falls through to the next one, and when every path
//! comes up empty a `failed` trace carrying the message and name is returned.

use super::dialects::{match_family, Grammar, RawFrame, LEGACY_FAMILY, NATIVE_FAMILY};
use super::input::ErrorLike;
use super::schema::{NormalizedTrace, StackFrame};
use crate::utils::config::{EVAL_FUNCTION, UNKNOWN_FUNCTION};
use crate::utils::error::NormalizeError;
use log::{debug, warn};

/// Compute the normalized stack trace for an error-like value
///
/// **Public** - main entry point for normalization
///
/// Tries the legacy `stacktrace` path, then the native `stack` path, then
/// falls back to a minimal failed trace. A non-zero `frames_to_pop` hint is
/// applied once to whichever path succeeded.
pub fn compute(error: &ErrorLike) -> NormalizedTrace {
    let parsed = compute_from_stacktrace_prop(error).or_else(|| compute_from_stack_prop(error));

    match parsed {
        Some(trace) => apply_frame_pop(trace, error.frames_to_pop),
        None => {
            debug!("No stack dialect matched, returning failed trace");
            NormalizedTrace::failed(error.message_text(), error.name.clone())
        }
    }
}

/// Parse the line-paired legacy `stacktrace` field
///
/// **Public** - returns `None` if the field is absent or yields no frames
pub fn compute_from_stacktrace_prop(error: &ErrorLike) -> Option<NormalizedTrace> {
    let text = error.stacktrace_text()?;

    match parse_stacktrace_text(text) {
        Ok(frames) => {
            debug!("Parsed {} frames from stacktrace", frames.len());
            Some(NormalizedTrace::new(error.message_text(), error.name.clone(), frames))
        }
        Err(e) => {
            debug!("{}", e);
            None
        }
    }
}

/// Parse the native `stack` field
///
/// **Public** - returns `None` if the field is absent or yields no frames
pub fn compute_from_stack_prop(error: &ErrorLike) -> Option<NormalizedTrace> {
    let text = error.stack_text()?;

    match parse_stack_text(text, error.column_number) {
        Ok(frames) => {
            debug!("Parsed {} frames from stack", frames.len());
            Some(NormalizedTrace::new(error.message_text(), error.name.clone(), frames))
        }
        Err(e) => {
            debug!("{}", e);
            None
        }
    }
}

/// Remove `count` leading frames in place
///
/// **Public** - popping past the end leaves an empty trace
///
/// # Errors
/// * `NormalizeError::InvalidPopCount` - negative count; the trace is left untouched
pub fn pop_frames(trace: &mut NormalizedTrace, count: i64) -> Result<(), NormalizeError> {
    let count = usize::try_from(count).map_err(|_| NormalizeError::InvalidPopCount(count))?;
    let count = count.min(trace.frames.len());
    trace.frames.drain(..count);
    Ok(())
}

/// Apply the pop hint, keeping the trace unpopped on failure
///
/// **Private** - internal helper for compute
fn apply_frame_pop(mut trace: NormalizedTrace, hint: Option<i64>) -> NormalizedTrace {
    if let Some(count) = hint.filter(|c| *c != 0) {
        if let Err(e) = pop_frames(&mut trace, count) {
            warn!("Frame popping skipped: {}", e);
        }
    }
    trace
}

/// Frames from legacy text, read two lines at a time
///
/// **Private** - internal helper for compute_from_stacktrace_prop
fn parse_stacktrace_text(text: &str) -> Result<Vec<StackFrame>, NormalizeError> {
    let frames: Vec<StackFrame> = text
        .split('\n')
        .step_by(2)
        .filter_map(|line| match_family(&LEGACY_FAMILY, line))
        .map(|(_, raw)| StackFrame::new(raw.location, raw.function, raw.arguments, raw.line, raw.column))
        .collect();

    if frames.is_empty() {
        return Err(NormalizeError::NoFrames("stacktrace"));
    }
    Ok(frames)
}

/// Frames from native text, one per matching line
///
/// **Private** - internal helper for compute_from_stack_prop
fn parse_stack_text(text: &str, column_number: Option<i64>) -> Result<Vec<StackFrame>, NormalizeError> {
    let mut frames = Vec::new();

    for (index, line) in text.split('\n').enumerate() {
        let Some((grammar, raw)) = match_family(&NATIVE_FAMILY, line) else {
            continue;
        };

        let frame = match grammar {
            Grammar::Bracketed => bracketed_frame(raw),
            Grammar::AltRuntime | Grammar::BareCall => {
                let top_column = if index == 0 { column_number } else { None };
                inline_eval_frame(raw, top_column)
            }
            _ => StackFrame::new(
                raw.location,
                Some(raw.function.unwrap_or_else(|| UNKNOWN_FUNCTION.to_string())),
                raw.arguments,
                raw.line,
                raw.column,
            ),
        };

        frames.push(frame);
    }

    if frames.is_empty() {
        return Err(NormalizeError::NoFrames("stack"));
    }
    Ok(frames)
}

/// Build a frame from a bracketed-call match
///
/// Eval locations carry the caller's `(url:line:col)`, which replaces the
/// coordinates inside the evaluated code.
fn bracketed_frame(mut raw: RawFrame) -> StackFrame {
    let is_native = raw.location.starts_with("native");

    if raw.location.starts_with("eval") {
        if let Some(outer) = Grammar::BracketedEval.try_match(&raw.location) {
            raw.location = outer.location;
            raw.line = outer.line;
            raw.column = outer.column;
        }
    }

    let arguments = if is_native {
        vec![raw.location.clone()]
    } else {
        Vec::new()
    };

    StackFrame::new(
        raw.location,
        Some(raw.function.unwrap_or_else(|| UNKNOWN_FUNCTION.to_string())),
        arguments,
        raw.line,
        raw.column,
    )
}

/// Build a frame from an alternate-runtime or bare-call match
///
/// `url line N > eval` locations collapse to the outer url and line N; the
/// column inside the evaluated code is dropped. Otherwise the top frame may
/// take its column from the engine's 0-based out-of-band column.
fn inline_eval_frame(mut raw: RawFrame, top_column: Option<i64>) -> StackFrame {
    let outer = if raw.location.contains(" > eval") {
        Grammar::BareCallEval.try_match(&raw.location)
    } else {
        None
    };

    if let Some(outer) = outer {
        raw.function = raw.function.or_else(|| Some(EVAL_FUNCTION.to_string()));
        raw.location = outer.location;
        raw.line = outer.line;
        raw.column = None;
    } else if raw.column.is_none() {
        if let Some(column) = top_column.and_then(|c| u32::try_from(c).ok()) {
            raw.column = column.checked_add(1);
        }
    }

    StackFrame::new(
        raw.location,
        Some(raw.function.unwrap_or_else(|| UNKNOWN_FUNCTION.to_string())),
        raw.arguments,
        raw.line,
        raw.column,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn frame(url: &str, func: &str, line: Option<u32>, column: Option<u32>) -> StackFrame {
        StackFrame {
            url: url.to_string(),
            function_name: func.to_string(),
            arguments: vec![],
            line,
            column,
        }
    }

    #[test]
    fn test_pop_frames() {
        let trace = NormalizedTrace::new(
            "m",
            None,
            vec![
                frame("a", "f0", Some(1), None),
                frame("a", "f1", Some(2), None),
                frame("a", "f2", Some(3), None),
            ],
        );

        let mut popped = trace.clone();
        pop_frames(&mut popped, 1).unwrap();
        assert_eq!(popped.frames, trace.frames[1..].to_vec());

        let mut untouched = trace.clone();
        pop_frames(&mut untouched, 0).unwrap();
        assert_eq!(untouched, trace);

        let mut emptied = trace.clone();
        pop_frames(&mut emptied, 5).unwrap();
        assert!(emptied.frames.is_empty());

        let mut negative = trace.clone();
        assert_eq!(
            pop_frames(&mut negative, -1),
            Err(NormalizeError::InvalidPopCount(-1))
        );
        assert_eq!(negative, trace);
    }

    #[test]
    fn test_negative_pop_hint_keeps_trace() {
        let error = ErrorLike::new()
            .with_stack("    at foo (http://a.js:10:3)")
            .with_frames_to_pop(-2);
        assert_eq!(compute(&error).frames.len(), 1);
    }

    #[test]
    fn test_native_bracketed_frame_carries_location_argument() {
        let error = ErrorLike::new().with_stack("    at Array.forEach (native)");
        let trace = compute(&error);
        assert_eq!(trace.frames[0].url, "native");
        assert_eq!(trace.frames[0].arguments, vec!["native".to_string()]);
        assert_eq!(trace.frames[0].line, None);
    }

    #[test]
    fn test_bare_call_eval_drops_column_and_names_eval() {
        let error = ErrorLike::new().with_stack("@http://x.js line 5 > eval:42:7");
        let trace = compute(&error);
        assert_eq!(trace.frames, vec![frame("http://x.js", "eval", Some(5), None)]);
    }

    #[test]
    fn test_out_of_band_column_skipped_for_eval_top_frame() {
        let error = ErrorLike::new()
            .with_stack("foo@http://x.js line 5 > eval:42")
            .with_column_number(9);
        let trace = compute(&error);
        assert_eq!(trace.frames[0].column, None);
    }

    #[test]
    fn test_alt_runtime_eval_collapses_to_outer_line() {
        let error = ErrorLike::new()
            .with_stack("   at foo http://x.js line 5 > eval:3:4")
            .with_column_number(9);
        let trace = compute(&error);
        assert_eq!(trace.frames, vec![frame("http://x.js", "foo", Some(5), None)]);
    }

    #[test]
    fn test_alt_runtime_takes_out_of_band_column() {
        let error = ErrorLike::new()
            .with_stack("   at foo ms-appx://app/main.js:10")
            .with_column_number(9);
        let trace = compute(&error);
        assert_eq!(
            trace.frames,
            vec![frame("ms-appx://app/main.js", "foo", Some(10), Some(10))]
        );
    }

    #[test]
    fn test_out_of_band_column_only_for_first_line() {
        let error = ErrorLike::new()
            .with_stack("foo@http://a.js:10:4\nbar@http://a.js:20")
            .with_column_number(9);
        let trace = compute(&error);
        assert_eq!(trace.frames[0].column, Some(4));
        assert_eq!(trace.frames[1].column, None);
    }

    #[test]
    fn test_legacy_path_skips_odd_lines() {
        let error = ErrorLike::new().with_stacktrace(
            "  Line 44 of linked script http://x.js\n  Line 99 of linked script http://y.js\n  Line 12 of inline#1 script in http://x.js: In function bar\n    bar()",
        );
        let trace = compute(&error);
        assert_eq!(
            trace.frames,
            vec![
                frame("http://x.js", "?", Some(44), None),
                frame("http://x.js", "bar", Some(12), None),
            ]
        );
    }
}
