//! Trace Normalizer
//!
//! Turns the free-text stack traces that JavaScript engines attach to error
//! objects into a uniform sequence of frames (url, function, arguments, line,
//! column), without being told which engine produced them.
//!
//! ```
//! use trace_normalizer::parser::{compute, ErrorLike};
//!
//! let error = ErrorLike::new()
//!     .with_message("boom")
//!     .with_stack("TypeError: boom\n    at foo (http://a.js:10:3)");
//!
//! let trace = compute(&error);
//! assert_eq!(trace.frames[0].function_name, "foo");
//! assert_eq!(trace.frames[0].line, Some(10));
//! ```

pub mod commands;
pub mod output;
pub mod parser;
pub mod record;
pub mod utils;
