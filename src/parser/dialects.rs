//! Stack line grammars.
//!
//! Each engine renders stack traces in its own undocumented dialect. The
//! grammars below are written so that a real trace line matches at most one
//! family, which lets the text's own shape identify the engine without any
//! user-agent sniffing.
//!
//! Native `stack` text is tried against [`NATIVE_FAMILY`] one line at a time.
//! Legacy `stacktrace` text is tried against [`LEGACY_FAMILY`], two lines at a
//! time. The two eval grammars are never applied to whole lines, only to the
//! location fragment of a line that already matched.

use regex::{Captures, Regex};
use std::fmt;
use std::sync::OnceLock;

/// Raw fragments captured from one line of trace text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFrame {
    pub function: Option<String>,
    pub arguments: Vec<String>,
    pub location: String,
    pub line: Option<u32>,
    pub column: Option<u32>,
}

/// One known stack line dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grammar {
    /// `at fn (location:line:col)`, V8 style
    Bracketed,
    /// `at fn (ms-appx://...:line:col)`, Chakra style
    AltRuntime,
    /// `fn(args)@location:line:col`, SpiderMonkey / JavaScriptCore style
    BareCall,
    /// `eval at fn (url:line:col), <anonymous>` inside a bracketed location
    BracketedEval,
    /// `url line N > eval` inside a bare-call location
    BareCallEval,
    /// `Line N of linked script url: In function f`, Presto 10
    LegacyScript,
    /// `line N, column M in f(args) in url:`, Presto 11
    LegacyColumn,
}

/// Grammars tried against each line of `stack`, in priority order
pub const NATIVE_FAMILY: [Grammar; 3] = [Grammar::Bracketed, Grammar::AltRuntime, Grammar::BareCall];

/// Grammars tried against each line pair of `stacktrace`, in priority order
pub const LEGACY_FAMILY: [Grammar; 2] = [Grammar::LegacyScript, Grammar::LegacyColumn];

static BRACKETED: OnceLock<Regex> = OnceLock::new();
static ALT_RUNTIME: OnceLock<Regex> = OnceLock::new();
static BARE_CALL: OnceLock<Regex> = OnceLock::new();
static BRACKETED_EVAL: OnceLock<Regex> = OnceLock::new();
static BARE_CALL_EVAL: OnceLock<Regex> = OnceLock::new();
static LEGACY_SCRIPT: OnceLock<Regex> = OnceLock::new();
static LEGACY_COLUMN: OnceLock<Regex> = OnceLock::new();

impl Grammar {
    pub const ALL: [Grammar; 7] = [
        Grammar::Bracketed,
        Grammar::AltRuntime,
        Grammar::BareCall,
        Grammar::BracketedEval,
        Grammar::BareCallEval,
        Grammar::LegacyScript,
        Grammar::LegacyColumn,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Grammar::Bracketed => "bracketed",
            Grammar::AltRuntime => "alt-runtime",
            Grammar::BareCall => "bare-call",
            Grammar::BracketedEval => "bracketed-eval",
            Grammar::BareCallEval => "bare-call-eval",
            Grammar::LegacyScript => "legacy-script",
            Grammar::LegacyColumn => "legacy-column",
        }
    }

    /// Pattern source, as compiled by [`Grammar::pattern`]
    pub fn source(self) -> &'static str {
        match self {
            Grammar::Bracketed => {
                r"(?i)^\s*at (?:(.*?) ?\()?((?:file|https?|blob|chrome-extension|native|eval|webpack|<anonymous>|[-a-z]+:|/).*?)(?::([0-9]+))?(?::([0-9]+))?\)?\s*$"
            }
            Grammar::AltRuntime => {
                r"(?i)^\s*at (?:((?:\[object object\])?.+) )?\(?((?:file|ms-appx|https?|webpack|blob):.*?):([0-9]+)(?::([0-9]+))?\)?\s*$"
            }
            Grammar::BareCall => {
                r"(?i)^\s*(.*?)(?:\((.*?)\))?(?:^|@)?((?:file|https?|blob|chrome|webpack|resource|moz-extension).*?:/.*?|\[native code\]|[^@]*(?:bundle|[0-9]+\.js))(?::([0-9]+))?(?::([0-9]+))?\s*$"
            }
            Grammar::BracketedEval => r"\((\S*)(?::([0-9]+))(?::([0-9]+))\)",
            Grammar::BareCallEval => r"(?i)(\S+) line ([0-9]+)(?: > eval line [0-9]+)* > eval",
            Grammar::LegacyScript => r"(?i) line ([0-9]+).*script (?:in )?(\S+)(?:: in function (\S+))?$",
            Grammar::LegacyColumn => {
                r"(?i) line ([0-9]+), column ([0-9]+)\s*(?:in (?:<anonymous function: ([^>]+)>|([^\)]+))\((.*)\))? in (.*):\s*$"
            }
        }
    }

    /// Compiled pattern, built on first use
    pub fn pattern(self) -> &'static Regex {
        let cell = match self {
            Grammar::Bracketed => &BRACKETED,
            Grammar::AltRuntime => &ALT_RUNTIME,
            Grammar::BareCall => &BARE_CALL,
            Grammar::BracketedEval => &BRACKETED_EVAL,
            Grammar::BareCallEval => &BARE_CALL_EVAL,
            Grammar::LegacyScript => &LEGACY_SCRIPT,
            Grammar::LegacyColumn => &LEGACY_COLUMN,
        };
        cell.get_or_init(|| Regex::new(self.source()).expect("Failed to compile stack grammar"))
    }

    /// Decompose one line (or location fragment) into raw fragments
    ///
    /// Returns `None` if the line does not match, if a mandatory line/column
    /// group is missing, or if any captured line/column is not a `u32`.
    pub fn try_match(self, text: &str) -> Option<RawFrame> {
        let caps = self.pattern().captures(text)?;

        let frame = match self {
            Grammar::Bracketed => RawFrame {
                function: capture(&caps, 1),
                arguments: Vec::new(),
                location: capture(&caps, 2)?,
                line: number(&caps, 3)?,
                column: number(&caps, 4)?,
            },
            Grammar::AltRuntime => RawFrame {
                function: capture(&caps, 1),
                arguments: Vec::new(),
                location: capture(&caps, 2)?,
                line: Some(number(&caps, 3)??),
                column: number(&caps, 4)?,
            },
            Grammar::BareCall => RawFrame {
                function: capture(&caps, 1),
                arguments: split_arguments(capture(&caps, 2)),
                location: capture(&caps, 3)?,
                line: number(&caps, 4)?,
                column: number(&caps, 5)?,
            },
            Grammar::BracketedEval => RawFrame {
                location: capture(&caps, 1)?,
                line: Some(number(&caps, 2)??),
                column: Some(number(&caps, 3)??),
                ..RawFrame::default()
            },
            Grammar::BareCallEval => RawFrame {
                location: capture(&caps, 1)?,
                line: Some(number(&caps, 2)??),
                ..RawFrame::default()
            },
            Grammar::LegacyScript => RawFrame {
                function: capture(&caps, 3),
                arguments: Vec::new(),
                location: capture(&caps, 2)?,
                line: Some(number(&caps, 1)??),
                column: None,
            },
            Grammar::LegacyColumn => RawFrame {
                function: capture(&caps, 3).or_else(|| capture(&caps, 4)),
                arguments: split_arguments(capture(&caps, 5)),
                location: capture(&caps, 6)?,
                line: Some(number(&caps, 1)??),
                column: Some(number(&caps, 2)??),
            },
        };

        Some(frame)
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// First grammar of `family` matching `line`
pub fn match_family(family: &[Grammar], line: &str) -> Option<(Grammar, RawFrame)> {
    family
        .iter()
        .find_map(|grammar| grammar.try_match(line).map(|raw| (*grammar, raw)))
}

/// Non-empty capture group as an owned string
fn capture(caps: &Captures<'_>, index: usize) -> Option<String> {
    caps.get(index)
        .map(|m| m.as_str())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Line/column group: `Some(None)` if the group did not take part in the
/// match, `None` if it did but overflows `u32`
fn number(caps: &Captures<'_>, index: usize) -> Option<Option<u32>> {
    match caps.get(index) {
        Some(m) => m.as_str().parse().ok().map(Some),
        None => Some(None),
    }
}

fn split_arguments(arguments: Option<String>) -> Vec<String> {
    arguments
        .map(|args| args.split(',').map(str::to_string).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_grammars_compile() {
        for grammar in Grammar::ALL {
            let _ = grammar.pattern();
        }
    }

    #[test]
    fn test_bracketed_with_function() {
        let raw = Grammar::Bracketed
            .try_match("    at foo (http://a.js:10:3)")
            .unwrap();
        assert_eq!(raw.function.as_deref(), Some("foo"));
        assert_eq!(raw.location, "http://a.js");
        assert_eq!(raw.line, Some(10));
        assert_eq!(raw.column, Some(3));
    }

    #[test]
    fn test_bracketed_without_function() {
        let raw = Grammar::Bracketed.try_match("    at http://a.js:4:1").unwrap();
        assert_eq!(raw.function, None);
        assert_eq!(raw.location, "http://a.js");
        assert_eq!(raw.line, Some(4));
    }

    #[test]
    fn test_bracketed_rejects_header_line() {
        assert!(Grammar::Bracketed.try_match("TypeError: boom").is_none());
    }

    #[test]
    fn test_bracketed_bare_path() {
        let raw = Grammar::Bracketed
            .try_match("    at Object.<anonymous> (/srv/app/index.js:7:15)")
            .unwrap();
        assert_eq!(raw.function.as_deref(), Some("Object.<anonymous>"));
        assert_eq!(raw.location, "/srv/app/index.js");
        assert_eq!(raw.line, Some(7));
        assert_eq!(raw.column, Some(15));
    }

    #[test]
    fn test_alt_runtime_requires_line() {
        let raw = Grammar::AltRuntime
            .try_match("   at onClick (ms-appx://app/js/main.js:21:9)")
            .unwrap();
        assert_eq!(raw.function.as_deref(), Some("onClick"));
        assert_eq!(raw.location, "ms-appx://app/js/main.js");
        assert_eq!(raw.line, Some(21));
        assert_eq!(raw.column, Some(9));

        assert!(Grammar::AltRuntime
            .try_match("   at onClick (ms-appx://app/js/main.js)")
            .is_none());
    }

    #[test]
    fn test_bare_call_with_arguments() {
        let raw = Grammar::BareCall
            .try_match("foo(1,\"a\")@http://a.js:3:9")
            .unwrap();
        assert_eq!(raw.function.as_deref(), Some("foo"));
        assert_eq!(raw.arguments, vec!["1".to_string(), "\"a\"".to_string()]);
        assert_eq!(raw.location, "http://a.js");
        assert_eq!(raw.line, Some(3));
        assert_eq!(raw.column, Some(9));
    }

    #[test]
    fn test_bare_call_native_code() {
        let raw = Grammar::BareCall.try_match("forEach@[native code]").unwrap();
        assert_eq!(raw.function.as_deref(), Some("forEach"));
        assert_eq!(raw.location, "[native code]");
        assert_eq!(raw.line, None);
    }

    #[test]
    fn test_bare_call_bundle_filename() {
        let raw = Grammar::BareCall.try_match("render@main.bundle:12:4").unwrap();
        assert_eq!(raw.location, "main.bundle");
        assert_eq!(raw.line, Some(12));
    }

    #[test]
    fn test_bare_call_eval_location() {
        let raw = Grammar::BareCallEval
            .try_match("http://x.js line 5 > eval line 2 > eval")
            .unwrap();
        assert_eq!(raw.location, "http://x.js");
        assert_eq!(raw.line, Some(5));
        assert_eq!(raw.column, None);
    }

    #[test]
    fn test_bracketed_eval_location() {
        let raw = Grammar::BracketedEval
            .try_match("eval at foo (http://x.js:42:7), <anonymous>")
            .unwrap();
        assert_eq!(raw.location, "http://x.js");
        assert_eq!(raw.line, Some(42));
        assert_eq!(raw.column, Some(7));
    }

    #[test]
    fn test_legacy_script() {
        let raw = Grammar::LegacyScript
            .try_match("  Line 12 of inline#1 script in http://x.js: In function bar")
            .unwrap();
        assert_eq!(raw.line, Some(12));
        assert_eq!(raw.location, "http://x.js");
        assert_eq!(raw.function.as_deref(), Some("bar"));
    }

    #[test]
    fn test_legacy_column_anonymous_function() {
        let raw = Grammar::LegacyColumn
            .try_match(
                "Error thrown at line 42, column 12 in <anonymous function: createException>(x) in http://x.js:",
            )
            .unwrap();
        assert_eq!(raw.line, Some(42));
        assert_eq!(raw.column, Some(12));
        assert_eq!(raw.function.as_deref(), Some("createException"));
        assert_eq!(raw.arguments, vec!["x".to_string()]);
        assert_eq!(raw.location, "http://x.js");
    }

    #[test]
    fn test_numeric_overflow_is_no_match() {
        assert!(Grammar::AltRuntime
            .try_match("   at f (http://a.js:99999999999:1)")
            .is_none());
        assert!(Grammar::Bracketed
            .try_match("    at foo (http://a.js:5000000000:3)")
            .is_none());
        assert!(Grammar::Bracketed
            .try_match("    at foo (http://a.js:10:5000000000)")
            .is_none());
        assert!(Grammar::BareCall
            .try_match("foo@http://a.js:5000000000:3")
            .is_none());
        assert!(Grammar::LegacyColumn
            .try_match("Error thrown at line 5000000000, column 1 in f() in http://x.js:")
            .is_none());
    }

    #[test]
    fn test_non_ascii_digits_are_not_numbers() {
        let raw = Grammar::Bracketed
            .try_match("    at foo (http://a.js:\u{661}\u{660}:3)")
            .unwrap();
        assert_eq!(raw.location, "http://a.js:\u{661}\u{660}");
        assert_eq!(raw.line, Some(3));
        assert_eq!(raw.column, None);

        assert!(Grammar::BareCallEval
            .try_match("http://x.js line \u{665} > eval")
            .is_none());
    }

    #[test]
    fn test_match_family_priority() {
        let (grammar, _) =
            match_family(&NATIVE_FAMILY, "    at foo (http://a.js:10:3)").unwrap();
        assert_eq!(grammar, Grammar::Bracketed);

        let (grammar, _) = match_family(&NATIVE_FAMILY, "foo@http://a.js:10:3").unwrap();
        assert_eq!(grammar, Grammar::BareCall);

        assert!(match_family(&NATIVE_FAMILY, "nothing to see").is_none());
    }
}
