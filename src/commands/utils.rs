use crate::output::read_records;
use crate::parser::{Grammar, LEGACY_FAMILY, NATIVE_FAMILY};
use crate::utils::config::RECORD_SCHEMA_VERSION;
use anyhow::Result;
use std::path::PathBuf;

/// Validate a JSON lines record file
pub fn validate_records_file(file_path: PathBuf) -> Result<()> {
    println!("Validating records: {}", file_path.display());

    let records = read_records(&file_path)?;
    let frames: usize = records.iter().map(|r| r.stack_trace.len()).sum();
    let empty = records.iter().filter(|r| r.stack_trace.is_empty()).count();

    println!("✓ Valid record file");
    println!("  Records: {}", records.len());
    println!("  Frames: {}", frames);
    println!("  Records without frames: {}", empty);

    Ok(())
}

/// Display the stack line grammars
pub fn display_dialects(show_patterns: bool) {
    println!("Stack line grammars");
    println!();

    print_family("stack (one line at a time)", &NATIVE_FAMILY, show_patterns);
    print_family(
        "eval locations (applied to a matched location)",
        &[Grammar::BracketedEval, Grammar::BareCallEval],
        show_patterns,
    );
    print_family("stacktrace (two lines at a time)", &LEGACY_FAMILY, show_patterns);

    if !show_patterns {
        println!("Use --show for the full patterns");
    }
}

fn print_family(title: &str, family: &[Grammar], show_patterns: bool) {
    println!("{}:", title);
    for (priority, grammar) in family.iter().enumerate() {
        println!("  {}. {}", priority + 1, grammar);
        if show_patterns {
            println!("       {}", grammar.source());
        }
    }
    println!();
}

/// Display version information
pub fn display_version() {
    println!("Trace Normalizer v{}", env!("CARGO_PKG_VERSION"));
    println!("Record Schema: v{}", RECORD_SCHEMA_VERSION);
    println!();
    println!("Normalizes vendor-specific JavaScript stack traces into uniform error records.");
}
