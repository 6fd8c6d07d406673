//! `crossarm parse` — structured diagnostics from captured compiler output.

use std::path::Path;

use anyhow::{Context, Result};

use crossarm_gcc::{is_not_supported_error, DiagnosticRecord, OutputParser};

use super::load_target;

pub fn run(target_path: &Path, capture: &Path, json: bool) -> Result<()> {
    let target = load_target(target_path)?;
    let output = std::fs::read_to_string(capture)
        .with_context(|| format!("reading captured output {}", capture.display()))?;

    let parser = OutputParser::new(&target.name);
    let mut records: Vec<DiagnosticRecord> = Vec::new();
    parser.parse(&output, &mut records);

    for record in &records {
        if json {
            println!("{}", serde_json::to_string(record)?);
        } else {
            println!(
                "{}:{}:{}: {}: {}",
                record.file, record.line, record.column, record.severity, record.message
            );
            if !record.extra_text.is_empty() {
                print!("{}", record.extra_text);
            }
        }
    }

    if is_not_supported_error(&output) {
        eprintln!("note: output contains the [NOT_SUPPORTED] marker; this target is unsupported by the toolchain");
    }
    Ok(())
}
