//! Parsing of the toolchain's diagnostic output.
//!
//! gcc diagnostics are inherently multi-line: a header line names file,
//! line, severity, and message; the following lines carry the offending
//! source snippet and notes; a caret line marks the column. A single-line
//! pattern cannot capture that, so the scanner is a two-state machine that
//! defers emission until it knows no more lines belong to the current
//! diagnostic (a new header arrives, a caret line arrives, or input ends).

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

/// Toolchain identifier attached to every emitted record.
pub const TOOLCHAIN_NAME: &str = "GCC_ARM";

/// gcc's marker for a target the toolchain cannot build. Recognizing it
/// lets the caller fail the build early with a clearer message than an
/// ordinary compile error.
const NOT_SUPPORTED_MARKER: &str = "error: #error [NOT_SUPPORTED]";

fn header_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"(?P<file>[^:]+):(?P<line>\d+):(?:\d+:)? (?P<severity>warning|[eE]rror|fatal error): (?P<message>.+)",
        )
        .expect("diagnostic header pattern is valid")
    })
}

fn caret_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // Anchored: leading whitespace then the caret; the squiggly span gcc
    // prints after the caret is irrelevant.
    PATTERN.get_or_init(|| Regex::new(r"^(?P<col>\s*)\^").expect("caret pattern is valid"))
}

/// Diagnostic severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Severity {
    Warning,
    Error,
    Fatal,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Fatal => "fatal error",
        })
    }
}

/// One structured diagnostic, assembled from a multi-line block of tool
/// output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct DiagnosticRecord {
    pub severity: Severity,
    /// Source file the tool attributed the diagnostic to.
    pub file: String,
    pub line: u32,
    /// Column from the caret line; 0 when no caret line arrived.
    pub column: u32,
    pub message: String,
    /// Continuation lines (source snippet, notes), newline-terminated.
    pub extra_text: String,
    /// Which target's build produced this, for multi-target sessions.
    pub target_name: String,
    pub toolchain_name: String,
}

/// Receives records one at a time as the scanner completes them.
pub trait DiagnosticSink {
    fn diagnostic(&mut self, record: DiagnosticRecord);
}

impl DiagnosticSink for Vec<DiagnosticRecord> {
    fn diagnostic(&mut self, record: DiagnosticRecord) {
        self.push(record);
    }
}

/// A diagnostic whose continuation lines are still being collected.
struct Pending {
    severity: Severity,
    file: String,
    line: u32,
    message: String,
    extra_text: String,
}

enum ScanState {
    Idle,
    Accumulating(Pending),
}

/// Single-pass scanner over one completed process's captured output.
///
/// Feed it the whole stream of exactly one toolchain invocation; it holds
/// at most the one diagnostic currently being assembled and emits each
/// completed record to the sink immediately.
pub struct OutputParser {
    target_name: String,
}

impl OutputParser {
    pub fn new(target_name: impl Into<String>) -> Self {
        Self {
            target_name: target_name.into(),
        }
    }

    /// Scan `output`, emitting every completed diagnostic to `sink`.
    pub fn parse(&self, output: &str, sink: &mut dyn DiagnosticSink) {
        let mut state = ScanState::Idle;
        for line in output.lines() {
            state = self.step(state, line, sink);
        }
        // End of input finalizes a still-pending diagnostic.
        if let ScanState::Accumulating(pending) = state {
            sink.diagnostic(self.finish(pending, 0));
        }
    }

    fn step(&self, state: ScanState, line: &str, sink: &mut dyn DiagnosticSink) -> ScanState {
        if let Some(caps) = header_pattern().captures(line) {
            // A new header terminates whatever was accumulating, column
            // unknown.
            if let ScanState::Accumulating(pending) = state {
                sink.diagnostic(self.finish(pending, 0));
            }
            let severity = match &caps["severity"] {
                "warning" => Severity::Warning,
                "fatal error" => Severity::Fatal,
                _ => Severity::Error,
            };
            return ScanState::Accumulating(Pending {
                severity,
                file: caps["file"].to_string(),
                line: caps["line"].parse().unwrap_or(0),
                message: caps["message"].to_string(),
                extra_text: String::new(),
            });
        }

        match state {
            ScanState::Idle => ScanState::Idle, // non-diagnostic build noise
            ScanState::Accumulating(mut pending) => {
                if let Some(caps) = caret_pattern().captures(line) {
                    let column = caps["col"].chars().count() as u32;
                    sink.diagnostic(self.finish(pending, column));
                    ScanState::Idle
                } else {
                    pending.extra_text.push_str(line);
                    pending.extra_text.push('\n');
                    ScanState::Accumulating(pending)
                }
            }
        }
    }

    fn finish(&self, pending: Pending, column: u32) -> DiagnosticRecord {
        DiagnosticRecord {
            severity: pending.severity,
            file: pending.file,
            line: pending.line,
            column,
            message: pending.message,
            extra_text: pending.extra_text,
            target_name: self.target_name.clone(),
            toolchain_name: TOOLCHAIN_NAME.to_string(),
        }
    }
}

/// Whether captured output contains gcc's "target not supported" marker,
/// as distinct from an ordinary compile error.
pub fn is_not_supported_error(output: &str) -> bool {
    output.contains(NOT_SUPPORTED_MARKER)
}
