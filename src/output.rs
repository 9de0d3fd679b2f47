//! CLI output formatting.
//!
//! Each piece of terminal output has a `format_*` function returning lines
//! (pure, no I/O, so tests can assert on exact text) and a `print_*` wrapper
//! that writes them to stdout.
//!
//! ```text
//! Importing posts from: linkedin_posts.csv
//! Output directory: content/posts
//! ------------------------------------------------------------
//! ✓ Created: content/posts/hello-world.md
//! ❌ Row 3: Missing required field(s)
//! ❌ Row 4: Invalid date format (expected YYYY-MM-DD): 2024-13-01
//! Skipped: same-title.md
//! ------------------------------------------------------------
//! Import complete:
//!   ✓ Successfully imported: 1
//!   ✗ Errors: 3
//! ```
//!
//! Overwrite prompts are printed by [`crate::writer::StdinPrompt`] itself so
//! they appear before the answer is read.

use crate::import::{ImportSummary, RowEvent};
use crate::record::RecordError;
use crate::validate::ValidationError;
use std::path::Path;

const RULE_WIDTH: usize = 60;

fn rule() -> String {
    "-".repeat(RULE_WIDTH)
}

/// File name of a path, falling back to the full display form.
fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

// ============================================================================
// Run banner
// ============================================================================

pub fn format_banner(input: &Path, output_dir: &Path, dry_run: bool) -> Vec<String> {
    let mut lines = vec![
        format!("Importing posts from: {}", input.display()),
        format!("Output directory: {}", output_dir.display()),
    ];
    if dry_run {
        lines.push("Dry run: no files will be written".to_string());
    }
    lines.push(rule());
    lines
}

pub fn print_banner(input: &Path, output_dir: &Path, dry_run: bool) {
    for line in format_banner(input, output_dir, dry_run) {
        println!("{}", line);
    }
}

// ============================================================================
// Per-row events
// ============================================================================

/// Format one row's terminal state.
///
/// Validation failures keep their short historical wording; the missing
/// field names go to the log instead.
pub fn format_row_event(event: &RowEvent) -> Vec<String> {
    match event {
        RowEvent::Written { path, .. } => vec![format!("✓ Created: {}", path.display())],
        RowEvent::Planned { path, .. } => vec![format!("Would create: {}", path.display())],
        RowEvent::Conflict { row, path } => vec![format!(
            "⚠️  Row {}: Would conflict with existing file: {}",
            row,
            path.display()
        )],
        RowEvent::Skipped { path, .. } => vec![format!("Skipped: {}", file_name(path))],
        RowEvent::Rejected { row, error } => match error {
            ValidationError::MissingField(_) => {
                vec![format!("❌ Row {}: Missing required field(s)", row)]
            }
            ValidationError::InvalidDateFormat(_) => vec![format!("❌ Row {}: {}", row, error)],
        },
        RowEvent::Failed { row, error } => vec![format!("❌ Row {}: Error - {}", row, error)],
    }
}

pub fn print_row_event(event: &RowEvent) {
    for line in format_row_event(event) {
        println!("{}", line);
    }
}

// ============================================================================
// Summary and fatal errors
// ============================================================================

pub fn format_summary(summary: &ImportSummary) -> Vec<String> {
    vec![
        rule(),
        "Import complete:".to_string(),
        format!("  ✓ Successfully imported: {}", summary.succeeded),
        format!("  ✗ Errors: {}", summary.failed),
    ]
}

pub fn print_summary(summary: &ImportSummary) {
    for line in format_summary(summary) {
        println!("{}", line);
    }
}

/// Format a run-aborting error (missing input, bad header).
pub fn format_fatal(error: &RecordError) -> Vec<String> {
    match error {
        RecordError::Schema { found, .. } => vec![
            format!(
                "❌ Error: CSV must contain columns: {}",
                crate::record::REQUIRED_COLUMNS.join(", ")
            ),
            format!("Found columns: {}", found.join(", ")),
        ],
        other => vec![format!("❌ Error: {}", other)],
    }
}

pub fn print_fatal(error: &RecordError) {
    for line in format_fatal(error) {
        eprintln!("{}", line);
    }
}
