//! Unified-format rendering.

use crate::diff::engine::compute_hunks;

/// Unchanged lines kept around each change.
pub const CONTEXT_LINES: usize = 3;

/// Render the difference between `before` and `after` in unified format
/// with `--- {from_label}` / `+++ {to_label}` headers.
///
/// Returns an empty string when the inputs hold the same lines.
pub fn unified_diff(before: &str, after: &str, from_label: &str, to_label: &str) -> String {
    let old: Vec<&str> = before.lines().collect();
    let new: Vec<&str> = after.lines().collect();

    let hunks = compute_hunks(&old, &new, CONTEXT_LINES);
    if hunks.is_empty() {
        return String::new();
    }

    let mut out = format!("--- {}\n+++ {}\n", from_label, to_label);
    for hunk in &hunks {
        out.push_str(&hunk.header());
        out.push('\n');
        for line in &hunk.lines {
            out.push(line.marker());
            out.push_str(line.text());
            out.push('\n');
        }
    }
    out
}
