//! Set-line diff output for `plan`
//!
//! Compares two lists of `set` statements with the similar crate.

use serde::Serialize;
use similar::{ChangeTag, DiffOp, TextDiff};
use std::fmt::Write;

/// Extract hunk range information from diff operations
/// Returns (old_start, old_len, new_start, new_len) in 1-based line numbers for display
fn hunk_ranges(ops: &[DiffOp]) -> (usize, usize, usize, usize) {
    let (Some(first), Some(last)) = (ops.first(), ops.last()) else {
        return (1, 0, 1, 0);
    };
    let old_start = first.old_range().start;
    let new_start = first.new_range().start;
    let old_len = last.old_range().end.saturating_sub(old_start);
    let new_len = last.new_range().end.saturating_sub(new_start);
    (old_start + 1, old_len, new_start + 1, new_len)
}

fn to_text(lines: &[String]) -> String {
    let mut text = lines.join("\n");
    if !text.is_empty() {
        text.push('\n');
    }
    text
}

/// Unified diff of `old` against `new`, empty when they match.
pub fn unified(
    old: &[String],
    new: &[String],
    old_name: &str,
    new_name: &str,
    context_lines: usize,
) -> String {
    let old_text = to_text(old);
    let new_text = to_text(new);
    let diff = TextDiff::from_lines(&old_text, &new_text);

    let mut output = String::new();

    for (index, hunk) in diff
        .unified_diff()
        .context_radius(context_lines)
        .iter_hunks()
        .enumerate()
    {
        if index == 0 {
            let _ = writeln!(output, "--- {}", old_name);
            let _ = writeln!(output, "+++ {}", new_name);
        }

        let (old_start, old_len, new_start, new_len) = hunk_ranges(hunk.ops());
        let _ = writeln!(
            output,
            "@@ -{},{} +{},{} @@",
            old_start, old_len, new_start, new_len
        );

        for change in hunk.iter_changes() {
            let sign = match change.tag() {
                ChangeTag::Delete => '-',
                ChangeTag::Insert => '+',
                ChangeTag::Equal => ' ',
            };
            let _ = write!(output, "{}{}", sign, change.value());
        }
    }

    output
}

/// Diff statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiffSummary {
    /// Statements only in the new list
    pub insertions: usize,
    /// Statements only in the old list
    pub deletions: usize,
}

impl DiffSummary {
    /// Count changed statements between `old` and `new`.
    pub fn between(old: &[String], new: &[String]) -> Self {
        let old_text = to_text(old);
        let new_text = to_text(new);
        let mut summary = Self::default();
        for change in TextDiff::from_lines(&old_text, &new_text).iter_all_changes() {
            match change.tag() {
                ChangeTag::Delete => summary.deletions += 1,
                ChangeTag::Insert => summary.insertions += 1,
                ChangeTag::Equal => {}
            }
        }
        summary
    }

    /// Check if there are any changes
    pub fn has_changes(&self) -> bool {
        self.insertions > 0 || self.deletions > 0
    }
}
