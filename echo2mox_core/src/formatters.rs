use crate::transform::{ChangeRecord, RunResult};

pub fn format_change(change: &ChangeRecord) -> String {
    format!(
        "Original: {} (Edition: {}) -> New: {} (Edition: {})",
        change.original_name, change.original_edition, change.new_name, change.new_edition
    )
}

/// Audit record for a run: the change count, a blank line, then one line per
/// corrected row in input order.
pub fn format_run_summary(result: &RunResult) -> String {
    let mut output = format!("Total changes: {}\n\n", result.total_changes());
    let lines: Vec<String> = result.changes().iter().map(format_change).collect();
    output.push_str(&lines.join("\n"));
    output
}
