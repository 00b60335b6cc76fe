//! Export pipeline: raw table in, Moxfield CSV and audit record out

use echo2mox_core::{format_run_summary, to_csv_bytes, transform, RuleTables, RunResult, Table};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// File name Moxfield users import
pub const OUTPUT_FILE_NAME: &str = "readyformox.csv";
/// File name of the audit record written next to the output
pub const SUMMARY_FILE_NAME: &str = "summary.txt";

/// Everything one run produces
#[derive(Debug, Clone)]
pub struct ExportOutput {
    /// Normalized table serialized as CSV
    pub csv: Vec<u8>,
    /// Formatted audit record
    pub summary: String,
    pub result: RunResult,
}

/// Transform, serialize and summarize a raw export
pub fn convert(raw: &Table, rules: &RuleTables) -> Result<ExportOutput> {
    let result = transform(raw, rules)?;
    let csv = to_csv_bytes(result.table())?;
    let summary = format_run_summary(&result);

    log::info!(
        "Converted {} rows, {} corrected",
        result.table().len(),
        result.total_changes()
    );
    for line in summary.lines().skip(2) {
        log::debug!("{}", line);
    }

    Ok(ExportOutput {
        csv,
        summary,
        result,
    })
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
            log::info!("Created directory: {}", parent.display());
        }
    }
    Ok(())
}

/// Write the CSV and the audit record, creating parent directories
pub fn write_outputs(
    output: &ExportOutput,
    output_path: &Path,
    summary_path: &Path,
) -> Result<()> {
    ensure_parent(output_path)?;
    fs::write(output_path, &output.csv)?;
    log::info!("Wrote {}", output_path.display());

    ensure_parent(summary_path)?;
    fs::write(summary_path, &output.summary)?;
    log::info!("Wrote {}", summary_path.display());

    Ok(())
}

/// Returns the default output directory: ~/.local/share/echo2mox
pub fn default_output_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("echo2mox")
}
