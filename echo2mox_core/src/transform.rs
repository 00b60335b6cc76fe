//! EchoMTG export -> Moxfield import table
//!
//! [`transform`] runs the column stage (drop, rename, Foil/Count coercion)
//! and then every row through the [`RowCorrector`], collecting a
//! [`ChangeRecord`] for each row whose name or edition moved.

use crate::corrector::RowCorrector;
use crate::error::{Error, Result};
use crate::rules::RuleTables;
use crate::table::Table;

pub const NAME_COLUMN: &str = "Name";
pub const EDITION_COLUMN: &str = "Edition";
pub const FOIL_COLUMN: &str = "Foil";
pub const COUNT_COLUMN: &str = "Count";

/// Moxfield's marker for a foil finish
pub const FOIL_FLAG: &str = "foil";

/// Audit entry for one corrected row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRecord {
    pub original_name: String,
    pub original_edition: String,
    pub new_name: String,
    pub new_edition: String,
}

/// Normalized table plus the ordered change log of one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunResult {
    table: Table,
    changes: Vec<ChangeRecord>,
}

impl RunResult {
    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn changes(&self) -> &[ChangeRecord] {
        &self.changes
    }

    pub fn total_changes(&self) -> usize {
        self.changes.len()
    }

    pub fn into_table(self) -> Table {
        self.table
    }
}

fn numeric_value(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok()
}

/// `1` -> `"foil"`, `0` -> `""`, anything else unchanged
pub fn coerce_foil(value: &str) -> String {
    match numeric_value(value) {
        Some(v) if v == 1.0 => FOIL_FLAG.to_string(),
        Some(v) if v == 0.0 => String::new(),
        _ => {
            if !value.is_empty() && value != FOIL_FLAG {
                log::debug!("Foil value '{}' kept as-is", value);
            }
            value.to_string()
        }
    }
}

/// `0` -> `"1"`, anything else unchanged
pub fn coerce_count(value: &str) -> String {
    match numeric_value(value) {
        Some(v) if v == 0.0 => "1".to_string(),
        _ => value.to_string(),
    }
}

fn required_column(headers: &[String], name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| Error::MissingRequiredColumn(name.to_string()))
}

/// Normalize a raw export.
///
/// Fails with [`Error::MissingRequiredColumn`] when `Name` or `Edition` is
/// absent after renaming. Every other column is optional.
pub fn transform(raw: &Table, rules: &RuleTables) -> Result<RunResult> {
    let kept: Vec<usize> = raw
        .headers()
        .iter()
        .enumerate()
        .filter(|(_, header)| !rules.drops_column(header))
        .map(|(i, _)| i)
        .collect();

    let headers: Vec<String> = kept
        .iter()
        .map(|&i| rules.rename_column(&raw.headers()[i]).to_string())
        .collect();

    let name_index = required_column(&headers, NAME_COLUMN)?;
    let edition_index = required_column(&headers, EDITION_COLUMN)?;
    let foil_index = headers.iter().position(|h| h == FOIL_COLUMN);
    let count_index = headers.iter().position(|h| h == COUNT_COLUMN);

    log::debug!(
        "Column stage: {} of {} columns kept",
        headers.len(),
        raw.headers().len()
    );

    let corrector = RowCorrector::new(rules);
    let mut changes = Vec::new();
    let mut rows = Vec::with_capacity(raw.len());

    for raw_row in raw.rows() {
        let mut row: Vec<String> = kept.iter().map(|&i| raw_row[i].clone()).collect();

        if let Some(i) = foil_index {
            row[i] = coerce_foil(&row[i]);
        }
        if let Some(i) = count_index {
            row[i] = coerce_count(&row[i]);
        }

        let correction = corrector.correct(&row[name_index], &row[edition_index]);
        if correction.changed {
            let change = ChangeRecord {
                original_name: std::mem::take(&mut row[name_index]),
                original_edition: std::mem::take(&mut row[edition_index]),
                new_name: correction.name.clone(),
                new_edition: correction.edition.clone(),
            };
            log::debug!(
                "Corrected '{}' ({}) -> '{}' ({})",
                change.original_name,
                change.original_edition,
                change.new_name,
                change.new_edition
            );
            changes.push(change);
        }

        row[name_index] = correction.name;
        row[edition_index] = correction.edition;
        rows.push(row);
    }

    log::debug!("Transformed {} rows, {} changed", rows.len(), changes.len());

    Ok(RunResult {
        table: Table::new(headers, rows),
        changes,
    })
}

#[cfg(test)]
#[path = "transform_tests.rs"]
mod tests;
