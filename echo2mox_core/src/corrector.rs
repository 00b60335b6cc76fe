//! Per-row name and edition correction

use crate::normalize::clean_card_name;
use crate::rules::RuleTables;

/// Outcome of correcting one row's name and edition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Correction {
    pub name: String,
    pub edition: String,
    /// True when either value differs from the raw input
    pub changed: bool,
}

/// Applies a set of [`RuleTables`] to card name/edition pairs.
///
/// The stages run in a fixed order and each one sees the output of the one
/// before it:
///
/// 1. clean the name (parentheticals, artwork marker)
/// 2. rename the cleaned name
/// 3. apply the global edition migration
/// 4. look up the per-card edition override by the *renamed* name
#[derive(Debug, Clone, Copy)]
pub struct RowCorrector<'a> {
    rules: &'a RuleTables,
}

impl<'a> RowCorrector<'a> {
    pub fn new(rules: &'a RuleTables) -> Self {
        Self { rules }
    }

    pub fn correct(&self, raw_name: &str, raw_edition: &str) -> Correction {
        let cleaned = clean_card_name(raw_name);
        let name = self.rules.rename_card(&cleaned).to_string();

        let migrated = self.rules.migrate_edition(raw_edition);
        let edition = self
            .rules
            .edition_override(&name)
            .unwrap_or(migrated)
            .to_string();

        let changed = name != raw_name || edition != raw_edition;

        Correction {
            name,
            edition,
            changed,
        }
    }
}

/// Correct a single name/edition pair against `rules`
pub fn correct_row(rules: &RuleTables, raw_name: &str, raw_edition: &str) -> Correction {
    RowCorrector::new(rules).correct(raw_name, raw_edition)
}

#[cfg(test)]
#[path = "corrector_tests.rs"]
mod tests;
