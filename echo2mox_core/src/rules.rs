//! Correction rule tables
//!
//! The built-in rules live in the constant tables below. A JSON file with the
//! same shape as [`RuleTables`] can replace them at runtime, so adding a rename
//! or an edition override never needs a rebuild.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// EchoMTG columns with no counterpart in the Moxfield import
const COLUMNS_TO_DROP: &[&str] = &[
    "Set",
    "Rarity",
    "Date Acquired",
    "Marked as Trade",
    "note",
    "tcg_market",
    "tcg_mid",
    "tcg_low",
    "foil_price",
    "echo_inventory_id",
    "tcgid",
    "echoid",
];

/// EchoMTG column name -> Moxfield column name.
/// Name, Condition, Language and Collector Number already match.
const COLUMN_RENAMES: &[(&str, &str)] = &[
    ("Acquired", "Purchased Price"),
    ("Reg Qty", "Count"),
    ("Foil Qty", "Foil"),
    ("Set Code", "Edition"),
];

/// Cleaned EchoMTG card name -> canonical card name
const CARD_RENAMES: &[(&str, &str)] = &[
    ("Enlightened Tutor - 2000 Nicolas Labarre", "Enlightened Tutor"),
    ("Scroll Rack - 1998 Brian Selden", "Scroll Rack"),
];

/// Canonical card name -> set code Moxfield expects for it
const EDITION_OVERRIDES: &[(&str, &str)] = &[
    ("Acidic Soil", "PLST"),
    ("Aethersphere Harvester", "PAER"),
    ("Arena", "PHPR"),
    ("Clash of Wills", "ORI"),
    ("Convention Maro", "SLP"),
    ("Enlightened Tutor", "WC00"),
    ("Everflowing Chalice", "PLST"),
    ("Fabled Passage", "PW21"),
    ("Field of the Dead", "PM20"),
    ("Gilt-Leaf Palace", "PLST"),
    ("Mishra's Factory", "PLST"),
    ("Nadir Kraken", "PTHB"),
    ("Oubliette", "PLST"),
    ("Ratchet Bomb", "PM14"),
    ("Rip Apart", "STX"),
    ("Salivating Gremlins", "PLST"),
    ("Sanctum Gargoyle", "PLST"),
    ("Scourge of the Throne", "PLST"),
    ("Scroll Rack", "WC98"),
    ("Shrapnel Blast", "F08"),
    ("Slaying Fire", "ELD"),
    ("Solemnity", "PHOU"),
    ("Temur Battle Rage", "PLST"),
    ("Thrill of Possibility", "PLST"),
    ("Xiahou Dun, the One-Eyed", "J12"),
    ("Voja, Jaws of the Conclave", "MKM"),
];

/// EchoMTG still exports The List as "PLIST"; Moxfield knows it as "PLST"
const GLOBAL_MIGRATION: (&str, &str) = ("PLIST", "PLST");

/// A set code rewritten on every row, before per-card overrides
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditionMigration {
    pub from: String,
    pub to: String,
}

impl EditionMigration {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Returns the migrated code, or `edition` itself when it does not match
    pub fn apply<'a>(&'a self, edition: &'a str) -> &'a str {
        if edition == self.from {
            &self.to
        } else {
            edition
        }
    }
}

/// Read-only lookup data driving the column stage and the row corrections.
///
/// Sections missing from a rule file deserialize as empty, and a missing or
/// `null` `migration` disables the global set-code rewrite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleTables {
    #[serde(default)]
    pub columns_to_drop: BTreeSet<String>,
    #[serde(default)]
    pub column_renames: BTreeMap<String, String>,
    #[serde(default)]
    pub card_renames: BTreeMap<String, String>,
    #[serde(default)]
    pub edition_overrides: BTreeMap<String, String>,
    #[serde(default)]
    pub migration: Option<EditionMigration>,
}

impl Default for RuleTables {
    fn default() -> Self {
        fn pairs(table: &[(&str, &str)]) -> BTreeMap<String, String> {
            table
                .iter()
                .map(|(from, to)| (from.to_string(), to.to_string()))
                .collect()
        }

        Self {
            columns_to_drop: COLUMNS_TO_DROP.iter().map(|c| c.to_string()).collect(),
            column_renames: pairs(COLUMN_RENAMES),
            card_renames: pairs(CARD_RENAMES),
            edition_overrides: pairs(EDITION_OVERRIDES),
            migration: Some(EditionMigration::new(GLOBAL_MIGRATION.0, GLOBAL_MIGRATION.1)),
        }
    }
}

impl RuleTables {
    /// Rule tables that change nothing
    pub fn empty() -> Self {
        Self {
            columns_to_drop: BTreeSet::new(),
            column_renames: BTreeMap::new(),
            card_renames: BTreeMap::new(),
            edition_overrides: BTreeMap::new(),
            migration: None,
        }
    }

    /// Parse rule tables from a JSON document
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Load rule tables from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let rules = Self::from_json(&content).map_err(|source| Error::Rules {
            path: path.to_path_buf(),
            source,
        })?;

        log::info!(
            "Loaded rules from {}: {} dropped columns, {} column renames, {} card renames, {} edition overrides",
            path.display(),
            rules.columns_to_drop.len(),
            rules.column_renames.len(),
            rules.card_renames.len(),
            rules.edition_overrides.len()
        );

        Ok(rules)
    }

    /// Serialize as pretty-printed JSON, the format [`RuleTables::load`] reads
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn drops_column(&self, column: &str) -> bool {
        self.columns_to_drop.contains(column)
    }

    /// Target name for a column; unmapped columns keep their name
    pub fn rename_column<'a>(&'a self, column: &'a str) -> &'a str {
        self.column_renames
            .get(column)
            .map(String::as_str)
            .unwrap_or(column)
    }

    /// Canonical name for a cleaned card name; absent keys are identity
    pub fn rename_card<'a>(&'a self, name: &'a str) -> &'a str {
        self.card_renames
            .get(name)
            .map(String::as_str)
            .unwrap_or(name)
    }

    /// Mandatory set code for a canonical card name, if any
    pub fn edition_override(&self, name: &str) -> Option<&str> {
        self.edition_overrides.get(name).map(String::as_str)
    }

    /// Apply the global set-code migration, if one is configured
    pub fn migrate_edition<'a>(&'a self, edition: &'a str) -> &'a str {
        match &self.migration {
            Some(migration) => migration.apply(edition),
            None => edition,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn default_rules_cover_echomtg_columns() {
        let rules = RuleTables::default();
        assert_eq!(rules.columns_to_drop.len(), 12);
        assert!(rules.drops_column("echoid"));
        assert!(rules.drops_column("tcg_market"));
        assert!(!rules.drops_column("Name"));
        assert_eq!(rules.rename_column("Set Code"), "Edition");
        assert_eq!(rules.rename_column("Reg Qty"), "Count");
        assert_eq!(rules.rename_column("Foil Qty"), "Foil");
        assert_eq!(rules.rename_column("Acquired"), "Purchased Price");
        assert_eq!(rules.rename_column("Condition"), "Condition");
    }

    #[test]
    fn default_rules_carry_card_corrections() {
        let rules = RuleTables::default();
        assert_eq!(rules.edition_overrides.len(), 26);
        assert_eq!(
            rules.rename_card("Scroll Rack - 1998 Brian Selden"),
            "Scroll Rack"
        );
        assert_eq!(rules.rename_card("Lightning Bolt"), "Lightning Bolt");
        assert_eq!(rules.edition_override("Scroll Rack"), Some("WC98"));
        assert_eq!(rules.edition_override("Voja, Jaws of the Conclave"), Some("MKM"));
        assert_eq!(rules.edition_override("Lightning Bolt"), None);
    }

    #[test]
    fn migration_rewrites_only_exact_code() {
        let rules = RuleTables::default();
        assert_eq!(rules.migrate_edition("PLIST"), "PLST");
        assert_eq!(rules.migrate_edition("plist"), "plist");
        assert_eq!(rules.migrate_edition("PLST"), "PLST");
        assert_eq!(rules.migrate_edition("M21"), "M21");
    }

    #[test]
    fn empty_rules_are_identity() {
        let rules = RuleTables::empty();
        assert_eq!(rules.rename_column("Set Code"), "Set Code");
        assert_eq!(
            rules.rename_card("Scroll Rack - 1998 Brian Selden"),
            "Scroll Rack - 1998 Brian Selden"
        );
        assert_eq!(rules.migrate_edition("PLIST"), "PLIST");
        assert!(!rules.drops_column("echoid"));
    }

    #[test]
    fn partial_json_leaves_other_sections_empty() {
        let rules = RuleTables::from_json(
            r#"{ "card_renames": { "Sol Ring - Borderless": "Sol Ring" } }"#,
        )
        .unwrap();

        assert_eq!(rules.rename_card("Sol Ring - Borderless"), "Sol Ring");
        assert!(rules.columns_to_drop.is_empty());
        assert!(rules.edition_overrides.is_empty());
        assert_eq!(rules.migration, None);
    }

    #[test]
    fn json_dump_loads_back_unchanged() {
        let rules = RuleTables::default();
        let json = rules.to_json_pretty().unwrap();

        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", json).unwrap();

        let loaded = RuleTables::load(file.path()).unwrap();
        assert_eq!(loaded, rules);
    }

    #[test]
    fn load_reports_invalid_json_with_path() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        let err = RuleTables::load(file.path()).unwrap_err();
        match err {
            Error::Rules { path, .. } => assert_eq!(path, file.path()),
            other => panic!("expected rules error, got {other:?}"),
        }
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = RuleTables::load(Path::new("/this/path/does/not/exist/rules.json")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
