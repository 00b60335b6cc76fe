//! echo2mox core - EchoMTG export normalization
//!
//! Turns an EchoMTG inventory export into the column layout Moxfield imports,
//! correcting card names and set codes along the way and keeping an audit
//! trail of every row that was touched.
//!
//! Everything in this crate is synchronous and in-memory. Fetching the export
//! and delivering the result belong to the `echo2mox` application crate.

pub mod corrector;
pub mod error;
pub mod formatters;
pub mod normalize;
pub mod rules;
pub mod table;
pub mod transform;

// Re-export commonly used items
pub use corrector::{correct_row, Correction, RowCorrector};
pub use error::{Error, Result};
pub use formatters::{format_change, format_run_summary};
pub use normalize::{clean_card_name, strip_artwork_variant_marker, strip_parenthetical};
pub use rules::{EditionMigration, RuleTables};
pub use table::{read_csv, read_csv_path, to_csv_bytes, write_csv, Table};
pub use transform::{coerce_count, coerce_foil, transform, ChangeRecord, RunResult};
