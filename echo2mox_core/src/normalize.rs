//! Card name cleanup applied before rule lookups

use lazy_static::lazy_static;
use regex::Regex;

/// Suffix EchoMTG appends to Japanese full-art printings
pub const JP_FULL_ART_MARKER: &str = "- JP Full Art";

lazy_static! {
    // Shortest "(...)" span plus the whitespace around it. Unbalanced
    // parentheses never match and are left alone.
    static ref PARENTHETICAL: Regex = Regex::new(r"\s*\(.*?\)\s*").expect("valid regex");
}

/// Removes every parenthetical group and the whitespace around it.
///
/// Each group collapses to a single space before trimming, so words on
/// either side stay separated: `"Foo (Bar) Baz (Qux)"` becomes `"Foo Baz"`.
pub fn strip_parenthetical(text: &str) -> String {
    PARENTHETICAL.replace_all(text, " ").trim().to_string()
}

/// Removes the [`JP_FULL_ART_MARKER`] wherever it occurs
pub fn strip_artwork_variant_marker(text: &str) -> String {
    text.replace(JP_FULL_ART_MARKER, "").trim().to_string()
}

/// Full name cleanup: parentheticals first, then the artwork marker
pub fn clean_card_name(name: &str) -> String {
    strip_artwork_variant_marker(&strip_parenthetical(name))
}
