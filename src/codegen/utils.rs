//! Identifier casing helpers for generated Swift code.
//!
//! Source cells are snake_case tokens (`boost_photo`). Only underscores act as
//! word boundaries: a cell such as `boostPhoto` is a single word and is
//! re-cased as `Boostphoto`, matching the legacy generator.

use convert_case::{Case, Casing};

/// Convert a snake_case token to lowerCamelCase (`boost_photo` -> `boostPhoto`)
///
/// Empty input, or input made only of underscores, yields an empty string.
pub fn to_lower_camel(s: &str) -> String {
    s.trim().from_case(Case::Snake).to_case(Case::Camel)
}

/// Convert a snake_case token to UpperCamelCase (`boost_photo` -> `BoostPhoto`)
pub fn to_upper_camel(s: &str) -> String {
    s.trim().from_case(Case::Snake).to_case(Case::Pascal)
}
