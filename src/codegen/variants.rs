//! Expansion of multi-identifier cells into separate variants.
//!
//! Spreadsheets maintained by hand mix identifiers with Cyrillic notes and
//! sometimes list several sections in one cell (`feed - search_results`).

use regex::Regex;
use std::sync::OnceLock;

/// Tokens this short are separators or leftovers, never identifiers
const MIN_TOKEN_CHARS: usize = 3;

fn cyrillic_run() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[\x{0400}-\x{04FF}]+").expect("valid cyrillic pattern"))
}

fn spaced_hyphen() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s*-\s*").expect("valid hyphen pattern"))
}

fn whitespace_run() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("valid whitespace pattern"))
}

/// Strip Cyrillic text and hyphens, then collapse whitespace
fn clean(text: &str) -> String {
    let stripped = cyrillic_run().replace_all(text, " ");
    let dehyphenated = spaced_hyphen().replace_all(&stripped, " ");
    whitespace_run()
        .replace_all(&dehyphenated, " ")
        .trim()
        .to_string()
}

/// Split a cell into the identifiers it contains, in left-to-right order.
///
/// Always returns at least one entry: when no token is long enough the
/// cleaned text is returned, or the untouched input if cleaning left nothing.
pub fn split_variants(text: &str) -> Vec<String> {
    let cleaned = clean(text);

    let tokens: Vec<String> = cleaned
        .split_whitespace()
        .filter(|token| token.chars().count() >= MIN_TOKEN_CHARS)
        .map(str::to_string)
        .collect();

    if !tokens.is_empty() {
        return tokens;
    }

    if cleaned.is_empty() {
        vec![text.to_string()]
    } else {
        vec![cleaned]
    }
}
