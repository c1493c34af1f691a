// src/catalog/normalize.rs
//! Cleanup of spreadsheet-shaped values before they reach SQL.

use super::types::PostalCode;
use regex::Regex;
use std::sync::LazyLock;

static ZIP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,5})(-\d{4})?$").unwrap_or_else(|_| panic!("Invalid Regex"))
});

/// Pads numeric postal codes back to five digits. A ZIP+4 suffix is kept;
/// anything that isn't a US ZIP passes through trimmed.
#[must_use]
pub fn postal_code(raw: &PostalCode) -> String {
    match raw {
        PostalCode::Number(n) => format!("{n:05}"),
        PostalCode::Text(s) => {
            let s = s.trim();
            match ZIP_RE.captures(s) {
                Some(caps) => {
                    let base = caps.get(1).map_or("", |m| m.as_str());
                    let plus4 = caps.get(2).map_or("", |m| m.as_str());
                    format!("{base:0>5}{plus4}")
                }
                None => s.to_string(),
            }
        }
    }
}

/// `"Air Force"` becomes `AIR_FORCE`. Blank input means no affiliation.
#[must_use]
pub fn affiliation(raw: Option<&str>) -> Option<String> {
    let words: Vec<String> = raw?.split_whitespace().map(str::to_uppercase).collect();
    if words.is_empty() {
        return None;
    }
    Some(words.join("_"))
}

/// Trimmed text, with blank treated as absent.
#[must_use]
pub fn text(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string)
}

/// True when `value` contains a line break, tab or other control character.
#[must_use]
pub fn has_control(value: &str) -> bool {
    value.chars().any(char::is_control)
}
