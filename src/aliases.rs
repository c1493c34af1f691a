// src/aliases.rs
//! Alias reconciliation: keeps `duty_location_names` attached to the surviving identity.

use crate::ids::IdGenerator;
use crate::sql::{quote, Statement, ALIASES_TABLE};

/// Splits a delimited alias field into trimmed, de-duplicated names in input order.
#[must_use]
pub fn split(raw: Option<&str>, delimiter: &str) -> Vec<String> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    let mut out: Vec<String> = Vec::new();
    for part in raw.split(delimiter).map(str::trim) {
        if !part.is_empty() && !out.iter().any(|a| a == part) {
            out.push(part.to_string());
        }
    }
    out
}

/// Drops every alias owned by `old_id`, then attaches `aliases` to `survivor_id`.
///
/// Both ids are SQL expressions (usually name sub-queries). `old_id` and
/// `survivor_id` may be the same expression, which rewrites a location's aliases in place.
pub fn reconcile(
    old_id: &str,
    survivor_id: &str,
    aliases: &[String],
    ids: &mut dyn IdGenerator,
) -> Vec<Statement> {
    let mut out = vec![Statement::delete(
        ALIASES_TABLE,
        &format!("duty_location_id = {old_id}"),
    )];
    out.extend(attach(survivor_id, aliases, ids));
    out
}

/// Inserts aliases for `owner_id`, skipping names it already has.
pub fn attach(owner_id: &str, aliases: &[String], ids: &mut dyn IdGenerator) -> Vec<Statement> {
    aliases
        .iter()
        .map(|alias| {
            let row_id = ids.next_id();
            let name = quote(alias);
            Statement::insert(
                ALIASES_TABLE,
                format!(
                    "INSERT INTO {ALIASES_TABLE} (id, name, duty_location_id, created_at, updated_at) \
                     SELECT '{row_id}', {name}, {owner_id}, now(), now() \
                     WHERE {owner_id} IS NOT NULL AND NOT EXISTS \
                     (SELECT 1 FROM {ALIASES_TABLE} WHERE name = {name} AND duty_location_id = {owner_id})"
                ),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_trims_and_skips_blanks() {
        let got = split(Some(" Fort Lee ,Petersburg,, Fort Lee"), ",");
        assert_eq!(got, vec!["Fort Lee".to_string(), "Petersburg".to_string()]);
    }

    #[test]
    fn split_absent_field_is_empty() {
        assert!(split(None, ",").is_empty());
        assert!(split(Some("  "), ",").is_empty());
    }

    #[test]
    fn split_honours_custom_delimiter() {
        assert_eq!(split(Some("a; b"), ";"), vec!["a".to_string(), "b".to_string()]);
    }
}
