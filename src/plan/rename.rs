// src/plan/rename.rs
use crate::aliases;
use crate::classify::Rename;
use crate::ids::IdGenerator;
use crate::sql::{location_id, quote, Statement, LOCATIONS_TABLE};

/// A relabel. Running it twice is harmless: the second pass matches no row.
///
/// Aliases are only rewritten when the rename carries an alias list.
pub fn plan_rename(rename: &Rename, ids: &mut dyn IdGenerator) -> Vec<Statement> {
    let mut out = vec![Statement::update(
        LOCATIONS_TABLE,
        format!(
            "UPDATE {LOCATIONS_TABLE} SET name = {} WHERE name = {}",
            quote(&rename.new),
            quote(&rename.old)
        ),
    )];

    if let Some(list) = &rename.aliases {
        let renamed = location_id(&rename.new);
        out.extend(aliases::reconcile(&renamed, &renamed, list, ids));
    }
    out
}
