// src/plan/merge.rs
use crate::aliases;
use crate::cascade::Cascade;
use crate::classify::Merge;
use crate::config::GuardMode;
use crate::ids::IdGenerator;
use crate::sql::{location_id, quote, Statement, ALIASES_TABLE, LOCATIONS_TABLE};

/// Direct foreign keys onto `duty_locations` that a merge moves to the survivor.
pub const REPARENTED: &[(&str, &str)] = &[
    ("orders", "origin_duty_location_id"),
    ("orders", "new_duty_location_id"),
    ("service_members", "duty_location_id"),
    (ALIASES_TABLE, "duty_location_id"),
];

/// Loser id that only resolves while the survivor exists.
///
/// With guards off and an unknown survivor, every merge statement then matches
/// nothing instead of cascading the loser's rows away.
#[must_use]
pub fn loser_id(merge: &Merge) -> String {
    format!(
        "(SELECT id FROM {LOCATIONS_TABLE} WHERE name = {} AND EXISTS (SELECT 1 FROM {LOCATIONS_TABLE} WHERE name = {}))",
        quote(&merge.old),
        quote(&merge.new)
    )
}

/// Reparent, copy missing attributes, cascade the loser, then move aliases.
pub fn plan_merge(
    merge: &Merge,
    cascade: &Cascade,
    guard: GuardMode,
    ids: &mut dyn IdGenerator,
) -> Vec<Statement> {
    let old_id = loser_id(merge);
    let new_id = location_id(&merge.new);
    let mut out = Vec::new();

    if guard == GuardMode::Fail {
        out.push(Statement::location_guard(&merge.old));
        out.push(Statement::location_guard(&merge.new));
    }

    for &(table, column) in REPARENTED {
        out.push(Statement::update(
            table,
            format!("UPDATE {table} SET {column} = {new_id} WHERE {column} = {old_id}"),
        ));
    }

    out.push(copy_attributes(merge));
    out.extend(cascade.delete_statements(&old_id));
    out.extend(aliases::reconcile(&old_id, &new_id, &merge.aliases, ids));
    out
}

/// Survivor keeps its own office and affiliation; the loser's only fill gaps.
fn copy_attributes(merge: &Merge) -> Statement {
    Statement::update(
        LOCATIONS_TABLE,
        format!(
            "UPDATE {LOCATIONS_TABLE} AS survivor SET \
             transportation_office_id = COALESCE(survivor.transportation_office_id, loser.transportation_office_id), \
             affiliation = COALESCE(survivor.affiliation, loser.affiliation), \
             updated_at = now() \
             FROM {LOCATIONS_TABLE} AS loser \
             WHERE survivor.name = {} AND loser.name = {}",
            quote(&merge.new),
            quote(&merge.old)
        ),
    )
}
