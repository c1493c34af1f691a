// src/plan/insert.rs
use crate::aliases;
use crate::catalog::{Address, LocationRecord};
use crate::config::{ConflictPolicy, InsertConfig};
use crate::ids::IdGenerator;
use crate::sql::{location_id, quote, quote_opt, Statement, LOCATIONS_TABLE};

const ADDRESSES_TABLE: &str = "addresses";

/// Exact-match predicate on every address column.
#[must_use]
pub fn address_match(address: &Address) -> String {
    format!(
        "street_address_1 = {} AND city = {} AND state = {} AND postal_code = {}",
        quote(&address.street_address_1),
        quote(&address.city),
        quote(&address.state),
        quote(&address.postal_code)
    )
}

/// First matching address id. Duplicate addresses resolve arbitrarily.
#[must_use]
pub fn address_id(address: &Address) -> String {
    format!("(SELECT id FROM {ADDRESSES_TABLE} WHERE {} LIMIT 1)", address_match(address))
}

/// Office for `(gbloc, city, state)`, or `NULL` when the record has no GBLOC.
#[must_use]
pub fn office_id(record: &LocationRecord) -> String {
    let Some(gbloc) = &record.office_gbloc else {
        return "NULL".to_string();
    };
    format!(
        "(SELECT t.id FROM transportation_offices AS t JOIN {ADDRESSES_TABLE} AS a ON t.address_id = a.id \
         WHERE t.gbloc = {} AND a.city = {} AND a.state = {} LIMIT 1)",
        quote(gbloc),
        quote(&record.address.city),
        quote(&record.address.state)
    )
}

/// Address (reused when it already exists), location row, then aliases.
pub fn plan_new(
    record: &LocationRecord,
    settings: &InsertConfig,
    ids: &mut dyn IdGenerator,
) -> Vec<Statement> {
    let mut out = vec![insert_address(record, settings.on_conflict, ids)];
    out.push(insert_location(record, settings, ids));

    let owner = location_id(&record.display_name);
    match settings.on_conflict {
        ConflictPolicy::Skip => out.extend(aliases::attach(&owner, &record.aliases, ids)),
        ConflictPolicy::Update => out.extend(aliases::reconcile(&owner, &owner, &record.aliases, ids)),
    }
    out
}

fn insert_address(record: &LocationRecord, policy: ConflictPolicy, ids: &mut dyn IdGenerator) -> Statement {
    let a = &record.address;
    let mut condition = format!("NOT EXISTS (SELECT 1 FROM {ADDRESSES_TABLE} WHERE {})", address_match(a));
    if policy == ConflictPolicy::Skip {
        // the location insert will be skipped, so its address would be an orphan
        condition.push_str(&format!(
            " AND NOT EXISTS (SELECT 1 FROM {LOCATIONS_TABLE} WHERE name = {})",
            quote(&record.display_name)
        ));
    }

    Statement::insert(
        ADDRESSES_TABLE,
        format!(
            "INSERT INTO {ADDRESSES_TABLE} (id, street_address_1, city, state, postal_code, created_at, updated_at) \
             SELECT '{}', {}, {}, {}, {}, now(), now() WHERE {condition}",
            ids.next_id(),
            quote(&a.street_address_1),
            quote(&a.city),
            quote(&a.state),
            quote(&a.postal_code)
        ),
    )
}

fn insert_location(record: &LocationRecord, settings: &InsertConfig, ids: &mut dyn IdGenerator) -> Statement {
    let id = record.id.unwrap_or_else(|| ids.next_id());
    let counseling = if settings.provides_services_counseling { "TRUE" } else { "FALSE" };
    let on_conflict = match settings.on_conflict {
        ConflictPolicy::Skip => "ON CONFLICT (name) DO NOTHING".to_string(),
        ConflictPolicy::Update => "ON CONFLICT (name) DO UPDATE SET \
             address_id = EXCLUDED.address_id, \
             transportation_office_id = EXCLUDED.transportation_office_id, \
             affiliation = EXCLUDED.affiliation, \
             provides_services_counseling = EXCLUDED.provides_services_counseling, \
             updated_at = now()"
            .to_string(),
    };

    let name = quote(&record.display_name);
    // NOT NULL on address_id is checked before ON CONFLICT, and in skip mode the
    // address of an existing name was never inserted
    let existing = match settings.on_conflict {
        ConflictPolicy::Skip => {
            format!(" WHERE NOT EXISTS (SELECT 1 FROM {LOCATIONS_TABLE} WHERE name = {name})")
        }
        ConflictPolicy::Update => String::new(),
    };

    Statement::insert(
        LOCATIONS_TABLE,
        format!(
            "INSERT INTO {LOCATIONS_TABLE} (id, address_id, transportation_office_id, name, affiliation, \
             provides_services_counseling, created_at, updated_at) \
             SELECT '{id}', {}, {}, {name}, {}, {counseling}, now(), now(){existing} {on_conflict}",
            address_id(&record.address),
            office_id(record),
            quote_opt(record.affiliation.as_deref())
        ),
    )
}
