// tests/unit_planner.rs
use locshift_core::cascade::Cascade;
use locshift_core::catalog::{Address, Catalog, LocationRecord, NamePair};
use locshift_core::classify::{classify, ChangeKind, ChangeOperation, Merge, Rename};
use locshift_core::config::{Config, ConflictPolicy, GuardMode};
use locshift_core::ids::SequentialIds;
use locshift_core::plan::merge::{loser_id, REPARENTED};
use locshift_core::plan::{Planner, PHASE_ORDER};
use locshift_core::sql::{Statement, StatementKind};

fn planner(config: &Config) -> Planner<'_> {
    match Planner::with_parts(config, Cascade::standard(), Box::new(SequentialIds::new())) {
        Ok(p) => p,
        Err(e) => panic!("standard cascade rejected: {e}"),
    }
}

fn pair(old: &str, new: &str) -> NamePair {
    NamePair { old: old.to_string(), new: new.to_string(), aliases: None }
}

fn texts(statements: &[Statement]) -> Vec<&str> {
    statements.iter().map(|s| s.text.as_str()).collect()
}

fn record() -> LocationRecord {
    LocationRecord {
        id: None,
        display_name: "Fort Gregg-Adams, VA 23801".to_string(),
        address: Address {
            street_address_1: "n/a".to_string(),
            city: "Fort Gregg-Adams".to_string(),
            state: "VA".to_string(),
            postal_code: "23801".to_string(),
        },
        office_gbloc: Some("BGAC".to_string()),
        affiliation: Some("ARMY".to_string()),
        aliases: vec!["Fort Lee".to_string()],
    }
}

#[test]
fn test_phase_order_is_rename_delete_new_merge() {
    assert_eq!(
        PHASE_ORDER,
        [ChangeKind::Rename, ChangeKind::Delete, ChangeKind::New, ChangeKind::Merge]
    );
}

#[test]
fn test_plan_runs_phases_in_fixed_order() {
    let catalog: Catalog = toml::from_str(
        r#"
        deletes = ["Adak, AK 99546"]

        [[merges]]
        old = "Fort Lee"
        new = "Fort Lee, VA 23801"

        [[news]]
        name = "Fort Gregg-Adams, VA 23801"
        city = "Fort Gregg-Adams"
        state = "VA"
        postal_code = 23801

        [[renames]]
        old = "Fort Benning, GA 31905"
        new = "Fort Walker, GA 31905"
        "#,
    )
    .unwrap();
    let changes = classify(&catalog, ",").unwrap();
    let config = Config::default();
    let plan = planner(&config).plan(&changes);

    let kinds: Vec<ChangeKind> = plan.sections.iter().map(|s| s.kind).collect();
    assert_eq!(kinds, PHASE_ORDER.to_vec());
}

#[test]
fn test_rename_is_exactly_one_update() {
    let config = Config::default();
    let op = ChangeOperation::Rename(Rename {
        old: "Fort Benning, GA 31905".into(),
        new: "Fort Walker, GA 31905".into(),
        aliases: None,
    });
    let statements = planner(&config).plan_operation(&op);
    assert_eq!(
        texts(&statements),
        vec!["UPDATE duty_locations SET name = 'Fort Walker, GA 31905' WHERE name = 'Fort Benning, GA 31905'"]
    );
}

#[test]
fn test_rename_with_aliases_rewrites_them_on_the_same_id() {
    let config = Config::default();
    let op = ChangeOperation::Rename(Rename {
        old: "Fort Hood".into(),
        new: "Fort Cavazos".into(),
        aliases: Some(vec!["Hood".into()]),
    });
    let statements = planner(&config).plan_operation(&op);
    assert_eq!(statements.len(), 3);
    assert_eq!(statements[1].kind, StatementKind::Delete);
    assert_eq!(statements[1].table, "duty_location_names");
    assert!(statements[1].text.contains("WHERE name = 'Fort Cavazos'"));
    assert!(statements[2].text.contains("'Hood'"));
}

#[test]
fn test_delete_is_a_guardless_cascade_by_default() {
    let config = Config::default();
    let op = ChangeOperation::Delete("Adak, AK 99546".into());
    let statements = planner(&config).plan_operation(&op);
    assert_eq!(statements.len(), Cascade::standard().steps().len() + 1);
    assert!(statements.iter().all(|s| s.kind == StatementKind::Delete));
}

#[test]
fn test_delete_guard_when_configured() {
    let mut config = Config::default();
    config.guards.delete = GuardMode::Fail;
    let op = ChangeOperation::Delete("Adak, AK 99546".into());
    let statements = planner(&config).plan_operation(&op);
    assert_eq!(statements[0].kind, StatementKind::Guard);
    assert!(statements[0].text.contains("RAISE EXCEPTION"));
    assert!(statements[0].text.contains("'Adak, AK 99546'"));
}

fn fort_lee_merge() -> ChangeOperation {
    ChangeOperation::Merge(Merge {
        old: "Fort Lee".into(),
        new: "Fort Lee, VA 23801".into(),
        aliases: vec!["Fort Lee".into(), "Petersburg".into()],
    })
}

#[test]
fn test_merge_reparents_before_any_delete() {
    let config = Config::default();
    let statements = planner(&config).plan_operation(&fort_lee_merge());

    let first_delete = statements
        .iter()
        .position(|s| s.kind == StatementKind::Delete)
        .unwrap();
    let reparents: Vec<&Statement> = statements[..first_delete]
        .iter()
        .filter(|s| s.kind == StatementKind::Update && s.text.contains("SET ") && s.table != "duty_locations")
        .collect();

    let tables: Vec<(&str, bool)> = reparents
        .iter()
        .map(|s| (s.table, s.text.contains("= (SELECT id FROM duty_locations WHERE name = 'Fort Lee, VA 23801')")))
        .collect();
    assert_eq!(
        tables,
        vec![
            ("orders", true),
            ("orders", true),
            ("service_members", true),
            ("duty_location_names", true),
        ]
    );
    assert!(reparents[0].text.starts_with("UPDATE orders SET origin_duty_location_id ="));
    assert!(reparents[1].text.starts_with("UPDATE orders SET new_duty_location_id ="));
}

#[test]
fn test_merge_copies_attributes_survivor_first() {
    let config = Config::default();
    let statements = planner(&config).plan_operation(&fort_lee_merge());
    let copy = statements
        .iter()
        .find(|s| s.kind == StatementKind::Update && s.table == "duty_locations")
        .map(|s| s.text.as_str())
        .unwrap();
    assert!(copy.contains(
        "transportation_office_id = COALESCE(survivor.transportation_office_id, loser.transportation_office_id)"
    ));
    assert!(copy.contains("affiliation = COALESCE(survivor.affiliation, loser.affiliation)"));
    assert!(copy.contains("WHERE survivor.name = 'Fort Lee, VA 23801' AND loser.name = 'Fort Lee'"));
}

#[test]
fn test_merge_cascades_loser_then_reconciles_aliases() {
    let config = Config::default();
    let statements = planner(&config).plan_operation(&fort_lee_merge());

    let location_delete = statements
        .iter()
        .position(|s| s.kind == StatementKind::Delete && s.table == "duty_locations");
    let alias_inserts: Vec<usize> = statements
        .iter()
        .enumerate()
        .filter(|(_, s)| s.kind == StatementKind::Insert)
        .map(|(i, _)| i)
        .collect();

    assert!(location_delete.is_some());
    assert_eq!(alias_inserts.len(), 2);
    assert!(alias_inserts.iter().all(|i| Some(*i) > location_delete));
    assert!(statements[alias_inserts[1]].text.contains("'Petersburg'"));
    assert!(statements[alias_inserts[1]]
        .text
        .contains("(SELECT id FROM duty_locations WHERE name = 'Fort Lee, VA 23801')"));
}

#[test]
fn test_merge_guards_both_names_by_default() {
    let config = Config::default();
    let statements = planner(&config).plan_operation(&fort_lee_merge());
    assert_eq!(statements[0].kind, StatementKind::Guard);
    assert_eq!(statements[1].kind, StatementKind::Guard);
    assert!(statements[0].text.contains("'Fort Lee'"));
    assert!(statements[1].text.contains("'Fort Lee, VA 23801'"));
}

#[test]
fn test_merge_without_guard_keeps_loser_conditional_on_survivor() {
    let mut config = Config::default();
    config.guards.merge = GuardMode::Skip;
    let statements = planner(&config).plan_operation(&fort_lee_merge());
    assert!(statements.iter().all(|s| s.kind != StatementKind::Guard));
    let location_delete = statements
        .iter()
        .find(|s| s.kind == StatementKind::Delete && s.table == "duty_locations")
        .map(|s| s.text.as_str())
        .unwrap();
    assert!(location_delete.contains("AND EXISTS (SELECT 1 FROM duty_locations WHERE name = 'Fort Lee, VA 23801')"));
}

#[test]
fn test_new_reuses_existing_address() {
    let config = Config::default();
    let statements = planner(&config).plan_operation(&ChangeOperation::New(record()));

    let address = &statements[0];
    assert_eq!(address.table, "addresses");
    assert!(address.text.contains(
        "WHERE NOT EXISTS (SELECT 1 FROM addresses WHERE street_address_1 = 'n/a' AND city = 'Fort Gregg-Adams' AND state = 'VA' AND postal_code = '23801')"
    ));

    let location = &statements[1];
    assert_eq!(location.table, "duty_locations");
    assert!(location.text.contains(
        "(SELECT id FROM addresses WHERE street_address_1 = 'n/a' AND city = 'Fort Gregg-Adams' AND state = 'VA' AND postal_code = '23801' LIMIT 1)"
    ));
    assert!(location.text.contains("t.gbloc = 'BGAC' AND a.city = 'Fort Gregg-Adams' AND a.state = 'VA' LIMIT 1"));
    assert!(location.text.contains("'ARMY', TRUE, now(), now()"));
    assert!(location.text.ends_with("ON CONFLICT (name) DO NOTHING"));
}

#[test]
fn test_new_uses_sequential_ids_and_skips_alias_delete() {
    let config = Config::default();
    let statements = planner(&config).plan_operation(&ChangeOperation::New(record()));

    assert_eq!(statements.len(), 3);
    assert!(statements[0].text.contains("'00000000-0000-0000-0000-000000000001'"));
    assert!(statements[1].text.contains("SELECT '00000000-0000-0000-0000-000000000002'"));
    assert_eq!(statements[2].table, "duty_location_names");
    assert!(statements[2].text.contains("'00000000-0000-0000-0000-000000000003', 'Fort Lee'"));
}

#[test]
fn test_new_without_gbloc_has_no_office() {
    let config = Config::default();
    let mut rec = record();
    rec.office_gbloc = None;
    rec.affiliation = None;
    let statements = planner(&config).plan_operation(&ChangeOperation::New(rec));
    assert!(statements[1].text.contains("(SELECT id FROM addresses WHERE"));
    assert!(statements[1].text.contains("LIMIT 1), NULL, 'Fort Gregg-Adams, VA 23801', NULL, TRUE"));
}

#[test]
fn test_new_update_policy_overwrites_and_reconciles() {
    let mut config = Config::default();
    config.insert.on_conflict = ConflictPolicy::Update;
    config.insert.provides_services_counseling = false;
    let statements = planner(&config).plan_operation(&ChangeOperation::New(record()));

    assert!(!statements[0].text.contains("FROM duty_locations"));
    assert!(statements[1].text.contains("ON CONFLICT (name) DO UPDATE SET address_id = EXCLUDED.address_id"));
    assert!(statements[1].text.contains(", FALSE, now(), now()"));
    assert_eq!(statements[2].kind, StatementKind::Delete);
    assert_eq!(statements[2].table, "duty_location_names");
    assert_eq!(statements[3].kind, StatementKind::Insert);
}

#[test]
fn test_new_keeps_given_id() {
    let config = Config::default();
    let mut rec = record();
    rec.id = Some(uuid::Uuid::from_u128(42));
    let statements = planner(&config).plan_operation(&ChangeOperation::New(rec));
    assert!(statements[1].text.contains("SELECT '00000000-0000-0000-0000-00000000002a'"));
}

#[test]
fn test_catalog_pair_feeds_merge() {
    let catalog = Catalog { merges: vec![pair("Fort Lee", "Fort Lee, VA 23801")], ..Catalog::default() };
    let changes = classify(&catalog, ",").unwrap();
    let config = Config::default();
    let plan = planner(&config).plan(&changes);
    assert_eq!(plan.sections.len(), 1);
    assert_eq!(plan.sections[0].label, "Merge: Fort Lee -> Fort Lee, VA 23801");
    assert!(plan.count(StatementKind::Delete) > Cascade::standard().steps().len());
}

#[test]
fn test_new_with_existing_name_inserts_nothing() {
    let config = Config::default();
    let statements = planner(&config).plan_operation(&ChangeOperation::New(record()));
    let existing = "NOT EXISTS (SELECT 1 FROM duty_locations WHERE name = 'Fort Gregg-Adams, VA 23801')";

    // address skipped for an existing name, so the location row must be skipped too
    assert!(statements[0].text.contains(existing));
    let location = &statements[1].text;
    assert!(location.contains(&format!("now(), now() WHERE {existing} ON CONFLICT (name) DO NOTHING")));
    assert!(!location.contains("VALUES"));
}

#[test]
fn test_new_update_policy_does_not_skip_existing_name() {
    let mut config = Config::default();
    config.insert.on_conflict = ConflictPolicy::Update;
    let statements = planner(&config).plan_operation(&ChangeOperation::New(record()));
    assert!(!statements[1].text.contains("FROM duty_locations WHERE name"));
    assert!(statements[1].text.contains("now(), now() ON CONFLICT (name) DO UPDATE"));
}

#[test]
fn test_rename_replans_to_the_same_unconditional_update() {
    let catalog = Catalog {
        renames: vec![pair("Fort Benning, GA 31905", "Fort Walker, GA 31905")],
        ..Catalog::default()
    };
    let changes = classify(&catalog, ",").unwrap();
    let config = Config::default();
    let first = planner(&config).plan(&changes);
    let second = planner(&config).plan(&changes);
    assert_eq!(first, second);

    // keyed only on the old name: once applied, a rerun matches no row
    let statements: Vec<&Statement> = first.statements().collect();
    assert_eq!(statements.len(), 1);
    assert_eq!(statements[0].kind, StatementKind::Update);
    let (_, predicate) = statements[0].text.split_once(" WHERE ").unwrap();
    assert_eq!(predicate, "name = 'Fort Benning, GA 31905'");
    assert_eq!(first.count(StatementKind::Guard), 0);
}

#[test]
fn test_merge_moves_every_direct_reference_before_loser_delete() {
    let merge = Merge {
        old: "Fort Lee".into(),
        new: "Fort Lee, VA 23801".into(),
        aliases: Vec::new(),
    };
    let old_id = loser_id(&merge);
    let new_id = "(SELECT id FROM duty_locations WHERE name = 'Fort Lee, VA 23801')";
    let config = Config::default();
    let statements = planner(&config).plan_operation(&ChangeOperation::Merge(merge));

    let loser_delete = statements
        .iter()
        .position(|s| s.table == "duty_locations" && s.text == format!("DELETE FROM duty_locations WHERE id = {old_id}"))
        .unwrap();

    for &(table, column) in REPARENTED {
        let expected = format!("UPDATE {table} SET {column} = {new_id} WHERE {column} = {old_id}");
        let at = statements.iter().position(|s| s.text == expected);
        assert!(at.is_some(), "no reparent for {table}.{column}");
        assert!(at < Some(loser_delete), "{table}.{column} moved after the loser was deleted");
    }

    // nothing after the reparents points a column back at the loser
    let reparent_end = statements
        .iter()
        .rposition(|s| s.kind == StatementKind::Update && s.table != "duty_locations")
        .unwrap();
    assert!(statements[reparent_end + 1..]
        .iter()
        .all(|s| s.kind != StatementKind::Update || s.table == "duty_locations"));
}

#[test]
fn test_empty_catalog_plans_nothing() {
    let changes = classify(&Catalog::default(), ",").unwrap();
    let config = Config::default();
    let plan = planner(&config).plan(&changes);
    assert!(plan.is_empty());
    assert_eq!(plan.len(), 0);
}
