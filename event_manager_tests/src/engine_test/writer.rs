use super::*;
use event_manager_core::engine::keys;
use event_manager_core::types::value::Value;
use event_manager_core::CoreError;

#[test]
fn test_first_event_gets_key_one() {
    let db = test_db();
    let key = add_event(&db, "Summer Fest", "1 Main St");
    assert_eq!(key, "1");
    let set = keys(&db.rows("event").unwrap().rows);
    assert_eq!(set.as_slice(), ["1"]);
}

#[test]
fn test_insert_adds_exactly_one_row_with_its_key() {
    let db = test_db();
    seed_summer_fest(&db);
    for kind in TableKind::ALL {
        let before = row_count(&db, kind);
        let key = match kind {
            TableKind::Event => add_event(&db, "Winter Ball", "2 Main St"),
            TableKind::Guest => add_guest(&db, "Summer Fest", "Lee", "Ann", "", "going"),
            TableKind::Host => add_host(&db, "Summer Fest", "Kim", "Bo", ""),
            TableKind::Band => add_band(&db, "Summer Fest", "Echoes"),
        };
        assert_eq!(row_count(&db, kind), before + 1);
        assert!(keys(&db.rows(kind.name()).unwrap().rows).contains(&key));
    }
}

#[test]
fn test_guest_round_trip() {
    let db = test_db();
    add_event(&db, "Summer Fest", "1 Main St");
    let key = db
        .insert(&NewRecord::Guest {
            person: Person::from_input("Doe", "Jane", "jane@x.org", "1990-04-01"),
            rsvp: Rsvp::normalize("Going"),
            event_name: "Summer Fest".to_string(),
        })
        .unwrap();
    assert_eq!(key, "1");
    assert_eq!(
        db.rows("guest").unwrap().rows,
        vec![vec![
            Value::Int(1),
            Value::Text("Doe".into()),
            Value::Text("Jane".into()),
            Value::Text("jane@x.org".into()),
            Value::Text("1990-04-01".into()),
            Value::Text("GOING".into()),
            Value::Text("Summer Fest".into()),
        ]]
    );
}

#[test]
fn test_guest_rsvp_maybe_stored_as_not_going() {
    let db = test_db();
    add_event(&db, "Summer Fest", "1 Main St");
    add_guest(&db, "Summer Fest", "Roe", "Rick", "", "maybe");
    let row = &db.rows("guest").unwrap().rows[0];
    assert_eq!(row[5], Value::Text("NOT GOING".into()));
}

#[test]
fn test_optional_fields_blank_are_null_and_dates_coerced() {
    let db = test_db();
    add_event(&db, "Gala", "x");
    db.insert(&NewRecord::Host {
        person: Person::from_input(" Smith ", "John", "  ", "01.04.1990"),
        event_name: "Gala".to_string(),
    })
    .unwrap();
    let row = &db.rows("host").unwrap().rows[0];
    assert_eq!(row[1], Value::Text("Smith".into()));
    assert_eq!(row[3], Value::Null);
    assert_eq!(row[4], Value::Text("1990-04-01".into()));
}

#[test]
fn test_unparseable_birthday_kept_verbatim() {
    let db = test_db();
    add_event(&db, "Gala", "x");
    db.insert(&NewRecord::Host {
        person: Person::from_input("Smith", "John", "", "spring 1990"),
        event_name: "Gala".to_string(),
    })
    .unwrap();
    assert_eq!(db.rows("host").unwrap().rows[0][4], Value::Text("spring 1990".into()));
}

#[test]
fn test_dependent_insert_without_events_is_rejected() {
    let db = test_db();
    let err = db
        .insert(&NewRecord::Host {
            person: Person::from_input("Smith", "John", "", ""),
            event_name: "Ghost".to_string(),
        })
        .unwrap_err();
    assert!(matches!(err, CoreError::EmptyPrerequisite(_)));
    assert!(err.report().starts_with("!!!"));
    assert_eq!(row_count(&db, TableKind::Host), 0);
    assert_eq!(db.next_key(TableKind::Host).unwrap(), "1");
}

#[test]
fn test_dependent_insert_with_unknown_event_is_rejected() {
    let db = test_db();
    add_event(&db, "Gala", "x");
    let err = db
        .insert(&NewRecord::Band {
            band_name: "Echoes".to_string(),
            email: None,
            event_name: "Picnic".to_string(),
        })
        .unwrap_err();
    assert!(matches!(err, CoreError::UnknownKey(_)));
    assert_eq!(row_count(&db, TableKind::Band), 0);
}

#[test]
fn test_duplicate_event_name_is_store_failure() {
    let db = test_db();
    add_event(&db, "Gala", "x");
    let err = db
        .insert(&NewRecord::Event {
            event_name: "Gala".to_string(),
            address: "y".to_string(),
        })
        .unwrap_err();
    assert!(matches!(err, CoreError::StoreFailure(_)));
    assert_eq!(row_count(&db, TableKind::Event), 1);
}

#[test]
fn test_update_single_field() {
    let db = test_db();
    seed_summer_fest(&db);
    let changed = db.update_field(TableKind::Guest, "1", "email", "jd@y.org").unwrap();
    assert_eq!(changed, 1);
    let rows = db.rows("guest").unwrap().rows;
    assert_eq!(rows[0][3], Value::Text("jd@y.org".into()));
    assert_eq!(rows[1][3], Value::Null);
}

#[test]
fn test_update_event_by_name() {
    let db = test_db();
    seed_summer_fest(&db);
    db.update_field(TableKind::Event, "Summer Fest", "address", "9 Elm St").unwrap();
    assert_eq!(db.rows("event").unwrap().rows[0][2], Value::Text("9 Elm St".into()));
}

#[test]
fn test_update_normalizes_rsvp() {
    let db = test_db();
    seed_summer_fest(&db);
    db.update_field(TableKind::Guest, "1", "rsvp", "perhaps").unwrap();
    assert_eq!(db.rows("guest").unwrap().rows[0][5], Value::Text("NOT GOING".into()));
}

#[test]
fn test_update_rejects_key_columns_before_writing() {
    let db = test_db();
    seed_summer_fest(&db);
    let before = db.rows("guest").unwrap();
    let err = db.update_field(TableKind::Guest, "1", "id", "99").unwrap_err();
    assert!(matches!(err, CoreError::UnknownKey(_)));
    assert_eq!(db.rows("guest").unwrap(), before);

    let events = db.rows("event").unwrap();
    for column in ["id", "event_name"] {
        let err = db
            .update_field(TableKind::Event, "Summer Fest", column, "Renamed")
            .unwrap_err();
        assert!(matches!(err, CoreError::UnknownKey(_)));
    }
    assert_eq!(db.rows("event").unwrap(), events);
}

#[test]
fn test_update_rejects_unknown_column_and_key() {
    let db = test_db();
    seed_summer_fest(&db);
    let before = db.rows("band").unwrap();
    assert!(matches!(
        db.update_field(TableKind::Band, "1", "genre", "rock"),
        Err(CoreError::UnknownKey(_))
    ));
    assert!(matches!(
        db.update_field(TableKind::Band, "42", "band_name", "Other"),
        Err(CoreError::UnknownKey(_))
    ));
    assert_eq!(db.rows("band").unwrap(), before);
}

#[test]
fn test_delete_present_key() {
    let db = test_db();
    seed_summer_fest(&db);
    let before = row_count(&db, TableKind::Guest);
    assert_eq!(db.delete(TableKind::Guest, "2").unwrap(), 1);
    assert_eq!(row_count(&db, TableKind::Guest), before - 1);
    assert!(!db.keys(TableKind::Guest).unwrap().contains("2"));
}

#[test]
fn test_delete_absent_key_reports_unknown() -> anyhow::Result<()> {
    let db = test_db();
    seed_summer_fest(&db);
    db.delete(TableKind::Guest, "2")?;
    let before = row_count(&db, TableKind::Guest);
    let err = db.delete(TableKind::Guest, "2").unwrap_err();
    assert!(matches!(err, CoreError::UnknownKey(_)));
    assert_eq!(row_count(&db, TableKind::Guest), before);
    Ok(())
}

#[test]
fn test_delete_event_by_name() -> anyhow::Result<()> {
    let db = test_db();
    add_event(&db, "Gala", "x");
    add_event(&db, "Picnic", "y");
    db.delete(TableKind::Event, "Gala")?;
    assert_eq!(db.keys(TableKind::Event)?.as_slice(), ["Picnic"]);
    assert!(matches!(db.delete(TableKind::Event, "1"), Err(CoreError::UnknownKey(_))));
    Ok(())
}

#[test]
fn test_failed_key_sequence_update_keeps_no_row() {
    let db = test_db();
    add_event(&db, "Gala", "x");
    db.store()
        .execute(
            "CREATE TRIGGER key_sequence_locked BEFORE UPDATE ON _key_sequence
             BEGIN SELECT RAISE(ABORT, 'sequence locked'); END",
            &[],
        )
        .unwrap();

    let err = db
        .insert(&NewRecord::Event {
            event_name: "Picnic".to_string(),
            address: "Park".to_string(),
        })
        .unwrap_err();
    assert!(matches!(err, CoreError::StoreFailure(_)));
    assert_eq!(row_count(&db, TableKind::Event), 1);
    assert_eq!(db.next_key(TableKind::Event).unwrap(), "2");
}

#[test]
fn test_insert_advances_key_sequence_in_same_statement() {
    let db = test_db();
    add_event(&db, "Gala", "x");
    add_event(&db, "Picnic", "Park");
    assert_eq!(db.store().last_issued_key("event").unwrap(), Some(2));
    assert_eq!(db.store().last_issued_key("guest").unwrap(), None);
}

#[test]
fn test_blank_event_name_is_rejected() {
    let db = test_db();
    for name in ["", "   "] {
        let err = db
            .insert(&NewRecord::Event {
                event_name: name.to_string(),
                address: "Nowhere".to_string(),
            })
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidSelection(_)));
    }
    assert_eq!(row_count(&db, TableKind::Event), 0);
    assert_eq!(db.next_key(TableKind::Event).unwrap(), "1");
}
