use super::*;
use event_manager_core::engine::Person;
use event_manager_core::types::fields::Rsvp;
use event_manager_core::types::value::Value;

#[test]
fn rows_survive_reopen() -> anyhow::Result<()> {
    let root = temp_dir("rows");
    let path = root.join("data.sqlite");
    {
        let db = Database::open(&path)?;
        db.insert(&event("Gala"))?;
        db.insert(&NewRecord::Guest {
            person: Person::from_input("Doe", "Jane", "", "1990-04-01"),
            rsvp: Rsvp::Going,
            event_name: "Gala".to_string(),
        })?;
        db.close()?;
    }

    let db = Database::open(&path)?;
    let guests = db.rows("guest")?;
    assert_eq!(guests.rows.len(), 1);
    assert_eq!(guests.rows[0][5], Value::Text("GOING".into()));
    Ok(())
}

#[test]
fn issued_keys_survive_reopen() -> anyhow::Result<()> {
    let root = temp_dir("keys");
    let path = root.join("data.sqlite");
    {
        let db = Database::open(&path)?;
        db.insert(&event("Gala"))?;
        db.insert(&event("Picnic"))?;
        db.delete(TableKind::Event, "Picnic")?;
        db.delete(TableKind::Event, "Gala")?;
        db.close()?;
    }

    let db = Database::open(&path)?;
    assert_eq!(db.rows("event")?.rows.len(), 0);
    assert_eq!(db.next_key(TableKind::Event)?, "3");
    Ok(())
}

#[test]
fn mutations_are_committed_immediately() -> anyhow::Result<()> {
    let root = temp_dir("autocommit");
    let path = root.join("data.sqlite");
    let writer = Database::open(&path)?;
    writer.insert(&event("Gala"))?;
    writer.update_field(TableKind::Event, "Gala", "address", "Town Hall")?;

    // A second connection sees the write without the first one closing
    let reader = Database::open(&path)?;
    assert_eq!(reader.rows("event")?.rows[0][2], Value::Text("Town Hall".into()));
    Ok(())
}
