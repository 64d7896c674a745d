//! Interactive operations invoked by the menu dispatcher.
//!
//! Recoverable operator mistakes (bad keys, bad columns, bad menu answers)
//! are reported and re-prompted here. Everything else is returned to the
//! caller.

use crate::console::Console;
use crate::engine::inspect::{list_tables, rows, rows_of};
use crate::engine::keys::{event_names, keys_at, resolve_key};
use crate::engine::roster::event_roster;
use crate::engine::writer::{self, check_update_column, NewRecord, Person};
use crate::error::{CoreError, CoreResult};
use crate::prompt::{ask, drive, select_from, Transition, CANCEL};
use crate::storage::{KeyKind, Store, TableDescriptor, TableKind};
use crate::types::fields::Rsvp;
use crate::types::value::value_to_string;

/// How an interactive operation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    Cancelled,
    /// Nothing to act on (empty table, no events).
    NothingToDo,
}

/// Lists tables and shows the chosen one without its identifier column.
pub fn browse_tables<C: Console + ?Sized>(store: &Store, console: &mut C) -> CoreResult<Outcome> {
    let tables = list_tables(store)?;
    if tables.is_empty() {
        console.write_line("No data tables found in the database.");
        return Ok(Outcome::NothingToDo);
    }
    let Some(table) = select_from(console, "\nAvailable Data Tables:", &tables)? else {
        return Ok(Outcome::Cancelled);
    };
    let data = rows(store, table)?;
    console.write_line(&format!("\nData in table '{table}': "));
    console.write_line(&data.render(true));
    Ok(Outcome::Completed)
}

/// Lets the operator pick an event and prints its roster.
pub fn view_event<C: Console + ?Sized>(store: &Store, console: &mut C) -> CoreResult<Outcome> {
    let events = event_names(store)?;
    if events.is_empty() {
        console.write_line("No events found in the database.");
        return Ok(Outcome::NothingToDo);
    }
    let Some(name) = select_from(console, "\nSelect an event to view details:", events.as_slice())? else {
        return Ok(Outcome::Cancelled);
    };
    match event_roster(store, name)? {
        Some(roster) => console.write_line(&format!("\n{roster}")),
        None => console.write_line(&format!("Event '{name}' not found.")),
    }
    Ok(Outcome::Completed)
}

/// Collects the fields of a new row and inserts it.
///
/// Dependent tables need an existing event; with none, this fails with
/// `EmptyPrerequisite` before asking for any field.
pub fn add_record<C: Console + ?Sized>(store: &Store, console: &mut C, kind: TableKind) -> CoreResult<Outcome> {
    let desc = kind.descriptor();

    let event_name = if desc.depends_on_event {
        let events = event_names(store)?;
        if events.is_empty() {
            return Err(CoreError::EmptyPrerequisite(format!(
                "No events exist yet. Add an event before adding to '{}'.",
                desc.name
            )));
        }
        match select_from(console, "Select the event for this entry:", events.as_slice())? {
            Some(name) => name.clone(),
            None => return Ok(Outcome::Cancelled),
        }
    } else {
        String::new()
    };

    let Some(record) = collect_record(console, kind, event_name)? else {
        return Ok(Outcome::Cancelled);
    };
    let key = writer::insert(store, &record)?;
    console.write_line(&format!("Entry with ID {key} added to '{}'.", desc.name));
    Ok(Outcome::Completed)
}

fn collect_record<C: Console + ?Sized>(
    console: &mut C,
    kind: TableKind,
    event_name: String,
) -> CoreResult<Option<NewRecord>> {
    let record = match kind {
        TableKind::Event => {
            let Some(name) = drive(console, "Enter event name: ", non_empty)? else {
                return Ok(None);
            };
            let Some(address) = ask(console, "Enter event address: ")? else {
                return Ok(None);
            };
            NewRecord::Event {
                event_name: name,
                address,
            }
        }
        TableKind::Guest => {
            let Some(person) = collect_person(console, "guest")? else {
                return Ok(None);
            };
            let Some(rsvp) = ask(console, "Enter RSVP (Going or Not Going): ")? else {
                return Ok(None);
            };
            NewRecord::Guest {
                person,
                rsvp: Rsvp::normalize(&rsvp),
                event_name,
            }
        }
        TableKind::Host => {
            let Some(person) = collect_person(console, "host")? else {
                return Ok(None);
            };
            NewRecord::Host { person, event_name }
        }
        TableKind::Band => {
            let Some(band_name) = ask(console, "Enter band name: ")? else {
                return Ok(None);
            };
            let Some(email) = ask(console, "Enter band email (optional): ")? else {
                return Ok(None);
            };
            NewRecord::Band {
                band_name,
                email: Some(email).filter(|e| !e.trim().is_empty()),
                event_name,
            }
        }
    };
    Ok(Some(record))
}

fn collect_person<C: Console + ?Sized>(console: &mut C, role: &str) -> CoreResult<Option<Person>> {
    let mut answers = Vec::with_capacity(4);
    for prompt in [
        format!("Enter {role} last name: "),
        format!("Enter {role} first name: "),
        format!("Enter {role} email (optional): "),
        format!("Enter {role} birthday (YYYY-MM-DD format, optional): "),
    ] {
        match ask(console, &prompt)? {
            Some(answer) => answers.push(answer),
            None => return Ok(None),
        }
    }
    Ok(Some(Person::from_input(&answers[0], &answers[1], &answers[2], &answers[3])))
}

/// Shows a table and deletes the row the operator names.
/// Re-prompts on unknown keys until a valid key or `0`.
pub fn delete_record<C: Console + ?Sized>(store: &Store, console: &mut C, kind: TableKind) -> CoreResult<Outcome> {
    let desc = kind.descriptor();
    let data = rows_of(store, kind)?;
    if data.rows.is_empty() {
        console.write_line(&format!("No data found in table '{}'.", desc.name));
        return Ok(Outcome::NothingToDo);
    }
    console.write_line(&format!("\nData in table '{}': ", desc.name));
    console.write_line(&data.render(false));

    let keys = keys_at(&data.rows, desc.key_column);
    let label = key_label(desc);
    let prompt = format!("\nEnter the {label} of the entry to delete, or 0 to cancel: ");
    let Some(key) = drive(console, &prompt, |input| resolve_key(input, &keys))? else {
        console.write_line("< deletion cancelled");
        return Ok(Outcome::Cancelled);
    };

    writer::delete(store, kind, &key)?;
    console.write_line(&format!("Entry with {label} {key} deleted successfully."));
    Ok(Outcome::Completed)
}

/// Shows a table, then asks for a row, a column and the new value.
pub fn update_record<C: Console + ?Sized>(store: &Store, console: &mut C, kind: TableKind) -> CoreResult<Outcome> {
    let desc = kind.descriptor();
    let data = rows_of(store, kind)?;
    if data.rows.is_empty() {
        console.write_line(&format!("No data found in table '{}'.", desc.name));
        return Ok(Outcome::NothingToDo);
    }
    console.write_line(&format!("\nData in table '{}': ", desc.name));
    console.write_line(&data.render(false));

    let keys = keys_at(&data.rows, desc.key_column);
    let label = key_label(desc);
    let prompt = format!("Enter the {label} of the entry you want to update, or 0 to cancel: ");
    let Some(key) = drive(console, &prompt, |input| resolve_key(input, &keys))? else {
        console.write_line("< update cancelled");
        return Ok(Outcome::Cancelled);
    };

    let column_prompt = "Enter the 'column_name' you want to update, or 0 to cancel: ";
    let column = drive(console, column_prompt, |input| {
        if input.trim() == CANCEL {
            return Transition::Cancelled;
        }
        match check_update_column(desc, &data.headers, input) {
            Ok(column) => Transition::Validated(column),
            Err(err) => Transition::Rejected(err),
        }
    })?;
    let Some(column) = column else {
        console.write_line("< update cancelled");
        return Ok(Outcome::Cancelled);
    };

    let Some(value) = ask(console, "Enter 'new value': ")? else {
        return Ok(Outcome::Cancelled);
    };
    writer::update_field(store, kind, &key, column, &value)?;
    let stored = value_to_string(&writer::coerce_column_value(column, &value));
    console.write_line(&format!("Entry with {label} {key} updated: {column} = '{stored}'."));
    Ok(Outcome::Completed)
}

fn key_label(desc: &TableDescriptor) -> &'static str {
    match desc.key_kind {
        KeyKind::PrimaryKey => "ID",
        KeyKind::NaturalKey => desc.key_column_name(),
    }
}

fn non_empty(input: &str) -> Transition<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        Transition::Rejected(CoreError::InvalidSelection("A value is required.".to_string()))
    } else {
        Transition::Validated(trimmed.to_string())
    }
}
