use tracing::info;

use crate::engine::inspect::rows_of;
use crate::engine::keys::{event_names, keys_at, next_key_value, KeySet};
use crate::error::{CoreError, CoreResult};
use crate::storage::{KeyKind, Store, TableDescriptor, TableKind};
use crate::types::fields::{coerce_date, Rsvp};
use crate::types::value::Value;

/// Name and contact fields shared by hosts and guests.
#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    pub last_name: String,
    pub first_name: String,
    pub email: Option<String>,
    pub birthday: Option<String>,
}

impl Person {
    /// Builds a person from raw answers; blank optional answers become `None`.
    pub fn from_input(last_name: &str, first_name: &str, email: &str, birthday: &str) -> Self {
        Self {
            last_name: last_name.trim().to_string(),
            first_name: first_name.trim().to_string(),
            email: non_blank(email),
            birthday: non_blank(birthday),
        }
    }

    fn values(&self) -> [Value; 4] {
        [
            Value::Text(self.last_name.clone()),
            Value::Text(self.first_name.clone()),
            optional(self.email.as_deref()),
            optional(self.birthday.as_deref().and_then(coerce_date).as_deref()),
        ]
    }
}

/// A row to insert, identifier not yet assigned.
#[derive(Debug, Clone, PartialEq)]
pub enum NewRecord {
    Event {
        event_name: String,
        address: String,
    },
    Guest {
        person: Person,
        rsvp: Rsvp,
        event_name: String,
    },
    Host {
        person: Person,
        event_name: String,
    },
    Band {
        band_name: String,
        email: Option<String>,
        event_name: String,
    },
}

impl NewRecord {
    pub fn kind(&self) -> TableKind {
        match self {
            NewRecord::Event { .. } => TableKind::Event,
            NewRecord::Guest { .. } => TableKind::Guest,
            NewRecord::Host { .. } => TableKind::Host,
            NewRecord::Band { .. } => TableKind::Band,
        }
    }

    /// The event a dependent row refers to.
    pub fn event_reference(&self) -> Option<&str> {
        match self {
            NewRecord::Event { .. } => None,
            NewRecord::Guest { event_name, .. }
            | NewRecord::Host { event_name, .. }
            | NewRecord::Band { event_name, .. } => Some(event_name),
        }
    }

    /// Bound values, aligned to the descriptor's columns after the identifier.
    fn values(&self) -> Vec<Value> {
        match self {
            NewRecord::Event { event_name, address } => vec![
                Value::Text(event_name.trim().to_string()),
                Value::Text(address.trim().to_string()),
            ],
            NewRecord::Guest { person, rsvp, event_name } => {
                let mut v = person.values().to_vec();
                v.push(Value::Text(rsvp.as_str().to_string()));
                v.push(Value::Text(event_name.clone()));
                v
            }
            NewRecord::Host { person, event_name } => {
                let mut v = person.values().to_vec();
                v.push(Value::Text(event_name.clone()));
                v
            }
            NewRecord::Band { band_name, email, event_name } => vec![
                Value::Text(band_name.trim().to_string()),
                optional(email.as_deref()),
                Value::Text(event_name.clone()),
            ],
        }
    }
}

/// Inserts `record` under the next identifier and returns that identifier.
///
/// Dependent rows require at least one event and a reference to an existing
/// one; nothing is written otherwise.
pub fn insert(store: &Store, record: &NewRecord) -> CoreResult<String> {
    let kind = record.kind();
    let desc = kind.descriptor();

    if let NewRecord::Event { event_name, .. } = record {
        if event_name.trim().is_empty() {
            return Err(CoreError::InvalidSelection("An event name is required.".to_string()));
        }
    }

    if let Some(event_name) = record.event_reference() {
        let events = event_names(store)?;
        if events.is_empty() {
            return Err(CoreError::EmptyPrerequisite(format!(
                "No events exist yet. Add an event before adding to '{}'.",
                desc.name
            )));
        }
        if !events.contains(event_name) {
            return Err(CoreError::UnknownKey(format!("Event '{event_name}' does not exist.")));
        }
    }

    let id = next_key_value(store, kind)?;
    let placeholders: Vec<String> = (1..=desc.columns.len()).map(|i| format!("?{i}")).collect();
    let sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        desc.name,
        desc.columns.join(", "),
        placeholders.join(", ")
    );

    let mut args = Vec::with_capacity(desc.columns.len());
    args.push(Value::Int(id));
    args.extend(record.values());
    // The table's key_sequence trigger advances the mark within this statement
    store.execute(&sql, &args)?;

    info!(table = desc.name, id, "inserted row");
    Ok(id.to_string())
}

/// Checks that `column` may be updated in a table with the given headers.
/// Returns the descriptor's own column name.
pub fn check_update_column(
    desc: &TableDescriptor,
    headers: &[String],
    column: &str,
) -> CoreResult<&'static str> {
    let column = column.trim();
    let known = headers.iter().any(|h| h == column);
    match desc.column(column) {
        Some(name) if known && desc.is_updatable(name) => Ok(name),
        Some(name) if known => Err(CoreError::UnknownKey(format!(
            "Column '{name}' identifies rows of '{}' and cannot be updated.",
            desc.name
        ))),
        _ => Err(CoreError::UnknownKey(format!(
            "Column '{column}' does not exist in '{}'.",
            desc.name
        ))),
    }
}

/// Replaces one non-key column of the row addressed by `key`.
/// Both the key and the column are checked before anything is written.
pub fn update_field(
    store: &Store,
    kind: TableKind,
    key: &str,
    column: &str,
    new_value: &str,
) -> CoreResult<usize> {
    let desc = kind.descriptor();
    let data = rows_of(store, kind)?;
    let keys = keys_at(&data.rows, desc.key_column);
    require_key(desc, &keys, key)?;
    let column = check_update_column(desc, &data.headers, column)?;

    let sql = format!(
        "UPDATE {} SET {} = ?1 WHERE {} = ?2",
        desc.name,
        column,
        desc.key_column_name()
    );
    let args = [coerce_column_value(column, new_value), key_param(desc, key)?];
    let changed = store.execute(&sql, &args)?;

    info!(table = desc.name, key, column, changed, "updated row");
    Ok(changed)
}

/// Deletes the row(s) addressed by `key`: event_name for events, identifier
/// for everything else.
pub fn delete(store: &Store, kind: TableKind, key: &str) -> CoreResult<usize> {
    let desc = kind.descriptor();
    let data = rows_of(store, kind)?;
    let keys = keys_at(&data.rows, desc.key_column);
    require_key(desc, &keys, key)?;

    let sql = format!("DELETE FROM {} WHERE {} = ?1", desc.name, desc.key_column_name());
    let changed = store.execute(&sql, &[key_param(desc, key)?])?;

    info!(table = desc.name, key, changed, "deleted row");
    Ok(changed)
}

/// Applies the per-column coercions used on insert.
pub fn coerce_column_value(column: &str, raw: &str) -> Value {
    match column {
        "rsvp" => Value::Text(Rsvp::normalize(raw).as_str().to_string()),
        "birthday" => optional(coerce_date(raw).as_deref()),
        "email" => Value::optional_text(raw),
        _ => Value::Text(raw.trim().to_string()),
    }
}

fn require_key(desc: &TableDescriptor, keys: &KeySet, key: &str) -> CoreResult<()> {
    if keys.contains(key) {
        Ok(())
    } else {
        Err(CoreError::UnknownKey(format!(
            "No entry with {} '{key}' in '{}'.",
            desc.key_column_name(),
            desc.name
        )))
    }
}

fn key_param(desc: &TableDescriptor, key: &str) -> CoreResult<Value> {
    match desc.key_kind {
        KeyKind::NaturalKey => Ok(Value::Text(key.to_string())),
        KeyKind::PrimaryKey => key.parse::<i64>().map(Value::Int).map_err(|_| CoreError::NonNumericKey {
            table: desc.name.to_string(),
            key: key.to_string(),
        }),
    }
}

fn non_blank(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn optional(s: Option<&str>) -> Value {
    s.map(Value::optional_text).unwrap_or(Value::Null)
}
