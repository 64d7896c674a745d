use std::collections::HashSet;

use crate::engine::inspect::rows_of;
use crate::error::{CoreError, CoreResult};
use crate::prompt::{Transition, CANCEL};
use crate::storage::{Store, TableKind};
use crate::types::Row;
use crate::types::value::value_to_string;

/// Valid identifiers of a table, in row order, with constant-time membership.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeySet {
    ordered: Vec<String>,
    members: HashSet<String>,
}

impl KeySet {
    pub fn contains(&self, candidate: &str) -> bool {
        self.members.contains(candidate)
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    /// Keys in row order, suitable for a numbered choice list.
    pub fn as_slice(&self) -> &[String] {
        &self.ordered
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.ordered.iter()
    }
}

impl FromIterator<String> for KeySet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut set = KeySet::default();
        for key in iter {
            if set.members.insert(key.clone()) {
                set.ordered.push(key);
            }
        }
        set
    }
}

/// Identifiers taken from the first cell of every row.
pub fn keys(rows: &[Row]) -> KeySet {
    keys_at(rows, 0)
}

/// Keys taken from `column` of every row. NULL cells are skipped.
pub fn keys_at(rows: &[Row], column: usize) -> KeySet {
    rows.iter()
        .filter_map(|row| row.get(column))
        .filter(|v| !v.is_null())
        .map(value_to_string)
        .collect()
}

/// Keys the operator may use to address rows of `kind`.
pub fn lookup_keys(store: &Store, kind: TableKind) -> CoreResult<KeySet> {
    let data = rows_of(store, kind)?;
    Ok(keys_at(&data.rows, kind.descriptor().key_column))
}

/// Names of all existing events.
pub fn event_names(store: &Store) -> CoreResult<KeySet> {
    lookup_keys(store, TableKind::Event)
}

/// Resolves typed input against `keys`. `"0"` always cancels, even when
/// `"0"` is itself a key.
pub fn resolve_key(input: &str, keys: &KeySet) -> Transition<String> {
    let candidate = input.trim();
    if candidate == CANCEL {
        return Transition::Cancelled;
    }
    if candidate.is_empty() {
        return Transition::Rejected(CoreError::InvalidSelection(
            "Nothing entered. Enter a listed key or 0 to cancel.".to_string(),
        ));
    }
    if keys.contains(candidate) {
        Transition::Validated(candidate.to_string())
    } else {
        Transition::Rejected(CoreError::UnknownKey(format!(
            "'{candidate}' is not a valid entry. Enter a listed key or 0 to cancel."
        )))
    }
}

/// Next identifier for `kind`, one above both the largest stored identifier
/// and the largest ever issued. A table that never held a row yields 1.
pub fn next_key_value(store: &Store, kind: TableKind) -> CoreResult<i64> {
    let data = rows_of(store, kind)?;
    let mut max: Option<i64> = None;
    for key in keys(&data.rows).iter() {
        let n: i64 = key.parse().map_err(|_| CoreError::NonNumericKey {
            table: kind.name().to_string(),
            key: key.clone(),
        })?;
        max = max.max(Some(n));
    }
    let last_issued = store.last_issued_key(kind.name())?;
    Ok(match max.max(last_issued) {
        Some(n) => n + 1,
        None => 1,
    })
}

pub fn next_key(store: &Store, kind: TableKind) -> CoreResult<String> {
    Ok(next_key_value(store, kind)?.to_string())
}
