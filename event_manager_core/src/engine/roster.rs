use std::fmt;

use crate::error::CoreResult;
use crate::storage::Store;
use crate::types::fields::Rsvp;
use crate::types::value::{value_to_string, Value};
use crate::types::Row;

/// One line of a roster: display name plus optional email.
#[derive(Debug, Clone, PartialEq)]
pub struct Contact {
    pub name: String,
    pub email: Option<String>,
}

/// Everything attached to one event.
#[derive(Debug, Clone, PartialEq)]
pub struct Roster {
    pub event_name: String,
    pub address: Option<String>,
    pub hosts: Vec<Contact>,
    pub bands: Vec<Contact>,
    pub going: Vec<Contact>,
    pub not_going: Vec<Contact>,
}

impl Roster {
    pub fn is_unattended(&self) -> bool {
        self.hosts.is_empty() && self.bands.is_empty() && self.going.is_empty() && self.not_going.is_empty()
    }
}

/// Collects the hosts, bands and guests referring to `event_name`.
/// Returns `None` if no such event exists.
pub fn event_roster(store: &Store, event_name: &str) -> CoreResult<Option<Roster>> {
    let arg = [Value::Text(event_name.to_string())];

    let event = store.select("SELECT address FROM event WHERE event_name = ?1", &arg)?;
    let Some(address) = event.rows.first().map(|row| text_at(row, 0)) else {
        return Ok(None);
    };

    let hosts = store
        .select(
            "SELECT first_name, last_name, email FROM host WHERE event_name = ?1 ORDER BY id",
            &arg,
        )?
        .rows
        .iter()
        .map(person_contact)
        .collect();

    let bands = store
        .select("SELECT band_name, email FROM band WHERE event_name = ?1 ORDER BY id", &arg)?
        .rows
        .iter()
        .map(|row| Contact {
            name: text_at(row, 0).unwrap_or_default(),
            email: text_at(row, 1),
        })
        .collect();

    let mut going = Vec::new();
    let mut not_going = Vec::new();
    let guests = store.select(
        "SELECT first_name, last_name, email, rsvp FROM guest WHERE event_name = ?1 ORDER BY id",
        &arg,
    )?;
    for row in &guests.rows {
        let rsvp = Rsvp::normalize(&text_at(row, 3).unwrap_or_default());
        match rsvp {
            Rsvp::Going => going.push(person_contact(row)),
            Rsvp::NotGoing => not_going.push(person_contact(row)),
        }
    }

    Ok(Some(Roster {
        event_name: event_name.to_string(),
        address,
        hosts,
        bands,
        going,
        not_going,
    }))
}

fn person_contact(row: &Row) -> Contact {
    let first = text_at(row, 0).unwrap_or_default();
    let last = text_at(row, 1).unwrap_or_default();
    Contact {
        name: format!("{first} {last}").trim().to_string(),
        email: text_at(row, 2),
    }
}

fn text_at(row: &Row, idx: usize) -> Option<String> {
    row.get(idx)
        .filter(|v| !v.is_null())
        .map(value_to_string)
        .filter(|s| !s.is_empty())
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "- {} (Email: {})", self.name, self.email.as_deref().unwrap_or("N/A"))
    }
}

impl fmt::Display for Roster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Event Name: {}", self.event_name)?;
        write!(f, "Address: {}", self.address.as_deref().unwrap_or("N/A"))?;

        if self.is_unattended() {
            return write!(f, "\n\nNo hosts, bands, or guests found for this event.");
        }
        write_section(f, "Hosts:", &self.hosts)?;
        write_section(f, "Bands:", &self.bands)?;
        if !self.going.is_empty() || !self.not_going.is_empty() {
            write!(f, "\n\nGuests:")?;
            write_section(f, "  Going:", &self.going)?;
            write_section(f, "  Not Going:", &self.not_going)?;
        }
        Ok(())
    }
}

fn write_section(f: &mut fmt::Formatter<'_>, title: &str, contacts: &[Contact]) -> fmt::Result {
    if contacts.is_empty() {
        return Ok(());
    }
    write!(f, "\n\n{title}")?;
    for c in contacts {
        write!(f, "\n{c}")?;
    }
    Ok(())
}
