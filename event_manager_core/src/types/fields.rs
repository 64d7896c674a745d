use chrono::NaiveDate;

/// Accepted input layouts for birthday-like fields.
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%d.%m.%Y", "%m/%d/%Y"];

/// Guest response. Stored as one of two canonical strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rsvp {
    Going,
    NotGoing,
}

impl Rsvp {
    /// Anything other than `going` / `not going` (case-insensitive) is NotGoing.
    pub fn normalize(input: &str) -> Rsvp {
        match input.trim().to_uppercase().as_str() {
            "GOING" => Rsvp::Going,
            _ => Rsvp::NotGoing,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Rsvp::Going => "GOING",
            Rsvp::NotGoing => "NOT GOING",
        }
    }
}

/// Coerces a date-like string to `YYYY-MM-DD`.
///
/// Blank input yields `None`. Text that matches none of the known layouts is
/// kept verbatim.
pub fn coerce_date(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Some(d.format("%Y-%m-%d").to_string());
        }
    }
    Some(trimmed.to_string())
}
