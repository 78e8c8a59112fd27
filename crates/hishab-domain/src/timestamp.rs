//! Single source of truth for the ledger's human-readable timestamp form.
//!
//! Entries carry their timestamp as the string `DD/MM/YYYY - HH:MM AM/PM`.
//! Every aggregation path that needs a structured date goes through the
//! parsers here; a malformed string yields `None` and the caller decides
//! whether to skip the record.

use chrono::{NaiveDate, NaiveDateTime};

/// Full timestamp layout, e.g. `30/08/2022 - 10:30 AM`.
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y - %I:%M %p";

/// Date portion layout, e.g. `30/08/2022`.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Separator between the date and time portions of a timestamp.
const PORTION_SEPARATOR: &str = " - ";

/// Renders a moment into the canonical entry timestamp string.
pub fn render(moment: NaiveDateTime) -> String {
    moment.format(TIMESTAMP_FORMAT).to_string()
}

/// Renders a calendar day into the canonical date string.
pub fn render_date(day: NaiveDate) -> String {
    day.format(DATE_FORMAT).to_string()
}

/// Parses a full entry timestamp. Returns `None` for anything malformed.
pub fn parse(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw.trim(), TIMESTAMP_FORMAT).ok()
}

/// Parses only the date portion of an entry timestamp.
///
/// Tolerates a missing time portion so that a bare `DD/MM/YYYY` string also
/// parses; everything else is `None`.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let portion = raw.trim().split(PORTION_SEPARATOR).next()?;
    NaiveDate::parse_from_str(portion.trim(), DATE_FORMAT).ok()
}
