//! Calendar dates in the format the rates API expects

use chrono::{Duration, Local, NaiveDate};

/// Format used by the upstream API for the `date` query parameter.
pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// Returns the local date `days_ago` days before today, formatted as `dd.mm.yyyy`.
pub fn date_for_offset(days_ago: u32) -> String {
    date_before(Local::now().date_naive(), days_ago)
}

/// Same as [`date_for_offset`] but relative to a fixed `today`.
pub fn date_before(today: NaiveDate, days_ago: u32) -> String {
    let date = today - Duration::days(i64::from(days_ago));
    date.format(DATE_FORMAT).to_string()
}
