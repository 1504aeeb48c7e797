//! Display helpers for the leaderboard card.

#[cfg(test)]
#[path = "display_test.rs"]
mod display_test;

use time::OffsetDateTime;
use time::macros::format_description;

/// Shorten a dash-delimited identifier to its first and last segments:
/// `8e067d2d-6f08-4f93-ad2d-f3ad5ca3c69c` becomes `8e067d2d-...-f3ad5ca3c69c`.
#[must_use]
pub fn break_uuid(id: &str) -> String {
    let first = id.split('-').next().unwrap_or_default();
    let last = id.rsplit('-').next().unwrap_or_default();
    format!("{first}-...-{last}")
}

/// `YYYY-MM-DD HH:MM` in the timestamp's own offset.
#[must_use]
pub fn format_short_datetime(datetime: OffsetDateTime) -> String {
    let format = format_description!("[year]-[month]-[day] [hour]:[minute]");
    datetime
        .format(&format)
        .unwrap_or_else(|_| datetime.to_string())
}

/// `YYYY-MM-DD` in the timestamp's own offset.
#[must_use]
pub fn format_date(datetime: OffsetDateTime) -> String {
    let format = format_description!("[year]-[month]-[day]");
    datetime
        .format(&format)
        .unwrap_or_else(|_| datetime.date().to_string())
}

/// Tooltip text for the start date row.
#[must_use]
pub fn start_date_tooltip(start: OffsetDateTime) -> String {
    format!(
        "Date from which entries are taken into account: {}",
        format_short_datetime(start)
    )
}
