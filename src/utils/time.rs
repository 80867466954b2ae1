use anyhow::{Context, Result};
use chrono::NaiveDate;

const RECORD_DATE_FORMAT: &str = "%Y-%m-%d";

/// This is the standard way of converting a date to a key of the daily log.
pub fn date_to_record_name(date: NaiveDate) -> String {
    date.format(RECORD_DATE_FORMAT).to_string()
}

pub fn record_name_to_date(name: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(name, RECORD_DATE_FORMAT)
        .with_context(|| format!("{name:?} is not a YYYY-MM-DD date"))
}

/// Formats accumulated seconds the way the dashboard shows them: `HH:MM:SS` once an hour has
/// passed, `MM:SS` before that.
pub fn format_clock(seconds: f64) -> String {
    let total = seconds.max(0.) as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;
    if hours > 0 {
        format!("{hours:02}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes:02}:{secs:02}")
    }
}
