use anyhow::{anyhow, bail, Result};
use chrono::{DateTime, Local, NaiveDate};
use chrono_english::{parse_date_string, Dialect};

use crate::utils::time::record_name_to_date;

/// Accepts a `YYYY-MM-DD` date or anything `chrono-english` understands, such as "yesterday"
/// or "15/03/2025".
pub fn parse_day(input: &str, now: DateTime<Local>, dialect: Dialect) -> Result<NaiveDate> {
    if let Ok(date) = record_name_to_date(input.trim()) {
        return Ok(date);
    }
    parse_date_string(input, now, dialect)
        .map(|v| v.date_naive())
        .map_err(|e| anyhow!("Failed to parse date {input:?}: {e}"))
}

/// Every day from `from` to `to`, both included.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> Result<Vec<NaiveDate>> {
    if from > to {
        bail!("Range start {from} is after its end {to}");
    }
    Ok(from.iter_days().take_while(|v| *v <= to).collect())
}
