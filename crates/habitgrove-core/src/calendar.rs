//! Canonical calendar-day keys and day arithmetic.
//!
//! Every completion entry is keyed by the local calendar day it belongs to,
//! encoded as zero-padded `YYYY-MM-DD`. Everything here is pure: the caller
//! supplies the reference instant, nothing reads the wall clock.

use chrono::{DateTime, Days, Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::CalendarError;

static KEY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());

/// Encode a calendar date as its canonical `YYYY-MM-DD` key.
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Key of the local calendar day containing `now`.
///
/// Two instants on the same local day produce the same key regardless of
/// their time-of-day component.
pub fn today_key(now: DateTime<Local>) -> String {
    date_key(now.date_naive())
}

/// Decode a canonical key back into a date.
///
/// Strict: the string must match `^\d{4}-\d{2}-\d{2}$` exactly and name a
/// real calendar date.
pub fn parse_key(key: &str) -> Result<NaiveDate, CalendarError> {
    if !KEY_RE.is_match(key) {
        return Err(CalendarError::InvalidKey(key.to_string()));
    }
    let invalid = || CalendarError::InvalidKey(key.to_string());
    let year: i32 = key[0..4].parse().map_err(|_| invalid())?;
    let month: u32 = key[5..7].parse().map_err(|_| invalid())?;
    let day: u32 = key[8..10].parse().map_err(|_| invalid())?;
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
}

/// Calendar-correct day arithmetic. Crosses month and year boundaries and
/// accepts negative offsets. `None` only past chrono's representable range.
pub fn add_days(date: NaiveDate, n: i64) -> Option<NaiveDate> {
    if n >= 0 {
        date.checked_add_days(Days::new(n as u64))
    } else {
        date.checked_sub_days(Days::new(n.unsigned_abs()))
    }
}
