//! Strict `HH:MM` reminder-time parsing.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ValidationError;

static TIME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([01]\d|2[0-3]):([0-5]\d)$").unwrap());

/// A wall-clock time of day for a daily reminder, 24-hour clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderTime {
    pub hour: u8,
    pub minute: u8,
}

impl ReminderTime {
    /// Parse strict zero-padded 24-hour `HH:MM` (`08:30`, not `8:30`).
    /// Surrounding whitespace is tolerated.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::InvalidReminderTime {
            value: value.to_string(),
        };
        let caps = TIME_RE.captures(value.trim()).ok_or_else(invalid)?;
        let hour = caps[1].parse().map_err(|_| invalid())?;
        let minute = caps[2].parse().map_err(|_| invalid())?;
        Ok(Self { hour, minute })
    }
}

impl fmt::Display for ReminderTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}
