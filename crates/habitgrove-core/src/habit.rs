//! Habit records, the completion ledger, and the settings record.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::reminder::NotificationHandle;

/// Opaque habit identifier. Assigned at creation, immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HabitId(String);

impl HabitId {
    /// Mint a fresh id.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for HabitId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for HabitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for HabitId {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl From<String> for HabitId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

/// One tracked habit.
///
/// `reminder_time` holds the raw `HH:MM` text the user entered; empty means
/// "no reminder". An unparseable value can be stored (updates keep the text
/// and surface a validation warning), so parsing happens at scheduling time,
/// not here.
///
/// Invariant: `notification_id` is `Some` only while `reminder_time` is
/// non-empty, notifications are globally enabled, and the last scheduling
/// call succeeded. It never points at a cancelled schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: HabitId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Immutable creation instant; lower bound for streak computation.
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub reminder_time: String,
    /// False means soft-deleted. Records stored before this field existed
    /// default to active.
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub notification_id: Option<NotificationHandle>,
}

fn default_true() -> bool {
    true
}

/// Process-wide settings record.
///
/// Mutated only through the reminder reconciler's enable/disable operation,
/// so every flag flip is paired with its scheduling side effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default = "default_true")]
    pub notifications_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            notifications_enabled: true,
        }
    }
}

/// Completion ledger: date-key -> habit id -> done.
///
/// Absence of an entry means "not done". Entries for soft-deleted habits are
/// retained; history is immutable once written except through the completion
/// toggle itself (last write wins).
pub type CompletionLedger = BTreeMap<String, BTreeMap<HabitId, bool>>;
