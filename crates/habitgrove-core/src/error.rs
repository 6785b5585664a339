//! Error and warning types for habitgrove-core.
//!
//! Two channels exist: `CoreError` for failures that abort an operation
//! (bad input, unknown id), and `Warning` for conditions the presentation
//! layer should show without the operation failing (permission refusals,
//! save errors). A failed external call never leaves the in-memory state
//! half-applied -- each operation either fully commits or fully aborts.

use thiserror::Error;

use crate::habit::HabitId;

/// Core error type for habitgrove-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Bad user input; the operation aborted with no state change.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Date-key encoding/decoding failure.
    #[error("calendar error: {0}")]
    Calendar(#[from] CalendarError),

    /// Operation targeted a habit id that is not in the collection.
    #[error("no habit with id {0}")]
    NotFound(HabitId),

    /// Persistence gateway failure.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Reminder scheduler failure.
    #[error("scheduler error: {0}")]
    Scheduler(#[from] SchedulerError),

    /// Serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Habit names must contain at least one non-whitespace character.
    #[error("habit name must not be empty")]
    EmptyName,

    /// Reminder times are strict 24-hour `HH:MM`.
    #[error("reminder time must be HH:MM (24h), e.g. 08:30; got '{value}'")]
    InvalidReminderTime { value: String },
}

/// Calendar-key errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    /// Not a canonical `YYYY-MM-DD` string, or an impossible calendar date
    /// (month 13, Feb 30).
    #[error("invalid date key '{0}'")]
    InvalidKey(String),
}

/// Persistence gateway errors.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("failed to load '{key}': {message}")]
    LoadFailed { key: String, message: String },

    #[error("failed to save '{key}': {message}")]
    SaveFailed { key: String, message: String },

    #[error("failed to remove '{key}': {message}")]
    RemoveFailed { key: String, message: String },

    /// IO errors from filesystem-backed gateways.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Reminder scheduler errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    #[error("platform denied notification permission")]
    PermissionDenied,

    #[error("scheduling failed: {0}")]
    ScheduleFailed(String),

    #[error("cancellation failed: {0}")]
    CancelFailed(String),

    #[error("notification channel setup failed: {0}")]
    ChannelFailed(String),
}

/// Non-fatal conditions surfaced to the user while the operation that
/// produced them still completes. Drained via `HabitManager::take_warnings`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// Notifications permission was not granted; the habit operation
    /// completed without a schedule.
    PermissionDenied,

    /// The scheduler refused a call; the habit stays unscheduled.
    Scheduler(String),

    /// A reminder time did not parse; the other fields were still applied.
    InvalidReminderTime(String),

    /// A snapshot save failed; in-memory state is unaffected and remains
    /// authoritative.
    SaveFailed(String),
}

impl Warning {
    /// User-facing banner copy.
    pub fn message(&self) -> &'static str {
        match self {
            Warning::PermissionDenied => "Notifications permission not granted.",
            Warning::Scheduler(_) => "Could not schedule the reminder.",
            Warning::InvalidReminderTime(_) => "Reminder time must be HH:MM (24h), e.g. 08:30.",
            Warning::SaveFailed(_) => "Could not save data. Please try again.",
        }
    }
}

/// Result type alias for CoreError.
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
