//! Reminder scheduling: time-of-day parsing, the external scheduler
//! contract, and the reconciler that keeps per-habit notification handles
//! consistent with reminder times and the global notifications toggle.

mod reconciler;
mod time;

pub use reconciler::ReminderReconciler;
pub use time::ReminderTime;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::SchedulerError;

/// Opaque token identifying a scheduled repeating notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationHandle(String);

impl NotificationHandle {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Contract for the platform's local-notification scheduler.
///
/// Calls may suspend; no timeout is imposed here -- the embedder owns that
/// policy.
#[async_trait]
pub trait ReminderScheduler: Send + Sync {
    /// Schedule a notification repeating daily at the given local time.
    async fn schedule(
        &self,
        hour: u8,
        minute: u8,
        title: &str,
        body: &str,
    ) -> Result<NotificationHandle, SchedulerError>;

    /// Cancel a previously scheduled notification. Must tolerate handles
    /// that have already fired, were cancelled, or are unknown.
    async fn cancel(&self, handle: &NotificationHandle) -> Result<(), SchedulerError>;

    /// Ask the platform for notification permission.
    async fn request_permission(&self) -> Result<bool, SchedulerError>;

    /// Platform channel setup. May be a no-op.
    async fn ensure_channel(&self) -> Result<(), SchedulerError>;
}
