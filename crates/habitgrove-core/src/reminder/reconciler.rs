//! Keeps each habit's scheduled notification consistent with its reminder
//! time and the global notifications toggle.
//!
//! Per habit this is a two-state machine over (`reminder_time`,
//! `notifications_enabled`): `notification_id` absent means unscheduled,
//! present means scheduled. Every transition out of the scheduled state
//! cancels the old handle first, so a handle is never left pointing at a
//! cancelled or superseded schedule. Rescheduling that fails ends in the
//! unscheduled state.

use std::sync::Arc;

use tracing::{debug, warn};

use super::{ReminderScheduler, ReminderTime};
use crate::error::Warning;
use crate::habit::{Habit, Settings};

const REMINDER_TITLE: &str = "Habit reminder";

/// Drives per-habit schedule transitions against the external scheduler.
pub struct ReminderReconciler {
    scheduler: Arc<dyn ReminderScheduler>,
}

impl ReminderReconciler {
    pub fn new(scheduler: Arc<dyn ReminderScheduler>) -> Self {
        Self { scheduler }
    }

    /// Cancel `habit`'s live schedule, if any, and clear the handle.
    ///
    /// Best-effort: a failed cancellation is logged and swallowed, since an
    /// already-fired or invalid handle must not block the transition. The
    /// handle is cleared either way. Returns whether a cancel was attempted.
    pub async fn cancel(&self, habit: &mut Habit) -> bool {
        match habit.notification_id.take() {
            Some(handle) => {
                if let Err(err) = self.scheduler.cancel(&handle).await {
                    warn!(habit = %habit.id, %err, "reminder cancel failed; dropping handle anyway");
                }
                true
            }
            None => false,
        }
    }

    /// Schedule a daily reminder for `habit` if its time parses,
    /// notifications are enabled, and nothing is scheduled yet. Requests
    /// permission first; an unparseable time is skipped silently (the caller
    /// decides whether that deserves a warning).
    ///
    /// Refusals come back as warnings, not errors -- the habit operation
    /// around this call must still complete.
    pub async fn schedule(&self, habit: &mut Habit, settings: Settings) -> Option<Warning> {
        if habit.reminder_time.trim().is_empty()
            || !settings.notifications_enabled
            || habit.notification_id.is_some()
        {
            return None;
        }
        let time = match ReminderTime::parse(&habit.reminder_time) {
            Ok(time) => time,
            Err(_) => return None,
        };
        if let Err(err) = self.scheduler.ensure_channel().await {
            warn!(%err, "notification channel setup failed");
        }
        match self.scheduler.request_permission().await {
            Ok(true) => {}
            Ok(false) => return Some(Warning::PermissionDenied),
            Err(err) => return Some(Warning::Scheduler(err.to_string())),
        }
        match self
            .scheduler
            .schedule(time.hour, time.minute, REMINDER_TITLE, &habit.name)
            .await
        {
            Ok(handle) => {
                debug!(habit = %habit.id, %time, "reminder scheduled");
                habit.notification_id = Some(handle);
                None
            }
            Err(err) => Some(Warning::Scheduler(err.to_string())),
        }
    }

    /// Drive one habit from `previous_time` to its current reminder time:
    /// cancel-then-reschedule as a single transition. The old handle is
    /// cancelled when the time changed or notifications were disabled; a new
    /// schedule is attempted only when the current time is non-empty, valid,
    /// and notifications are enabled. A failed reschedule leaves the habit
    /// unscheduled, never holding a stale handle.
    pub async fn reconcile(
        &self,
        habit: &mut Habit,
        previous_time: &str,
        settings: Settings,
    ) -> Option<Warning> {
        if habit.notification_id.is_some()
            && (habit.reminder_time != previous_time || !settings.notifications_enabled)
        {
            self.cancel(habit).await;
        }
        self.schedule(habit, settings).await
    }

    /// Turn the global toggle off: cancel every active habit's live schedule
    /// (best-effort), clear all handles, then flip the flag. Cancellations
    /// run before the flip, so a crash partway leaves the flag untouched
    /// with some handles already cleared -- never a disabled flag with live
    /// schedules believed cancelled.
    pub async fn disable(&self, habits: &mut [Habit], settings: &mut Settings) {
        for habit in habits.iter_mut() {
            if habit.is_active {
                self.cancel(habit).await;
            } else {
                habit.notification_id = None;
            }
        }
        settings.notifications_enabled = false;
    }

    /// Turn the global toggle on. Requests permission; if the platform
    /// refuses, the flag stays off and a warning is returned.
    ///
    /// Existing habits' reminders are not rescheduled here -- only
    /// subsequent add/update operations schedule.
    // TODO: reschedule stored reminder times on enable instead of waiting
    // for the next edit to each habit.
    pub async fn enable(&self, settings: &mut Settings) -> Option<Warning> {
        if let Err(err) = self.scheduler.ensure_channel().await {
            warn!(%err, "notification channel setup failed");
        }
        match self.scheduler.request_permission().await {
            Ok(true) => {
                settings.notifications_enabled = true;
                None
            }
            Ok(false) => {
                settings.notifications_enabled = false;
                Some(Warning::PermissionDenied)
            }
            Err(err) => {
                settings.notifications_enabled = false;
                Some(Warning::Scheduler(err.to_string()))
            }
        }
    }
}
