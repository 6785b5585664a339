//! Orchestration over the store and the two external collaborators.
//!
//! `HabitManager` owns the in-memory state and pairs every mutation with its
//! reminder-scheduling side effects and a persistence snapshot. Operations
//! take `&mut self`, so within one process they cannot overlap -- that is
//! what serializes cancel-then-reschedule sequences per habit. Each
//! operation finishes its in-memory transition synchronously, either before
//! an external call or as one step applied from the call's result; a reader
//! between awaits never sees partial state.

use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDate, Utc};
use tracing::warn;

use crate::calendar;
use crate::error::{CoreError, Result, ValidationError, Warning};
use crate::habit::{Habit, HabitId, Settings};
use crate::reminder::{ReminderReconciler, ReminderScheduler, ReminderTime};
use crate::stats::{compute_streak, DailyProgress};
use crate::storage::{self, PersistenceGateway};
use crate::store::HabitStore;

/// Name, description, and reminder time for an add or update. The same
/// shape serves both: updates replace all three fields.
#[derive(Debug, Clone, Default)]
pub struct HabitDraft {
    pub name: String,
    pub description: String,
    /// Raw `HH:MM` text; empty means no reminder.
    pub reminder_time: String,
}

/// Facade over the habit store, the reminder reconciler, and the
/// persistence gateway.
pub struct HabitManager {
    store: HabitStore,
    gateway: Arc<dyn PersistenceGateway>,
    reconciler: ReminderReconciler,
    warnings: Vec<Warning>,
    hydrated: bool,
}

impl HabitManager {
    pub fn new(
        gateway: Arc<dyn PersistenceGateway>,
        scheduler: Arc<dyn ReminderScheduler>,
    ) -> Self {
        Self {
            store: HabitStore::new(),
            gateway,
            reconciler: ReminderReconciler::new(scheduler),
            warnings: Vec::new(),
            hydrated: false,
        }
    }

    /// Load the persisted collections into memory. Call once at startup.
    /// Snapshots are only written after hydration completes, so a failed
    /// load can never be clobbered by an empty state.
    pub async fn hydrate(&mut self) {
        let snapshot = storage::hydrate(self.gateway.as_ref()).await;
        self.store
            .replace_all(snapshot.habits, snapshot.completions, snapshot.settings);
        self.hydrated = true;
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn active_habits(&self) -> Vec<&Habit> {
        self.store.active_habits()
    }

    pub fn habit_by_id(&self, id: &HabitId) -> Option<&Habit> {
        self.store.habit_by_id(id)
    }

    pub fn settings(&self) -> Settings {
        self.store.settings()
    }

    pub fn store(&self) -> &HabitStore {
        &self.store
    }

    pub fn is_done_on(&self, id: &HabitId, date: NaiveDate) -> bool {
        self.store.is_done_on(id, date)
    }

    pub fn is_done_today(&self, id: &HabitId, now: DateTime<Local>) -> bool {
        self.store.is_done_on(id, now.date_naive())
    }

    /// Consecutive-day streak for a habit, ending at `today`. Unknown ids
    /// have no history and report 0.
    pub fn streak_on(&self, id: &HabitId, today: NaiveDate) -> u32 {
        match self.store.habit_by_id(id) {
            Some(habit) => compute_streak(
                id,
                self.store.completions(),
                habit.created_at.with_timezone(&Local).date_naive(),
                today,
            ),
            None => 0,
        }
    }

    /// Aggregate completion picture for `today`, over active habits only.
    pub fn daily_progress(&self, today: NaiveDate) -> DailyProgress {
        let active = self.store.active_habits();
        let total = active.len();
        let completed = active
            .iter()
            .filter(|h| self.store.is_done_on(&h.id, today))
            .count();
        DailyProgress::new(completed, total)
    }

    /// Drain pending user-facing warnings, oldest first.
    pub fn take_warnings(&mut self) -> Vec<Warning> {
        std::mem::take(&mut self.warnings)
    }

    // ── Mutations ────────────────────────────────────────────────────

    /// Create a habit. If a reminder time is set and notifications are
    /// enabled, scheduling is attempted before the habit becomes visible;
    /// permission refusals and scheduler failures surface as warnings and
    /// the habit is created without a handle -- creation is never blocked by
    /// a notification problem.
    pub async fn add_habit(&mut self, draft: HabitDraft) -> Result<HabitId> {
        let name = draft.name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        let mut habit = Habit {
            id: HabitId::new(),
            name: name.to_string(),
            description: draft.description.trim().to_string(),
            created_at: Utc::now(),
            reminder_time: draft.reminder_time.trim().to_string(),
            is_active: true,
            notification_id: None,
        };
        if let Some(warning) = self.reconciler.schedule(&mut habit, self.store.settings()).await {
            self.warnings.push(warning);
        }
        let id = habit.id.clone();
        self.store.insert(habit);
        self.persist().await;
        Ok(id)
    }

    /// Update name, description, and reminder time. The schedule is
    /// reconciled cancel-first. A new time that does not parse is stored as
    /// entered and surfaced as a validation warning without reverting the
    /// other fields.
    pub async fn update_habit(&mut self, id: &HabitId, draft: HabitDraft) -> Result<()> {
        let name = draft.name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        let old = self
            .store
            .habit_by_id(id)
            .ok_or_else(|| CoreError::NotFound(id.clone()))?;
        let previous_time = old.reminder_time.clone();

        let mut updated = old.clone();
        updated.name = name.to_string();
        updated.description = draft.description.trim().to_string();
        updated.reminder_time = draft.reminder_time.trim().to_string();

        if !updated.reminder_time.is_empty() && ReminderTime::parse(&updated.reminder_time).is_err()
        {
            self.warnings
                .push(Warning::InvalidReminderTime(updated.reminder_time.clone()));
        }
        if let Some(warning) = self
            .reconciler
            .reconcile(&mut updated, &previous_time, self.store.settings())
            .await
        {
            self.warnings.push(warning);
        }
        self.store.apply(updated);
        self.persist().await;
        Ok(())
    }

    /// Soft-delete or restore a habit. Deleting cancels any live reminder
    /// first; history stays in the ledger. Restoring leaves the reminder
    /// unscheduled until the habit is next edited.
    pub async fn toggle_active(&mut self, id: &HabitId) -> Result<()> {
        let habit = self
            .store
            .habit_by_id(id)
            .ok_or_else(|| CoreError::NotFound(id.clone()))?;
        let mut updated = habit.clone();
        if updated.is_active {
            self.reconciler.cancel(&mut updated).await;
            updated.is_active = false;
        } else {
            updated.is_active = true;
        }
        self.store.apply(updated);
        self.persist().await;
        Ok(())
    }

    /// Upsert one completion entry. Last write wins. The habit id is not
    /// checked against the collection, so history for removed habits stays
    /// writable; the key must be canonical.
    pub async fn set_completion(&mut self, habit_id: &HabitId, key: &str, done: bool) -> Result<()> {
        calendar::parse_key(key)?;
        self.store.set_completion(key, habit_id, done);
        self.persist().await;
        Ok(())
    }

    /// Mark a habit done or not done for the local day containing `now`.
    pub async fn toggle_done(
        &mut self,
        habit_id: &HabitId,
        now: DateTime<Local>,
        done: bool,
    ) -> Result<()> {
        let key = calendar::today_key(now);
        self.store.set_completion(&key, habit_id, done);
        self.persist().await;
        Ok(())
    }

    /// Flip the global notifications toggle, paired with its scheduling
    /// side effects. Disabling cancels every active habit's schedule before
    /// the flag flips; enabling requests permission and schedules nothing
    /// retroactively. The settings field is never assigned outside this
    /// operation.
    pub async fn set_notifications_enabled(&mut self, enabled: bool) -> Result<()> {
        let mut settings = self.store.settings();
        if enabled {
            if let Some(warning) = self.reconciler.enable(&mut settings).await {
                self.warnings.push(warning);
            }
            self.store.replace_settings(settings);
        } else {
            let mut habits = self.store.habits().to_vec();
            self.reconciler.disable(&mut habits, &mut settings).await;
            for habit in habits {
                self.store.apply(habit);
            }
            self.store.replace_settings(settings);
        }
        self.persist().await;
        Ok(())
    }

    /// Cancel every known reminder (best-effort), delete the stored
    /// collections, and reset the in-memory state to defaults.
    pub async fn reset_all(&mut self) -> Result<()> {
        let mut habits = self.store.habits().to_vec();
        for habit in habits.iter_mut() {
            self.reconciler.cancel(habit).await;
        }
        // Handles are gone regardless of how the removal below fares.
        for habit in habits {
            self.store.apply(habit);
        }
        if let Err(err) = storage::remove_all(self.gateway.as_ref()).await {
            warn!(%err, "reset failed to clear stored data");
            return Err(err.into());
        }
        self.store.clear();
        Ok(())
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// Snapshot the three collections. No-op before hydration. A failed
    /// save surfaces a warning; the in-memory state is unaffected and stays
    /// authoritative.
    async fn persist(&mut self) {
        if !self.hydrated {
            return;
        }
        if let Err(err) = storage::persist_all(self.gateway.as_ref(), &self.store).await {
            warn!(%err, "snapshot save failed; in-memory state unaffected");
            self.warnings.push(Warning::SaveFailed(err.to_string()));
        }
    }
}
