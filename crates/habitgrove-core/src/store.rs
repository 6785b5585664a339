//! Authoritative in-memory state: the habit collection, the completion
//! ledger, and the settings record.
//!
//! All mutations here are synchronous and complete before control returns,
//! so within one process a reader never observes a half-applied transition.
//! Validation and the scheduling/persistence side effects live in
//! [`crate::manager::HabitManager`].

use chrono::NaiveDate;

use crate::calendar;
use crate::habit::{CompletionLedger, Habit, HabitId, Settings};

/// In-memory collection of habits (newest first), the completion ledger,
/// and settings.
#[derive(Debug, Clone, Default)]
pub struct HabitStore {
    habits: Vec<Habit>,
    completions: CompletionLedger,
    settings: Settings,
}

impl HabitStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// Every habit, newest first, soft-deleted included.
    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    /// Habits that have not been soft-deleted, newest first.
    pub fn active_habits(&self) -> Vec<&Habit> {
        self.habits.iter().filter(|h| h.is_active).collect()
    }

    pub fn habit_by_id(&self, id: &HabitId) -> Option<&Habit> {
        self.habits.iter().find(|h| &h.id == id)
    }

    pub fn completions(&self) -> &CompletionLedger {
        &self.completions
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    /// Whether `id` has a strictly-true completion entry on `date`.
    pub fn is_done_on(&self, id: &HabitId, date: NaiveDate) -> bool {
        self.completions
            .get(&calendar::date_key(date))
            .and_then(|day| day.get(id))
            .copied()
            .unwrap_or(false)
    }

    // ── Mutations ────────────────────────────────────────────────────

    /// Insert a new habit at the front of the list.
    pub fn insert(&mut self, habit: Habit) {
        self.habits.insert(0, habit);
    }

    /// Replace the stored habit carrying the same id.
    /// Returns false when the id is unknown.
    pub fn apply(&mut self, habit: Habit) -> bool {
        match self.habits.iter_mut().find(|h| h.id == habit.id) {
            Some(slot) => {
                *slot = habit;
                true
            }
            None => false,
        }
    }

    /// Upsert one (date, habit) completion entry. Last write wins; the habit
    /// id is not checked against the collection.
    pub fn set_completion(&mut self, key: &str, id: &HabitId, done: bool) {
        self.completions
            .entry(key.to_string())
            .or_default()
            .insert(id.clone(), done);
    }

    pub fn replace_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    /// Replace the whole state in one step (initial hydration).
    pub fn replace_all(
        &mut self,
        habits: Vec<Habit>,
        completions: CompletionLedger,
        settings: Settings,
    ) {
        self.habits = habits;
        self.completions = completions;
        self.settings = settings;
    }

    /// Drop everything back to defaults.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn habit(id: &str, name: &str) -> Habit {
        Habit {
            id: HabitId::from(id),
            name: name.into(),
            description: String::new(),
            created_at: Utc::now(),
            reminder_time: String::new(),
            is_active: true,
            notification_id: None,
        }
    }

    #[test]
    fn insert_keeps_newest_first() {
        let mut store = HabitStore::new();
        store.insert(habit("h1", "Water"));
        store.insert(habit("h2", "Read"));
        let names: Vec<_> = store.habits().iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, ["Read", "Water"]);
    }

    #[test]
    fn apply_replaces_by_id() {
        let mut store = HabitStore::new();
        store.insert(habit("h1", "Water"));
        let mut updated = habit("h1", "Water the plants");
        updated.description = "Every morning".into();
        assert!(store.apply(updated));
        assert_eq!(
            store.habit_by_id(&HabitId::from("h1")).unwrap().name,
            "Water the plants"
        );
        assert!(!store.apply(habit("missing", "x")));
    }

    #[test]
    fn active_habits_excludes_soft_deleted() {
        let mut store = HabitStore::new();
        store.insert(habit("h1", "Water"));
        let mut deleted = habit("h2", "Read");
        deleted.is_active = false;
        store.insert(deleted);
        let active: Vec<_> = store.active_habits().iter().map(|h| h.name.as_str()).collect();
        assert_eq!(active, ["Water"]);
        // Still present in the full collection.
        assert!(store.habit_by_id(&HabitId::from("h2")).is_some());
    }

    #[test]
    fn set_completion_is_last_write_wins() {
        let mut store = HabitStore::new();
        let id = HabitId::from("h1");
        store.set_completion("2024-03-01", &id, true);
        store.set_completion("2024-03-01", &id, false);
        // The entry is present and false, not absent.
        assert_eq!(
            store.completions().get("2024-03-01").unwrap().get(&id),
            Some(&false)
        );
    }

    #[test]
    fn is_done_on_defaults_to_false() {
        let store = HabitStore::new();
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert!(!store.is_done_on(&HabitId::from("h1"), date));
    }

    #[test]
    fn clear_resets_to_defaults() {
        let mut store = HabitStore::new();
        store.insert(habit("h1", "Water"));
        store.set_completion("2024-03-01", &HabitId::from("h1"), true);
        store.replace_settings(Settings {
            notifications_enabled: false,
        });
        store.clear();
        assert!(store.habits().is_empty());
        assert!(store.completions().is_empty());
        assert!(store.settings().notifications_enabled);
    }
}
