//! Consecutive-day streak derivation.

use chrono::NaiveDate;

use crate::calendar::date_key;
use crate::habit::{CompletionLedger, HabitId};

/// Count consecutive completed days ending at `today`.
///
/// Walks backward one day at a time. A day counts only when its ledger entry
/// is strictly `true`; the first miss stops the walk, so a streak never
/// looks past a gap -- if today is not done the result is 0 regardless of
/// earlier history. The walk also stops once the cursor precedes
/// `created_on`: a habit cannot have accrued days before it existed, and
/// with an all-true ledger that bound is what guarantees termination.
pub fn compute_streak(
    habit_id: &HabitId,
    ledger: &CompletionLedger,
    created_on: NaiveDate,
    today: NaiveDate,
) -> u32 {
    let mut streak = 0;
    let mut cursor = today;
    loop {
        if cursor < created_on {
            break;
        }
        let done = ledger
            .get(&date_key(cursor))
            .and_then(|day| day.get(habit_id))
            .copied()
            .unwrap_or(false);
        if !done {
            break;
        }
        streak += 1;
        match cursor.pred_opt() {
            Some(prev) => cursor = prev,
            None => break,
        }
    }
    streak
}
