//! Read-side derivations over the completion ledger.
//!
//! Streaks and tree tiers are computed on demand from the ledger and never
//! persisted.

mod streak;
mod tree;

pub use streak::compute_streak;
pub use tree::{completion_rate, DailyProgress, TreeTier};
