//! Daily completion ratio and the tree wellness tier derived from it.

use serde::{Deserialize, Serialize};

/// Fraction of today's habits completed, in `[0, 1]`.
///
/// Defined as 0 when `total` is 0 -- the empty "no habits yet" state renders
/// as a dry tree instead of dividing by zero.
pub fn completion_rate(completed: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    completed as f64 / total as f64
}

/// Discrete wellness tier for the home-screen tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TreeTier {
    Healthy,
    Normal,
    Weak,
    Dry,
}

impl TreeTier {
    /// Classify a completion rate. Thresholds are inclusive lower bounds,
    /// evaluated high to low.
    pub fn classify(rate: f64) -> Self {
        if rate >= 0.8 {
            TreeTier::Healthy
        } else if rate >= 0.5 {
            TreeTier::Normal
        } else if rate >= 0.2 {
            TreeTier::Weak
        } else {
            TreeTier::Dry
        }
    }

    /// Display glyph for the tier.
    pub fn glyph(self) -> &'static str {
        match self {
            TreeTier::Healthy => "🌳",
            TreeTier::Normal => "🌿",
            TreeTier::Weak => "🍂",
            TreeTier::Dry => "🪵",
        }
    }

    /// Encouragement line shown under the tree.
    pub fn message(self) -> &'static str {
        match self {
            TreeTier::Healthy => "Your tree is growing!",
            TreeTier::Normal => "Nice work — keep going!",
            TreeTier::Weak => "Your tree needs a bit more care.",
            TreeTier::Dry => "Let’s try again today.",
        }
    }
}

/// Today's aggregate completion picture, ready for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyProgress {
    pub completed: usize,
    pub total: usize,
    pub rate: f64,
    pub tier: TreeTier,
}

impl DailyProgress {
    pub fn new(completed: usize, total: usize) -> Self {
        let rate = completion_rate(completed, total);
        Self {
            completed,
            total,
            rate,
            tier: TreeTier::classify(rate),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_fixtures() {
        assert_eq!(completion_rate(0, 0), 0.0);
        assert_eq!(completion_rate(3, 5), 0.6);
        assert_eq!(completion_rate(5, 5), 1.0);
    }

    #[test]
    fn classify_boundaries_are_inclusive_lower_bounds() {
        assert_eq!(TreeTier::classify(0.8), TreeTier::Healthy);
        assert_eq!(TreeTier::classify(0.79999), TreeTier::Normal);
        assert_eq!(TreeTier::classify(0.5), TreeTier::Normal);
        assert_eq!(TreeTier::classify(0.2), TreeTier::Weak);
        assert_eq!(TreeTier::classify(0.0), TreeTier::Dry);
        assert_eq!(TreeTier::classify(1.0), TreeTier::Healthy);
    }

    #[test]
    fn every_tier_has_a_glyph_and_message() {
        for tier in [TreeTier::Healthy, TreeTier::Normal, TreeTier::Weak, TreeTier::Dry] {
            assert!(!tier.glyph().is_empty());
            assert!(!tier.message().is_empty());
        }
    }

    #[test]
    fn daily_progress_bundles_rate_and_tier() {
        let progress = DailyProgress::new(4, 5);
        assert_eq!(progress.rate, 0.8);
        assert_eq!(progress.tier, TreeTier::Healthy);

        let empty = DailyProgress::new(0, 0);
        assert_eq!(empty.rate, 0.0);
        assert_eq!(empty.tier, TreeTier::Dry);
    }
}
