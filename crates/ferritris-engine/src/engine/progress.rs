use std::time::Duration;

/// Score values for finalized line clears.
///
/// Index is the number of lines cleared at once; the value is multiplied
/// by `level + 1` when applied. Counts outside 1-4 score nothing.
const SCORE_TABLE: [usize; 5] = [0, 100, 300, 500, 800];

/// Lines required to advance one level.
const LINES_PER_LEVEL: usize = 10;

/// Score, cleared-line total, and the level/speed curve derived from them.
///
/// Level is not stored; it is always `total_lines / 10`. The drop
/// interval shrinks by 50 ms per level down to a 50 ms floor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Progress {
    score: usize,
    total_lines: usize,
}

impl Progress {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            total_lines: 0,
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub const fn total_lines(&self) -> usize {
        self.total_lines
    }

    /// Current level: one per 10 cleared lines.
    #[must_use]
    pub const fn level(&self) -> usize {
        self.total_lines / LINES_PER_LEVEL
    }

    /// Gravity interval for the current level.
    #[must_use]
    pub fn drop_interval(&self) -> Duration {
        drop_interval(self.level())
    }

    /// Applies a finalized clear of `cleared` rows.
    ///
    /// Scores at the level in effect before the rows are counted, then
    /// accumulates the line total. Returns `true` when the clear crossed
    /// a level boundary.
    pub fn record_clear(&mut self, cleared: usize) -> bool {
        let level_before = self.level();
        let points = SCORE_TABLE.get(cleared).copied().unwrap_or(0);
        self.score += points * (level_before + 1);
        self.total_lines += cleared;
        self.level() > level_before
    }
}

/// Gravity interval for `level`: starts at 0.8 s and shrinks by 50 ms per
/// level, floored at 50 ms.
#[must_use]
pub fn drop_interval(level: usize) -> Duration {
    let level = u64::try_from(level).unwrap_or(u64::MAX);
    Duration::from_millis(800_u64.saturating_sub(level.saturating_mul(50)).max(50))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(interval: Duration) -> f32 {
        interval.as_secs_f32()
    }

    #[test]
    fn test_score_table_applied_per_clear_count() {
        for (cleared, expected) in [(1, 100), (2, 300), (3, 500), (4, 800)] {
            let mut progress = Progress::new();
            progress.record_clear(cleared);
            assert_eq!(progress.score(), expected, "clearing {cleared} rows");
            assert_eq!(progress.total_lines(), cleared);
        }
    }

    #[test]
    fn test_score_scales_with_level() {
        let mut progress = Progress::new();
        // Reach level 2 first (20 lines), then clear a single.
        for _ in 0..5 {
            progress.record_clear(4);
        }
        let base = progress.score();
        progress.record_clear(1);
        assert_eq!(progress.level(), 2);
        assert_eq!(progress.score(), base + 100 * 3);
    }

    #[test]
    fn test_clear_count_outside_table_scores_nothing() {
        let mut progress = Progress::new();
        progress.record_clear(0);
        assert_eq!(progress.score(), 0);
        progress.record_clear(7);
        assert_eq!(progress.score(), 0);
        assert_eq!(progress.total_lines(), 7);
    }

    #[test]
    fn test_level_boundary_uses_pre_clear_level() {
        let mut progress = Progress::new();
        for _ in 0..9 {
            progress.record_clear(1);
        }
        assert_eq!(progress.level(), 0);

        // The 10th line still scores at level 0, then levels up.
        let leveled_up = progress.record_clear(1);
        assert!(leveled_up);
        assert_eq!(progress.level(), 1);
        assert_eq!(progress.score(), 10 * 100);
    }

    #[test]
    fn test_no_level_up_within_a_level() {
        let mut progress = Progress::new();
        assert!(!progress.record_clear(4));
        assert!(!progress.record_clear(4));
        assert!(progress.record_clear(4));
        assert_eq!(progress.level(), 1);
    }

    #[test]
    fn test_drop_interval_curve() {
        assert!((secs(drop_interval(0)) - 0.8).abs() < 1e-6);
        assert!((secs(drop_interval(1)) - 0.75).abs() < 1e-6);
        assert!((secs(drop_interval(10)) - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_drop_interval_floor() {
        assert!((secs(drop_interval(15)) - 0.05).abs() < 1e-6);
        assert!((secs(drop_interval(100)) - 0.05).abs() < 1e-6);
    }
}
