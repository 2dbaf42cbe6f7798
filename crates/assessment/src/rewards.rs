/// How an attempt converts accuracy into points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RewardMode {
    /// Free practice: roughly one point per 10 accuracy points.
    FreePractice,
    /// Challenge attempt: accuracy-proportional share of the challenge's
    /// base points.
    Challenge { base_points: i64 },
}

/// Points earned for an attempt. Accuracy is on the 0..=100 scale.
///
/// Rounds half away from zero, so 55.0 accuracy in free practice earns 6.
pub fn points_for(accuracy: f64, mode: RewardMode) -> i64 {
    match mode {
        RewardMode::FreePractice => (accuracy / 10.0).round() as i64,
        RewardMode::Challenge { base_points } => {
            (accuracy / 100.0 * base_points as f64).round() as i64
        }
    }
}

/// Level derived from a lifetime point total: level 1 at 0 points, one
/// level per 100 points.
pub fn level_for(total_points: i64) -> i32 {
    (1 + total_points.max(0) / 100) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_practice_points() {
        assert_eq!(points_for(0.0, RewardMode::FreePractice), 0);
        assert_eq!(points_for(100.0, RewardMode::FreePractice), 10);
        assert_eq!(points_for(72.4, RewardMode::FreePractice), 7);
        // Half rounds away from zero.
        assert_eq!(points_for(55.0, RewardMode::FreePractice), 6);
        assert_eq!(points_for(54.9, RewardMode::FreePractice), 5);
    }

    #[test]
    fn test_challenge_points() {
        let mode = RewardMode::Challenge { base_points: 50 };
        assert_eq!(points_for(100.0, mode), 50);
        assert_eq!(points_for(0.0, mode), 0);
        assert_eq!(points_for(80.0, mode), 40);
        // 83.33% of 75 = 62.4975 -> 62
        assert_eq!(points_for(83.33, RewardMode::Challenge { base_points: 75 }), 62);
        // 85% of 100 = 85
        assert_eq!(points_for(85.0, RewardMode::Challenge { base_points: 100 }), 85);
    }

    #[test]
    fn test_points_never_exceed_base() {
        for base in [50, 75, 100] {
            let earned = points_for(100.0, RewardMode::Challenge { base_points: base });
            assert_eq!(earned, base);
        }
    }

    #[test]
    fn test_level_thresholds() {
        assert_eq!(level_for(0), 1);
        assert_eq!(level_for(99), 1);
        assert_eq!(level_for(100), 2);
        assert_eq!(level_for(199), 2);
        assert_eq!(level_for(200), 3);
        assert_eq!(level_for(1050), 11);
    }

    #[test]
    fn test_level_never_below_one() {
        assert_eq!(level_for(-50), 1);
    }
}
