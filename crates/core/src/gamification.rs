//! XP and level arithmetic.
//!
//! A level spans a fixed [`XP_PER_LEVEL`] points of lifetime XP. The stored
//! `users.level` column must always equal [`calculate_level`] of the stored
//! `users.total_xp`.

use serde::Serialize;

/// Lifetime XP required per level.
pub const XP_PER_LEVEL: i64 = 1000;

/// XP for a correct quiz answer.
pub const QUIZ_XP_CORRECT: i32 = 10;
/// XP for an incorrect quiz answer (participation).
pub const QUIZ_XP_INCORRECT: i32 = 2;
/// Bonus XP when the recognizer is confident about the attempt.
pub const QUIZ_CONFIDENCE_BONUS: i32 = 5;
/// Confidence strictly above this threshold earns the bonus.
pub const QUIZ_CONFIDENCE_THRESHOLD: f64 = 0.8;

/// Level for a lifetime XP total. Negative totals clamp to level 1.
pub fn calculate_level(total_xp: i64) -> i32 {
    if total_xp < 0 {
        return 1;
    }
    let level = total_xp / XP_PER_LEVEL + 1;
    i32::try_from(level).unwrap_or(i32::MAX)
}

/// Progress through the current level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LevelProgress {
    pub level: i32,
    /// XP earned inside the current level.
    pub current_xp: i64,
    pub needed_for_next: i64,
    /// Rounded, capped at 100.
    pub percentage: i64,
}

/// Compute [`LevelProgress`] for a lifetime XP total.
pub fn next_level_progress(total_xp: i64) -> LevelProgress {
    let total = total_xp.max(0);
    let current_xp = total % XP_PER_LEVEL;
    let percentage = ((current_xp as f64 / XP_PER_LEVEL as f64) * 100.0).round() as i64;
    LevelProgress {
        level: calculate_level(total),
        current_xp,
        needed_for_next: XP_PER_LEVEL,
        percentage: percentage.min(100),
    }
}

/// XP earned by a single quiz answer.
pub fn quiz_xp(is_correct: bool, confidence: Option<f64>) -> i32 {
    let base = if is_correct {
        QUIZ_XP_CORRECT
    } else {
        QUIZ_XP_INCORRECT
    };
    let bonus = match confidence {
        Some(c) if c > QUIZ_CONFIDENCE_THRESHOLD => QUIZ_CONFIDENCE_BONUS,
        _ => 0,
    };
    base + bonus
}

/// Result of applying an XP grant to a user's counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct XpGrant {
    pub xp: i64,
    pub total_xp: i64,
    pub old_level: i32,
    pub new_level: i32,
    pub leveled_up: bool,
}

/// Add `amount` to both XP counters and recompute the level.
pub fn apply_xp(xp: i64, total_xp: i64, current_level: i32, amount: i64) -> XpGrant {
    let new_total = total_xp.saturating_add(amount);
    let new_level = calculate_level(new_total);
    XpGrant {
        xp: xp.saturating_add(amount),
        total_xp: new_total,
        old_level: current_level,
        new_level,
        leveled_up: new_level > current_level,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_boundaries() {
        assert_eq!(calculate_level(0), 1);
        assert_eq!(calculate_level(999), 1);
        assert_eq!(calculate_level(1000), 2);
        assert_eq!(calculate_level(1999), 2);
        assert_eq!(calculate_level(2000), 3);
    }

    #[test]
    fn negative_xp_is_level_one() {
        assert_eq!(calculate_level(-5), 1);
        assert_eq!(calculate_level(i64::MIN), 1);
    }

    #[test]
    fn level_is_monotonic() {
        let mut previous = calculate_level(-10);
        for xp in (-10..5000).step_by(7) {
            let level = calculate_level(xp);
            assert!(level >= previous, "level dropped at xp={xp}");
            previous = level;
        }
    }

    #[test]
    fn huge_totals_saturate() {
        assert_eq!(calculate_level(i64::MAX), i32::MAX);
    }

    #[test]
    fn progress_inside_level() {
        let p = next_level_progress(2450);
        assert_eq!(p.level, 3);
        assert_eq!(p.current_xp, 450);
        assert_eq!(p.needed_for_next, 1000);
        assert_eq!(p.percentage, 45);
    }

    #[test]
    fn progress_rounds_percentage() {
        assert_eq!(next_level_progress(5).percentage, 1);
        assert_eq!(next_level_progress(994).percentage, 99);
        assert_eq!(next_level_progress(996).percentage, 100);
    }

    #[test]
    fn quiz_xp_values() {
        assert_eq!(quiz_xp(true, None), 10);
        assert_eq!(quiz_xp(false, None), 2);
        assert_eq!(quiz_xp(true, Some(0.9)), 15);
        assert_eq!(quiz_xp(false, Some(0.95)), 7);
        assert_eq!(quiz_xp(true, Some(0.8)), 10, "threshold is exclusive");
    }

    #[test]
    fn apply_xp_detects_level_up() {
        let grant = apply_xp(900, 900, 1, 100);
        assert_eq!(grant.total_xp, 1000);
        assert_eq!(grant.xp, 1000);
        assert_eq!(grant.new_level, 2);
        assert!(grant.leveled_up);

        let grant = apply_xp(10, 10, 1, 5);
        assert!(!grant.leveled_up);
        assert_eq!(grant.new_level, 1);
    }

    #[test]
    fn apply_xp_heals_stale_level() {
        // A stored level that drifted is corrected on the next grant.
        let grant = apply_xp(0, 3000, 1, 1);
        assert_eq!(grant.new_level, 4);
    }
}
