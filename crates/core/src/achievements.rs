//! Achievement catalog types and unlock rules.

use std::collections::HashSet;

use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Achievement types
// ---------------------------------------------------------------------------

/// How an achievement is earned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AchievementType {
    XpReached,
    LevelReached,
    StreakReached,
    /// Granted by an admin only.
    Manual,
}

impl AchievementType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::XpReached => "XP_REACHED",
            Self::LevelReached => "LEVEL_REACHED",
            Self::StreakReached => "STREAK_REACHED",
            Self::Manual => "MANUAL",
        }
    }

    pub fn from_str_value(s: &str) -> Result<Self, CoreError> {
        match s {
            "XP_REACHED" => Ok(Self::XpReached),
            "LEVEL_REACHED" => Ok(Self::LevelReached),
            "STREAK_REACHED" => Ok(Self::StreakReached),
            "MANUAL" => Ok(Self::Manual),
            other => Err(CoreError::Validation(format!(
                "Invalid achievement type '{other}'. Must be one of: {}",
                VALID_TYPES.join(", ")
            ))),
        }
    }
}

pub const VALID_TYPES: &[&str] = &["XP_REACHED", "LEVEL_REACHED", "STREAK_REACHED", "MANUAL"];

pub const DEFAULT_TYPE: &str = "MANUAL";

// ---------------------------------------------------------------------------
// Categories and defaults
// ---------------------------------------------------------------------------

pub const VALID_CATEGORIES: &[&str] = &["streak", "learning", "community", "collection", "level"];

pub const DEFAULT_CATEGORY: &str = "learning";
pub const DEFAULT_XP_REWARD: i32 = 50;
pub const DEFAULT_TARGET_VALUE: i64 = 1;

pub fn validate_category(category: &str) -> Result<(), CoreError> {
    crate::validation::validate_choice("achievement category", category, VALID_CATEGORIES)
}

// ---------------------------------------------------------------------------
// Unlock evaluation
// ---------------------------------------------------------------------------

/// User metrics an achievement check is evaluated against.
///
/// `None` means the metric was not part of this check, so achievements of
/// the matching type are skipped rather than treated as unmet.
#[derive(Debug, Clone, Copy, Default)]
pub struct AchievementMetrics {
    pub total_xp: Option<i64>,
    pub level: Option<i32>,
    pub current_streak: Option<i32>,
}

/// Minimal catalog entry needed to evaluate unlocks.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub id: DbId,
    pub achievement_type: String,
    pub target_value: i64,
}

/// Whether one catalog entry is satisfied by `metrics`.
pub fn is_satisfied(entry: &CatalogEntry, metrics: &AchievementMetrics) -> bool {
    let Ok(kind) = AchievementType::from_str_value(&entry.achievement_type) else {
        return false;
    };
    match kind {
        AchievementType::XpReached => metrics.total_xp.is_some_and(|v| v >= entry.target_value),
        AchievementType::LevelReached => metrics
            .level
            .is_some_and(|v| i64::from(v) >= entry.target_value),
        AchievementType::StreakReached => metrics
            .current_streak
            .is_some_and(|v| i64::from(v) >= entry.target_value),
        AchievementType::Manual => false,
    }
}

/// Ids of catalog entries the user now qualifies for and does not yet own.
pub fn newly_unlocked(
    catalog: &[CatalogEntry],
    owned: &HashSet<DbId>,
    metrics: &AchievementMetrics,
) -> Vec<DbId> {
    catalog
        .iter()
        .filter(|entry| !owned.contains(&entry.id))
        .filter(|entry| is_satisfied(entry, metrics))
        .map(|entry| entry.id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: DbId, kind: &str, target: i64) -> CatalogEntry {
        CatalogEntry {
            id,
            achievement_type: kind.to_string(),
            target_value: target,
        }
    }

    fn catalog() -> Vec<CatalogEntry> {
        vec![
            entry(1, "XP_REACHED", 100),
            entry(2, "XP_REACHED", 5000),
            entry(3, "LEVEL_REACHED", 2),
            entry(4, "STREAK_REACHED", 7),
            entry(5, "MANUAL", 1),
        ]
    }

    #[test]
    fn type_round_trip() {
        for s in VALID_TYPES {
            assert_eq!(AchievementType::from_str_value(s).unwrap().as_str(), *s);
        }
        assert!(AchievementType::from_str_value("xp_reached").is_err());
    }

    #[test]
    fn xp_and_level_unlocks() {
        let metrics = AchievementMetrics {
            total_xp: Some(1200),
            level: Some(2),
            current_streak: None,
        };
        let ids = newly_unlocked(&catalog(), &HashSet::new(), &metrics);
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn owned_achievements_are_not_granted_twice() {
        let metrics = AchievementMetrics {
            total_xp: Some(1200),
            level: Some(2),
            current_streak: None,
        };
        let owned: HashSet<DbId> = [1, 3].into_iter().collect();
        assert!(newly_unlocked(&catalog(), &owned, &metrics).is_empty());
    }

    #[test]
    fn streak_unlock_only_when_streak_checked() {
        let xp_only = AchievementMetrics {
            total_xp: Some(0),
            level: Some(1),
            current_streak: None,
        };
        assert!(newly_unlocked(&catalog(), &HashSet::new(), &xp_only).is_empty());

        let streak = AchievementMetrics {
            current_streak: Some(7),
            ..Default::default()
        };
        assert_eq!(newly_unlocked(&catalog(), &HashSet::new(), &streak), vec![4]);
    }

    #[test]
    fn manual_never_auto_unlocks() {
        let metrics = AchievementMetrics {
            total_xp: Some(i64::MAX),
            level: Some(i32::MAX),
            current_streak: Some(i32::MAX),
        };
        let ids = newly_unlocked(&catalog(), &HashSet::new(), &metrics);
        assert!(!ids.contains(&5));
    }

    #[test]
    fn exact_target_unlocks() {
        let metrics = AchievementMetrics {
            total_xp: Some(100),
            ..Default::default()
        };
        assert_eq!(newly_unlocked(&catalog(), &HashSet::new(), &metrics), vec![1]);
    }

    #[test]
    fn categories() {
        assert!(validate_category("streak").is_ok());
        assert!(validate_category("social").is_err());
    }
}
