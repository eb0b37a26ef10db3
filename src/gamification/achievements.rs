//! Achievement unlock evaluation.
//!
//! Unlocks are monotonic: once an achievement is unlocked it is never
//! re-evaluated, and its unlock date is the day of the first transition.

use chrono::NaiveDate;

use crate::domain::{AchievementStatus, UnlockCondition, UnlockKind, UserStats};

/// Whether an achievement is (now) unlocked for the given stats.
pub fn evaluate(unlocked: bool, condition: &UnlockCondition, stats: &UserStats) -> bool {
  if unlocked {
    return true;
  }

  match condition.kind {
    UnlockKind::TotalPoints => stats.total_points >= condition.target_value,
    UnlockKind::LearningStreak => stats.best_streak >= condition.target_value,
  }
}

/// Evaluate and stamp the unlock date on the first transition.
pub fn evaluate_status(
  status: AchievementStatus,
  condition: &UnlockCondition,
  stats: &UserStats,
  today: NaiveDate,
) -> AchievementStatus {
  if status.unlocked {
    return status;
  }

  if evaluate(false, condition, stats) {
    AchievementStatus::unlocked_on(today)
  } else {
    status
  }
}

/// Seed entry for the achievement catalogue
pub struct AchievementDef {
  pub code: &'static str,
  pub title: &'static str,
  pub description: &'static str,
  pub condition: UnlockCondition,
}

pub fn default_catalogue() -> Vec<AchievementDef> {
  vec![
    AchievementDef {
      code: "first_steps",
      title: "First Steps",
      description: "Earn your first 10 points",
      condition: UnlockCondition::total_points(10),
    },
    AchievementDef {
      code: "century",
      title: "Century",
      description: "Earn 100 points",
      condition: UnlockCondition::total_points(100),
    },
    AchievementDef {
      code: "scholar",
      title: "Scholar",
      description: "Earn 1000 points",
      condition: UnlockCondition::total_points(1000),
    },
    AchievementDef {
      code: "streak_3",
      title: "Warming Up",
      description: "Learn three days in a row",
      condition: UnlockCondition::learning_streak(3),
    },
    AchievementDef {
      code: "streak_7",
      title: "One Week Strong",
      description: "Learn seven days in a row",
      condition: UnlockCondition::learning_streak(7),
    },
    AchievementDef {
      code: "streak_30",
      title: "Habit Formed",
      description: "Learn thirty days in a row",
      condition: UnlockCondition::learning_streak(30),
    },
  ]
}
