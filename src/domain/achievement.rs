use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Statistic an achievement is gated on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnlockKind {
  TotalPoints,
  LearningStreak,
}

impl UnlockKind {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::TotalPoints => "total_points",
      Self::LearningStreak => "learning_streak",
    }
  }

  pub fn from_str(s: &str) -> Option<Self> {
    match s {
      "total_points" => Some(Self::TotalPoints),
      "learning_streak" => Some(Self::LearningStreak),
      _ => None,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnlockCondition {
  pub kind: UnlockKind,
  pub target_value: i64,
}

impl UnlockCondition {
  pub fn total_points(target_value: i64) -> Self {
    Self {
      kind: UnlockKind::TotalPoints,
      target_value,
    }
  }

  pub fn learning_streak(target_value: i64) -> Self {
    Self {
      kind: UnlockKind::LearningStreak,
      target_value,
    }
  }
}

/// Catalogue entry. Static configuration, never mutated at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
  pub id: i64,
  /// Stable identifier (e.g. "streak_7")
  pub code: String,
  pub title: String,
  pub description: String,
  pub condition: UnlockCondition,
}

/// Per-user unlock state. Moves from locked to unlocked once and stays there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AchievementStatus {
  pub unlocked: bool,
  pub unlocked_at: Option<NaiveDate>,
}

impl AchievementStatus {
  pub fn locked() -> Self {
    Self::default()
  }

  pub fn unlocked_on(date: NaiveDate) -> Self {
    Self {
      unlocked: true,
      unlocked_at: Some(date),
    }
  }
}
