use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row per user per day with at least one learning action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningDay {
  pub user_id: i64,
  pub date: NaiveDate,
  pub learned: bool,
}

/// Statistics the achievement evaluator reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserStats {
  pub total_points: i64,
  pub best_streak: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
  pub id: i64,
  pub display_name: String,
  pub total_points: i64,
  pub best_streak: i64,
}

impl User {
  pub fn stats(&self) -> UserStats {
    UserStats {
      total_points: self.total_points,
      best_streak: self.best_streak,
    }
  }
}
