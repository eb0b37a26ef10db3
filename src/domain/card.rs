use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::srs::DEFAULT_EASE_FACTOR;

/// Scheduling state of a single vocabulary word.
///
/// Only the SM-2 scheduler changes the scheduling fields; the database layer
/// stores and loads them as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewCard {
  pub id: i64,
  pub user_id: i64,
  pub word_id: i64,

  // SM-2 fields
  pub repetitions: i64,
  pub interval_days: i64,
  pub ease_factor: f64,
  pub last_reviewed_at: Option<DateTime<Utc>>,
  pub next_review: DateTime<Utc>,
}

impl ReviewCard {
  /// A fresh card, due immediately.
  pub fn new(user_id: i64, word_id: i64, now: DateTime<Utc>) -> Self {
    Self {
      id: 0,
      user_id,
      word_id,
      repetitions: 0,
      interval_days: 0,
      ease_factor: DEFAULT_EASE_FACTOR,
      last_reviewed_at: None,
      next_review: now,
    }
  }

  pub fn is_due(&self, now: DateTime<Utc>) -> bool {
    self.next_review <= now
  }

  /// True once the card has never been reviewed.
  pub fn is_new(&self) -> bool {
    self.last_reviewed_at.is_none()
  }
}
