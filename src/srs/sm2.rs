use chrono::{DateTime, Duration, Utc};

use crate::domain::{RecallGrade, ReviewCard};

/// Ease factor never drops below this, however badly a card is recalled
pub const MIN_EASE_FACTOR: f64 = 1.3;

/// Ease factor assigned to new cards
pub const DEFAULT_EASE_FACTOR: f64 = 2.5;

/// Longest review interval (about 100 years). Keeps `next_review` well
/// inside the range chrono and the stored RFC 3339 format can represent.
pub const MAX_INTERVAL_DAYS: i64 = 36_500;

pub struct Sm2Result {
  pub ease_factor: f64,
  pub interval_days: i64,
  pub repetitions: i64,
  pub next_review: DateTime<Utc>,
}

pub fn calculate_sm2(
  grade: RecallGrade,
  current_ease_factor: f64,
  current_interval: i64,
  current_repetitions: i64,
  now: DateTime<Utc>,
) -> Sm2Result {
  let q = grade.value() as f64;

  // EF' = EF + (0.1 - (5 - q) * (0.08 + (5 - q) * 0.02))
  let ease_delta = 0.1 - (5.0 - q) * (0.08 + (5.0 - q) * 0.02);
  let new_ease_factor = (current_ease_factor + ease_delta).max(MIN_EASE_FACTOR);

  let (new_interval, new_repetitions) = if !grade.is_passing() {
    (1, 0)
  } else {
    let interval = match current_repetitions {
      0 => 1,
      1 => 6,
      _ => ((current_interval as f64) * new_ease_factor).round() as i64,
    };
    (interval.clamp(1, MAX_INTERVAL_DAYS), current_repetitions + 1)
  };

  Sm2Result {
    ease_factor: new_ease_factor,
    interval_days: new_interval,
    repetitions: new_repetitions,
    // Only fails for `now` near chrono's upper bound; the card is then due again
    next_review: now
      .checked_add_signed(Duration::days(new_interval))
      .unwrap_or(now),
  }
}

/// Apply one review to a card and return its new scheduling state.
pub fn process_result(card: &ReviewCard, grade: RecallGrade, now: DateTime<Utc>) -> ReviewCard {
  let result = calculate_sm2(
    grade,
    card.ease_factor,
    card.interval_days,
    card.repetitions,
    now,
  );

  ReviewCard {
    repetitions: result.repetitions,
    interval_days: result.interval_days,
    ease_factor: result.ease_factor,
    last_reviewed_at: Some(now),
    next_review: result.next_review,
    ..card.clone()
  }
}
