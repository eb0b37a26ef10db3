//! Consecutive-day learning streaks.

use std::collections::BTreeSet;

use chrono::{Days, NaiveDate};
use serde::Serialize;

/// Count consecutive learning days ending today.
///
/// Walks backwards from `today` one calendar day at a time and stops at the
/// first missing day. If `today` itself has no record the streak is 0.
/// Input order and duplicates do not matter; dates after `today` are ignored.
pub fn current_streak(dates: &[NaiveDate], today: NaiveDate) -> u32 {
  let days: BTreeSet<NaiveDate> = dates.iter().copied().filter(|d| *d <= today).collect();

  let mut streak = 0;
  let mut expected = Some(today);
  while let Some(day) = expected {
    if !days.contains(&day) {
      break;
    }
    streak += 1;
    expected = day.checked_sub_days(Days::new(1));
  }
  streak
}

/// Outcome of comparing the current streak against the stored best
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StreakUpdate {
  pub current: u32,
  pub best: u32,
  /// True when `best` was raised and needs persisting
  pub new_best: bool,
}

pub fn update_best(current: u32, previous_best: u32) -> StreakUpdate {
  if current > previous_best {
    StreakUpdate {
      current,
      best: current,
      new_best: true,
    }
  } else {
    StreakUpdate {
      current,
      best: previous_best,
      new_best: false,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 10).unwrap()
  }

  fn days_ago(n: u64) -> NaiveDate {
    today() - Days::new(n)
  }

  #[test]
  fn test_three_consecutive_days() {
    assert_eq!(current_streak(&[today(), days_ago(1), days_ago(2)], today()), 3);
  }

  #[test]
  fn test_gap_stops_streak() {
    assert_eq!(current_streak(&[today(), days_ago(2)], today()), 1);
  }

  #[test]
  fn test_empty_history() {
    assert_eq!(current_streak(&[], today()), 0);
  }

  #[test]
  fn test_today_missing_is_zero() {
    // Yesterday and the day before don't count until today is logged
    assert_eq!(current_streak(&[days_ago(1), days_ago(2)], today()), 0);
  }

  #[test]
  fn test_unsorted_and_duplicated_input() {
    let dates = [days_ago(2), today(), days_ago(1), today(), days_ago(1)];
    assert_eq!(current_streak(&dates, today()), 3);
  }

  #[test]
  fn test_future_dates_ignored() {
    let tomorrow = today() + Days::new(1);
    assert_eq!(current_streak(&[tomorrow, today(), days_ago(1)], today()), 2);
  }

  #[test]
  fn test_streak_across_month_boundary() {
    let first = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
    let dates = [
      first,
      NaiveDate::from_ymd_opt(2026, 2, 28).unwrap(),
      NaiveDate::from_ymd_opt(2026, 2, 27).unwrap(),
    ];
    assert_eq!(current_streak(&dates, first), 3);
  }

  #[test]
  fn test_long_streak_then_gap() {
    let mut dates: Vec<NaiveDate> = (0..30).map(days_ago).collect();
    dates.extend((32..40).map(days_ago));
    assert_eq!(current_streak(&dates, today()), 30);
  }

  #[test]
  fn test_update_best_raises() {
    let update = update_best(5, 3);
    assert_eq!(update, StreakUpdate { current: 5, best: 5, new_best: true });
  }

  #[test]
  fn test_update_best_keeps_previous() {
    assert_eq!(update_best(2, 7), StreakUpdate { current: 2, best: 7, new_best: false });
    // Tying the record is not a new best
    assert!(!update_best(7, 7).new_best);
  }
}
