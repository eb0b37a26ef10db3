//! Point awards and leaderboard ranking.

use serde::Serialize;

use crate::config::PointsConfig;

/// Learning actions that earn points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointEvent {
  ReviewPassed,
  ReviewFailed,
  QuizCorrect,
  WordAdded,
  /// First learning action of the day
  DailyFirstActivity,
}

impl PointEvent {
  pub fn points(&self, config: &PointsConfig) -> i64 {
    match self {
      Self::ReviewPassed => config.review_passed,
      Self::ReviewFailed => config.review_failed,
      Self::QuizCorrect => config.quiz_correct,
      Self::WordAdded => config.word_added,
      Self::DailyFirstActivity => config.daily_first_activity,
    }
  }
}

/// Sum of points for a batch of events
pub fn total_points(events: &[PointEvent], config: &PointsConfig) -> i64 {
  events.iter().map(|e| e.points(config)).sum()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderboardEntry {
  pub rank: u32,
  pub user_id: i64,
  pub display_name: String,
  pub total_points: i64,
}

/// Sort by points (highest first, then by name) and assign competition
/// ranks: equal points share a rank and the next rank skips ("1, 2, 2, 4").
pub fn rank_leaderboard(mut rows: Vec<(i64, String, i64)>) -> Vec<LeaderboardEntry> {
  rows.sort_by(|a, b| b.2.cmp(&a.2).then_with(|| a.1.cmp(&b.1)));

  let mut entries: Vec<LeaderboardEntry> = Vec::with_capacity(rows.len());
  for (position, (user_id, display_name, total_points)) in rows.into_iter().enumerate() {
    let rank = match entries.last() {
      Some(prev) if prev.total_points == total_points => prev.rank,
      _ => position as u32 + 1,
    };
    entries.push(LeaderboardEntry {
      rank,
      user_id,
      display_name,
      total_points,
    });
  }
  entries
}
