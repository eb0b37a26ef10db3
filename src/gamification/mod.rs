//! Streaks, achievements and points.
//!
//! Everything here is pure computation over caller-owned data; persistence
//! lives in `db` and orchestration in `services::progress`.

pub mod achievements;
pub mod points;
pub mod streak;

pub use achievements::{default_catalogue, evaluate, evaluate_status, AchievementDef};
pub use points::{rank_leaderboard, total_points, LeaderboardEntry, PointEvent};
pub use streak::{current_streak, update_best, StreakUpdate};
