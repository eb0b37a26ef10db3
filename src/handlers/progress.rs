//! Users, progress dashboard, achievements and leaderboard.

use axum::{
  extract::{Path, Query, State},
  http::StatusCode,
  Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::config;
use crate::db;
use crate::domain::{Achievement, AchievementStatus, User};
use crate::gamification::{rank_leaderboard, LeaderboardEntry};
use crate::services::{self, ProgressSummary};
use crate::state::AppState;

use super::{ApiError, ApiResult};

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
  pub display_name: String,
}

/// POST /api/users
pub async fn create_user(
  State(state): State<AppState>,
  Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>), ApiError> {
  let name = req.display_name.trim();
  if name.is_empty() {
    return Err(ApiError::bad_request("Display name cannot be empty"));
  }

  let conn = db::try_lock(&state.db)?;
  let user_id = db::create_user(&conn, name, Utc::now())?;
  let user = db::get_user(&conn, user_id)?
    .ok_or_else(|| ApiError::not_found(format!("User {} not found", user_id)))?;

  tracing::info!("Created user {} ({})", user.id, user.display_name);
  Ok((StatusCode::CREATED, Json(user)))
}

/// GET /api/users/{user_id}/progress
pub async fn user_progress(
  State(state): State<AppState>,
  Path(user_id): Path<i64>,
) -> ApiResult<ProgressSummary> {
  let conn = db::try_lock(&state.db)?;
  Ok(Json(services::user_progress(&conn, user_id, Utc::now())?))
}

#[derive(Debug, Serialize)]
pub struct AchievementView {
  #[serde(flatten)]
  pub achievement: Achievement,
  #[serde(flatten)]
  pub status: AchievementStatus,
}

/// GET /api/users/{user_id}/achievements
pub async fn achievements(
  State(state): State<AppState>,
  Path(user_id): Path<i64>,
) -> ApiResult<Vec<AchievementView>> {
  let conn = db::try_lock(&state.db)?;
  if db::get_user(&conn, user_id)?.is_none() {
    return Err(ApiError::not_found(format!("User {} not found", user_id)));
  }

  let views = db::list_achievements_for_user(&conn, user_id)?
    .into_iter()
    .map(|(achievement, status)| AchievementView { achievement, status })
    .collect();
  Ok(Json(views))
}

#[derive(Debug, Deserialize)]
pub struct LeaderboardQuery {
  pub limit: Option<usize>,
}

/// GET /api/leaderboard
pub async fn leaderboard(
  State(state): State<AppState>,
  Query(query): Query<LeaderboardQuery>,
) -> ApiResult<Vec<LeaderboardEntry>> {
  let limit = query.limit.unwrap_or(config::LEADERBOARD_LIMIT).min(config::LEADERBOARD_LIMIT);
  let conn = db::try_lock(&state.db)?;
  let rows = db::get_leaderboard_rows(&conn, limit)?;
  Ok(Json(rank_leaderboard(rows)))
}

#[cfg(test)]
mod tests {
  use crate::handlers::router;
  use crate::testing::test_state;
  use axum::http::StatusCode;
  use axum_test::TestServer;
  use serde_json::{json, Value};

  fn server() -> TestServer {
    TestServer::new(router(test_state())).unwrap()
  }

  async fn create(server: &TestServer, name: &str) -> i64 {
    let response = server.post("/api/users").json(&json!({ "display_name": name })).await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()["id"].as_i64().unwrap()
  }

  #[tokio::test]
  async fn test_create_user_and_progress() {
    let server = server();
    let user_id = create(&server, "ana").await;

    let response = server.get(&format!("/api/users/{}/progress", user_id)).await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["display_name"], "ana");
    assert_eq!(body["total_points"], 0);
    assert_eq!(body["current_streak"], 0);
    assert_eq!(body["total_achievements"], 6);
  }

  #[tokio::test]
  async fn test_blank_name_rejected() {
    let server = server();
    let response = server.post("/api/users").json(&json!({ "display_name": "   " })).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(response.json::<Value>()["error"].is_string());
  }

  #[tokio::test]
  async fn test_unknown_user_is_404() {
    let server = server();
    server.get("/api/users/77/progress").await.assert_status(StatusCode::NOT_FOUND);
    server.get("/api/users/77/achievements").await.assert_status(StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn test_achievements_start_locked() {
    let server = server();
    let user_id = create(&server, "ana").await;

    let body: Value = server.get(&format!("/api/users/{}/achievements", user_id)).await.json();
    let list = body.as_array().unwrap();
    assert_eq!(list.len(), 6);
    assert!(list.iter().all(|a| a["unlocked"] == false && a["unlocked_at"].is_null()));
    assert!(list.iter().any(|a| a["code"] == "streak_7"));
  }

  #[tokio::test]
  async fn test_leaderboard_ranks_users() {
    let server = server();
    let ana = create(&server, "ana").await;
    create(&server, "ben").await;

    let word: Value = server
      .post(&format!("/api/users/{}/words", ana))
      .json(&json!({ "term": "gato", "meaning": "cat" }))
      .await
      .json();
    assert_eq!(word["points_earned"], 6);

    let body: Value = server.get("/api/leaderboard").await.json();
    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["display_name"], "ana");
    assert_eq!(entries[0]["rank"], 1);
    assert_eq!(entries[1]["rank"], 2);
    assert_eq!(entries[1]["total_points"], 0);
  }
}
