//! Due cards and review submission.

use axum::{
  extract::{Path, Query, State},
  Json,
};
use chrono::Utc;
use serde::Deserialize;

use crate::config;
use crate::db::{self, DueCard};
use crate::domain::{QuizMode, ReviewLog};
use crate::services::{self, ReviewOutcome};
use crate::state::AppState;

use super::{parse_grade, ApiError, ApiResult};

#[derive(Debug, Deserialize)]
pub struct LimitQuery {
  pub limit: Option<usize>,
}

/// GET /api/users/{user_id}/due
pub async fn due_cards(
  State(state): State<AppState>,
  Path(user_id): Path<i64>,
  Query(query): Query<LimitQuery>,
) -> ApiResult<Vec<DueCard>> {
  let limit = query.limit.unwrap_or(config::DEFAULT_DUE_LIMIT);
  let conn = db::try_lock(&state.db)?;
  if db::get_user(&conn, user_id)?.is_none() {
    return Err(ApiError::not_found(format!("User {} not found", user_id)));
  }
  Ok(Json(db::get_due_cards(&conn, user_id, Utc::now(), limit)?))
}

#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
  pub card_id: i64,
  /// Recall quality, 0-5
  pub grade: i64,
  #[serde(default)]
  pub mode: QuizMode,
}

/// POST /api/users/{user_id}/reviews
pub async fn submit_review(
  State(state): State<AppState>,
  Path(user_id): Path<i64>,
  Json(req): Json<ReviewRequest>,
) -> ApiResult<ReviewOutcome> {
  let grade = parse_grade(req.grade)?;
  let conn = db::try_lock(&state.db)?;
  let outcome = services::submit_review(
    &conn,
    state.points(),
    user_id,
    req.card_id,
    grade,
    req.mode,
    Utc::now(),
  )?;
  Ok(Json(outcome))
}

/// GET /api/users/{user_id}/cards/{card_id}/reviews
pub async fn card_reviews(
  State(state): State<AppState>,
  Path((user_id, card_id)): Path<(i64, i64)>,
  Query(query): Query<LimitQuery>,
) -> ApiResult<Vec<ReviewLog>> {
  let limit = query.limit.unwrap_or(config::DEFAULT_DUE_LIMIT);
  let conn = db::try_lock(&state.db)?;
  if db::get_card(&conn, user_id, card_id)?.is_none() {
    return Err(ApiError::not_found(format!("Card {} not found", card_id)));
  }
  Ok(Json(db::get_card_reviews(&conn, card_id, limit)?))
}

#[cfg(test)]
mod tests {
  use crate::handlers::router;
  use crate::testing::test_state;
  use axum::http::StatusCode;
  use axum_test::TestServer;
  use serde_json::{json, Value};

  /// Server with one user owning one word; returns (server, user_id, card_id)
  async fn setup() -> (TestServer, i64, i64) {
    let server = TestServer::new(router(test_state())).unwrap();
    let user: Value = server.post("/api/users").json(&json!({ "display_name": "ana" })).await.json();
    let user_id = user["id"].as_i64().unwrap();

    let word: Value = server
      .post(&format!("/api/users/{}/words", user_id))
      .json(&json!({ "term": "gato", "meaning": "cat" }))
      .await
      .json();
    let card_id = word["card_id"].as_i64().unwrap();
    (server, user_id, card_id)
  }

  #[tokio::test]
  async fn test_new_word_is_due() {
    let (server, user_id, card_id) = setup().await;

    let response = server.get(&format!("/api/users/{}/due", user_id)).await;
    response.assert_status_ok();
    let due: Value = response.json();
    assert_eq!(due.as_array().unwrap().len(), 1);
    assert_eq!(due[0]["card"]["id"], card_id);
    assert_eq!(due[0]["term"], "gato");
  }

  #[tokio::test]
  async fn test_submit_review_schedules_card() {
    let (server, user_id, card_id) = setup().await;

    let response = server
      .post(&format!("/api/users/{}/reviews", user_id))
      .json(&json!({ "card_id": card_id, "grade": 4 }))
      .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["grade"], 4);
    assert_eq!(body["card"]["repetitions"], 1);
    assert_eq!(body["card"]["interval_days"], 1);
    assert_eq!(body["points_earned"], 10);
    assert_eq!(body["streak"]["current"], 1);

    // No longer due
    let due: Value = server.get(&format!("/api/users/{}/due", user_id)).await.json();
    assert!(due.as_array().unwrap().is_empty());

    let history: Value = server
      .get(&format!("/api/users/{}/cards/{}/reviews", user_id, card_id))
      .await
      .json();
    assert_eq!(history.as_array().unwrap().len(), 1);
    assert_eq!(history[0]["quiz_mode"], "flashcard");
  }

  #[tokio::test]
  async fn test_many_perfect_reviews_keep_api_working() {
    let (server, user_id, card_id) = setup().await;

    for _ in 0..40 {
      server
        .post(&format!("/api/users/{}/reviews", user_id))
        .json(&json!({ "card_id": card_id, "grade": 5 }))
        .await
        .assert_status_ok();
    }

    let response = server.get(&format!("/api/users/{}/due", user_id)).await;
    response.assert_status_ok();
    assert!(response.json::<Value>().as_array().unwrap().is_empty());

    let history = server
      .get(&format!("/api/users/{}/cards/{}/reviews", user_id, card_id))
      .await;
    history.assert_status_ok();
    assert_eq!(history.json::<Value>().as_array().unwrap().len(), 40);
  }

  #[tokio::test]
  async fn test_invalid_grade_is_400() {
    let (server, user_id, card_id) = setup().await;

    for grade in [6, -1, 99] {
      let response = server
        .post(&format!("/api/users/{}/reviews", user_id))
        .json(&json!({ "card_id": card_id, "grade": grade }))
        .await;
      response.assert_status(StatusCode::BAD_REQUEST);
    }

    // Nothing was recorded
    let progress: Value = server.get(&format!("/api/users/{}/progress", user_id)).await.json();
    assert_eq!(progress["total_reviews"], 0);
  }

  #[tokio::test]
  async fn test_unknown_card_is_404() {
    let (server, user_id, _) = setup().await;

    server
      .post(&format!("/api/users/{}/reviews", user_id))
      .json(&json!({ "card_id": 12345, "grade": 3 }))
      .await
      .assert_status(StatusCode::NOT_FOUND);
    server
      .get(&format!("/api/users/{}/cards/12345/reviews", user_id))
      .await
      .assert_status(StatusCode::NOT_FOUND);
  }
}
