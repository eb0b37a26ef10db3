//! Vocabulary collection and word quizzes.

use axum::{
  extract::{Path, Query, State},
  http::StatusCode,
  Json,
};
use chrono::Utc;
use serde::Deserialize;

use crate::db::{self, LogOnError};
use crate::domain::{NewWord, QuizMode, Word};
use crate::quiz::{multiple_choice, MultipleChoice};
use crate::services::{self, AddWordOutcome, QuizOutcome};
use crate::state::AppState;

use super::{ApiError, ApiResult};

#[derive(Debug, Deserialize)]
pub struct ListWordsQuery {
  pub collection: Option<String>,
}

/// GET /api/users/{user_id}/words
pub async fn list_words(
  State(state): State<AppState>,
  Path(user_id): Path<i64>,
  Query(query): Query<ListWordsQuery>,
) -> ApiResult<Vec<Word>> {
  let conn = db::try_lock(&state.db)?;
  if db::get_user(&conn, user_id)?.is_none() {
    return Err(ApiError::not_found(format!("User {} not found", user_id)));
  }
  Ok(Json(db::list_words(&conn, user_id, query.collection.as_deref())?))
}

/// GET /api/users/{user_id}/collections
pub async fn list_collections(
  State(state): State<AppState>,
  Path(user_id): Path<i64>,
) -> ApiResult<Vec<String>> {
  let conn = db::try_lock(&state.db)?;
  if db::get_user(&conn, user_id)?.is_none() {
    return Err(ApiError::not_found(format!("User {} not found", user_id)));
  }
  Ok(Json(db::list_collections(&conn, user_id)?))
}

/// POST /api/users/{user_id}/words
pub async fn add_word(
  State(state): State<AppState>,
  Path(user_id): Path<i64>,
  Json(word): Json<NewWord>,
) -> Result<(StatusCode, Json<AddWordOutcome>), ApiError> {
  let conn = db::try_lock(&state.db)?;
  let outcome = services::add_word(&conn, state.points(), user_id, &word, Utc::now())?;
  Ok((StatusCode::CREATED, Json(outcome)))
}

/// DELETE /api/users/{user_id}/words/{word_id}
pub async fn delete_word(
  State(state): State<AppState>,
  Path((user_id, word_id)): Path<(i64, i64)>,
) -> Result<StatusCode, ApiError> {
  let conn = db::try_lock(&state.db)?;
  if !db::delete_word(&conn, user_id, word_id)? {
    return Err(ApiError::not_found(format!("Word {} not found", word_id)));
  }
  tracing::info!("User {} deleted word {}", user_id, word_id);
  Ok(StatusCode::NO_CONTENT)
}

/// GET /api/users/{user_id}/words/{word_id}/quiz
pub async fn word_quiz(
  State(state): State<AppState>,
  Path((user_id, word_id)): Path<(i64, i64)>,
) -> ApiResult<MultipleChoice> {
  let conn = db::try_lock(&state.db)?;
  let word = db::get_word(&conn, user_id, word_id)?
    .ok_or_else(|| ApiError::not_found(format!("Word {} not found", word_id)))?;
  // Without distractors the quiz still shows the correct meaning
  let pool = db::get_other_meanings(&conn, user_id, word_id)
    .log_warn_default("Failed to load quiz distractors");

  let choices = multiple_choice(&word.meaning, &pool, &mut rand::rng());
  Ok(Json(MultipleChoice {
    word_id,
    term: word.term,
    choices,
  }))
}

#[derive(Debug, Deserialize)]
pub struct QuizAnswerRequest {
  pub word_id: i64,
  pub answer: String,
  #[serde(default)]
  pub used_hint: bool,
  #[serde(default = "default_quiz_mode")]
  pub mode: QuizMode,
}

fn default_quiz_mode() -> QuizMode {
  QuizMode::Typing
}

/// POST /api/users/{user_id}/quiz/answer
pub async fn quiz_answer(
  State(state): State<AppState>,
  Path(user_id): Path<i64>,
  Json(req): Json<QuizAnswerRequest>,
) -> ApiResult<QuizOutcome> {
  let conn = db::try_lock(&state.db)?;
  let outcome = services::record_quiz_answer(
    &conn,
    state.points(),
    user_id,
    req.word_id,
    &req.answer,
    req.used_hint,
    req.mode,
    Utc::now(),
  )?;
  Ok(Json(outcome))
}
