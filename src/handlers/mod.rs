pub mod progress;
pub mod reviews;
pub mod words;

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
  routing::{delete, get, post},
  Json, Router,
};

use crate::db::DbLockError;
use crate::domain::RecallGrade;
use crate::services::ServiceError;
use crate::state::AppState;

/// JSON error body: `{"error": message}`
#[derive(Debug)]
pub struct ApiError {
  pub status: StatusCode,
  pub message: String,
}

impl ApiError {
  pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
    Self {
      status,
      message: message.into(),
    }
  }

  pub fn bad_request(message: impl Into<String>) -> Self {
    Self::new(StatusCode::BAD_REQUEST, message)
  }

  pub fn not_found(message: impl Into<String>) -> Self {
    Self::new(StatusCode::NOT_FOUND, message)
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    (self.status, Json(serde_json::json!({ "error": self.message }))).into_response()
  }
}

impl From<ServiceError> for ApiError {
  fn from(err: ServiceError) -> Self {
    let status = match &err {
      ServiceError::Db(e) => {
        tracing::error!("Database error: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
      }
      ServiceError::UserNotFound(_) | ServiceError::CardNotFound(_) | ServiceError::WordNotFound(_) => {
        StatusCode::NOT_FOUND
      }
      ServiceError::InvalidGrade(_) | ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
      ServiceError::DuplicateWord(_) => StatusCode::CONFLICT,
    };
    Self::new(status, err.user_message())
  }
}

impl From<rusqlite::Error> for ApiError {
  fn from(err: rusqlite::Error) -> Self {
    ServiceError::Db(err).into()
  }
}

impl From<DbLockError> for ApiError {
  fn from(err: DbLockError) -> Self {
    Self::new(StatusCode::SERVICE_UNAVAILABLE, err.to_string())
  }
}

pub type ApiResult<T> = Result<Json<T>, ApiError>;

/// Grades arrive as plain integers; anything outside 0-5 is a 400.
pub(crate) fn parse_grade(raw: i64) -> Result<RecallGrade, ApiError> {
  u8::try_from(raw)
    .ok()
    .and_then(|g| RecallGrade::new(g).ok())
    .ok_or_else(|| ApiError::bad_request(format!("recall grade {} is outside 0-5", raw)))
}

/// All JSON API routes
pub fn router(state: AppState) -> Router {
  Router::new()
    .route("/api/users", post(progress::create_user))
    .route("/api/users/{user_id}/progress", get(progress::user_progress))
    .route("/api/users/{user_id}/achievements", get(progress::achievements))
    .route("/api/leaderboard", get(progress::leaderboard))
    .route("/api/users/{user_id}/due", get(reviews::due_cards))
    .route("/api/users/{user_id}/reviews", post(reviews::submit_review))
    .route(
      "/api/users/{user_id}/cards/{card_id}/reviews",
      get(reviews::card_reviews),
    )
    .route(
      "/api/users/{user_id}/words",
      get(words::list_words).post(words::add_word),
    )
    .route("/api/users/{user_id}/collections", get(words::list_collections))
    .route("/api/users/{user_id}/words/{word_id}", delete(words::delete_word))
    .route("/api/users/{user_id}/words/{word_id}/quiz", get(words::word_quiz))
    .route("/api/users/{user_id}/quiz/answer", post(words::quiz_answer))
    .with_state(state)
}
