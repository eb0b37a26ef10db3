//! Application services.
//!
//! Services run the scheduling and gamification rules against the database
//! for one explicit user, so handlers only translate HTTP to calls.

pub mod progress;

pub use progress::{
    add_word, record_quiz_answer, submit_review, user_progress, ActivityReward, AddWordOutcome,
    ProgressSummary, QuizOutcome, ReviewOutcome,
};

use crate::domain::GradeError;

/// Errors from service operations.
#[derive(Debug)]
pub enum ServiceError {
    Db(rusqlite::Error),
    UserNotFound(i64),
    CardNotFound(i64),
    WordNotFound(i64),
    InvalidGrade(GradeError),
    Validation(String),
    DuplicateWord(String),
}

impl ServiceError {
    /// Message safe to show to API clients (no SQL details).
    pub fn user_message(&self) -> String {
        match self {
            ServiceError::Db(_) => "Database error".to_string(),
            other => other.to_string(),
        }
    }
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceError::Db(e) => write!(f, "Database error: {}", e),
            ServiceError::UserNotFound(id) => write!(f, "User {} not found", id),
            ServiceError::CardNotFound(id) => write!(f, "Card {} not found", id),
            ServiceError::WordNotFound(id) => write!(f, "Word {} not found", id),
            ServiceError::InvalidGrade(e) => write!(f, "{}", e),
            ServiceError::Validation(msg) => write!(f, "{}", msg),
            ServiceError::DuplicateWord(term) => {
                write!(f, "'{}' is already in your vocabulary", term)
            }
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ServiceError::Db(e) => Some(e),
            ServiceError::InvalidGrade(e) => Some(e),
            _ => None,
        }
    }
}

impl From<rusqlite::Error> for ServiceError {
    fn from(e: rusqlite::Error) -> Self {
        ServiceError::Db(e)
    }
}

impl From<GradeError> for ServiceError {
    fn from(e: GradeError) -> Self {
        ServiceError::InvalidGrade(e)
    }
}
