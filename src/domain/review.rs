use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lowest grade that counts as a successful recall.
pub const PASSING_GRADE: u8 = 3;

/// Highest grade on the 0-5 recall scale.
pub const MAX_GRADE: u8 = 5;

/// Self-assessed quality of recall, 0 (blackout) to 5 (perfect).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct RecallGrade(u8);

impl RecallGrade {
  pub const BLACKOUT: Self = Self(0);
  pub const WRONG: Self = Self(1);
  pub const HARD_FAIL: Self = Self(2);
  pub const HARD: Self = Self(3);
  pub const GOOD: Self = Self(4);
  pub const PERFECT: Self = Self(5);

  /// Grades outside 0-5 are rejected rather than clamped.
  pub fn new(value: u8) -> Result<Self, GradeError> {
    if value > MAX_GRADE {
      Err(GradeError(value))
    } else {
      Ok(Self(value))
    }
  }

  pub fn value(self) -> u8 {
    self.0
  }

  pub fn is_passing(self) -> bool {
    self.0 >= PASSING_GRADE
  }
}

impl TryFrom<u8> for RecallGrade {
  type Error = GradeError;

  fn try_from(value: u8) -> Result<Self, Self::Error> {
    Self::new(value)
  }
}

impl From<RecallGrade> for u8 {
  fn from(grade: RecallGrade) -> Self {
    grade.0
  }
}

/// A recall grade outside the 0-5 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GradeError(pub u8);

impl std::fmt::Display for GradeError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "recall grade {} is outside 0-{}", self.0, MAX_GRADE)
  }
}

impl std::error::Error for GradeError {}

/// Which mini-game produced a review
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum QuizMode {
  #[default]
  Flashcard,      // Flip card, self-grade
  MultipleChoice, // Pick the meaning from options
  Typing,         // Type the meaning
  Listening,      // Hear the term, pick the meaning
}

impl QuizMode {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Flashcard => "flashcard",
      Self::MultipleChoice => "multiple_choice",
      Self::Typing => "typing",
      Self::Listening => "listening",
    }
  }

  pub fn from_str(s: &str) -> Option<Self> {
    match s {
      "flashcard" => Some(Self::Flashcard),
      "multiple_choice" => Some(Self::MultipleChoice),
      "typing" => Some(Self::Typing),
      "listening" => Some(Self::Listening),
      _ => None,
    }
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewLog {
  pub id: i64,
  pub user_id: i64,
  pub card_id: i64,
  pub grade: RecallGrade,
  pub quiz_mode: QuizMode,
  pub reviewed_at: DateTime<Utc>,
}

impl ReviewLog {
  pub fn new(
    user_id: i64,
    card_id: i64,
    grade: RecallGrade,
    quiz_mode: QuizMode,
    reviewed_at: DateTime<Utc>,
  ) -> Self {
    Self {
      id: 0,
      user_id,
      card_id,
      grade,
      quiz_mode,
      reviewed_at,
    }
  }

  pub fn is_correct(&self) -> bool {
    self.grade.is_passing()
  }
}
