use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

/// Longest accepted term, in characters
pub const MAX_TERM_CHARS: usize = 200;

/// Longest accepted meaning (all synonyms together), in characters
pub const MAX_MEANING_CHARS: usize = 500;

/// Longest accepted example sentence or collection name, in characters
pub const MAX_NOTE_CHARS: usize = 1000;

/// A word in a user's vocabulary collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
  pub id: i64,
  pub user_id: i64,
  pub term: String,
  pub meaning: String,
  pub example_sentence: Option<String>,
  /// Optional named collection ("Food", "Travel", ...); None for the default list
  pub collection: Option<String>,
  pub created_at: DateTime<Utc>,
}

/// Input for adding a word, before validation
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewWord {
  pub term: String,
  pub meaning: String,
  #[serde(default)]
  pub example_sentence: Option<String>,
  #[serde(default)]
  pub collection: Option<String>,
}

impl NewWord {
  pub fn new(term: &str, meaning: &str) -> Self {
    Self {
      term: term.to_string(),
      meaning: meaning.to_string(),
      ..Default::default()
    }
  }

  pub fn in_collection(mut self, collection: &str) -> Self {
    self.collection = Some(collection.to_string());
    self
  }

  /// Trim and NFC-normalize all fields, dropping blank optionals.
  ///
  /// Returns an error message if term or meaning is empty after trimming,
  /// or if any field is longer than its limit.
  pub fn normalized(&self) -> Result<NewWord, String> {
    let term = normalize_text(&self.term);
    let meaning = normalize_text(&self.meaning);

    if term.is_empty() {
      return Err("Term cannot be empty".to_string());
    }
    if meaning.is_empty() {
      return Err("Meaning cannot be empty".to_string());
    }

    let word = NewWord {
      term,
      meaning,
      example_sentence: non_blank(self.example_sentence.as_deref()),
      collection: non_blank(self.collection.as_deref()),
    };

    check_length("Term", &word.term, MAX_TERM_CHARS)?;
    check_length("Meaning", &word.meaning, MAX_MEANING_CHARS)?;
    if let Some(example) = &word.example_sentence {
      check_length("Example sentence", example, MAX_NOTE_CHARS)?;
    }
    if let Some(collection) = &word.collection {
      check_length("Collection", collection, MAX_NOTE_CHARS)?;
    }
    Ok(word)
  }
}

fn check_length(field: &str, value: &str, max: usize) -> Result<(), String> {
  if value.chars().count() > max {
    return Err(format!("{} is longer than {} characters", field, max));
  }
  Ok(())
}

fn normalize_text(s: &str) -> String {
  s.trim().nfc().collect()
}

fn non_blank(s: Option<&str>) -> Option<String> {
  s.map(normalize_text).filter(|s| !s.is_empty())
}
