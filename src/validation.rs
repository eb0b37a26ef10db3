//! Answer checking for typed and spoken quiz modes.
//!
//! The expected meaning may list synonyms and notes:
//! - `cat, kitty` or `cat; kitty` - Synonyms (any is correct)
//! - `to eat` - Leading "to" / articles are optional in answers
//! - `bank (money)` - Parenthesised notes are ignored

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use unicode_normalization::UnicodeNormalization;

use crate::domain::RecallGrade;

// ============================================================================
// Normalization tables
// ============================================================================

/// British/American spelling equivalences (normalized to American)
static SPELLING_EQUIVALENCES: &[(&str, &str)] = &[
  ("colour", "color"),
  ("favour", "favor"),
  ("neighbour", "neighbor"),
  ("centre", "center"),
  ("theatre", "theater"),
  ("metre", "meter"),
  ("litre", "liter"),
  ("grey", "gray"),
  ("travelling", "traveling"),
  ("favourite", "favorite"),
  ("organise", "organize"),
  ("realise", "realize"),
  ("jewellery", "jewelry"),
];

/// Contraction expansions (normalized to expanded form)
static CONTRACTIONS: &[(&str, &str)] = &[
  ("i'm", "i am"),
  ("it's", "it is"),
  ("you're", "you are"),
  ("we're", "we are"),
  ("they're", "they are"),
  ("isn't", "is not"),
  ("aren't", "are not"),
  ("don't", "do not"),
  ("doesn't", "does not"),
  ("didn't", "did not"),
  ("can't", "cannot"),
  ("won't", "will not"),
  ("let's", "let us"),
];

/// Longest answer that is checked at all, in characters
pub const MAX_ANSWER_CHARS: usize = 500;

/// Words that may be dropped from the start of an answer
static OPTIONAL_PREFIXES: &[&str] = &["to", "a", "an", "the"];

// ============================================================================
// Result types
// ============================================================================

/// Result of answer validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerResult {
  /// Matches one of the accepted meanings
  Correct,
  /// Close enough (typo tolerance)
  CloseEnough,
  /// Wrong answer
  Incorrect,
}

impl AnswerResult {
  pub fn is_correct(&self) -> bool {
    !matches!(self, Self::Incorrect)
  }

  /// Convert to a recall grade for the scheduler.
  /// Typos and hints each cost one grade step.
  pub fn to_grade(&self, used_hint: bool) -> RecallGrade {
    match (self, used_hint) {
      (Self::Correct, false) => RecallGrade::PERFECT,
      (Self::Correct, true) => RecallGrade::GOOD,
      (Self::CloseEnough, false) => RecallGrade::GOOD,
      (Self::CloseEnough, true) => RecallGrade::HARD,
      (Self::Incorrect, _) => RecallGrade::WRONG,
    }
  }
}

// ============================================================================
// Normalization
// ============================================================================

/// Normalize an answer for comparison
/// - NFC-composes and lowercases
/// - Expands contractions
/// - Normalizes British/American spellings
/// - Removes punctuation and collapses whitespace
pub fn normalize_answer(input: &str) -> String {
  let composed: String = input.nfc().collect::<String>().to_lowercase();

  let kept: String = composed
    .chars()
    .filter(|c| c.is_alphanumeric() || c.is_whitespace() || *c == '\'')
    .collect();

  kept
    .split_whitespace()
    .map(|word| {
      let word = lookup(CONTRACTIONS, word).unwrap_or(word);
      lookup(SPELLING_EQUIVALENCES, word).unwrap_or(word)
    })
    .collect::<Vec<_>>()
    .join(" ")
    .replace('\'', "")
}

fn lookup(table: &'static [(&'static str, &'static str)], word: &str) -> Option<&'static str> {
  table.iter().find(|(from, _)| *from == word).map(|(_, to)| *to)
}

/// Drop one optional leading word ("to eat" -> "eat", "the house" -> "house")
fn strip_optional_prefix(normalized: &str) -> &str {
  for prefix in OPTIONAL_PREFIXES {
    if let Some(rest) = normalized.strip_prefix(prefix).and_then(|r| r.strip_prefix(' ')) {
      if !rest.is_empty() {
        return rest;
      }
    }
  }
  normalized
}

/// Remove parenthesised notes: "bank (money)" -> "bank "
fn strip_notes(answer: &str) -> String {
  let mut depth = 0usize;
  answer
    .chars()
    .filter(|c| match c {
      '(' => {
        depth += 1;
        false
      }
      ')' => {
        depth = depth.saturating_sub(1);
        false
      }
      _ => depth == 0,
    })
    .collect()
}

/// All accepted forms of an expected meaning, normalized with optional prefixes removed
fn accepted_answers(expected: &str) -> Vec<String> {
  let mut seen = HashSet::new();
  strip_notes(expected)
    .split([',', ';', '/'])
    .map(normalize_answer)
    .map(|s| strip_optional_prefix(&s).to_string())
    .filter(|s| !s.is_empty())
    .filter(|s| seen.insert(s.clone()))
    .collect()
}

/// Calculate simple Levenshtein distance between two strings
fn levenshtein_distance(a: &str, b: &str) -> usize {
  let a_chars: Vec<char> = a.chars().collect();
  let b_chars: Vec<char> = b.chars().collect();

  if a_chars.is_empty() {
    return b_chars.len();
  }
  if b_chars.is_empty() {
    return a_chars.len();
  }

  // Single rolling row
  let mut row: Vec<usize> = (0..=b_chars.len()).collect();
  for (i, a_char) in a_chars.iter().enumerate() {
    let mut diagonal = row[0];
    row[0] = i + 1;
    for (j, b_char) in b_chars.iter().enumerate() {
      let cost = if a_char == b_char { 0 } else { 1 };
      let next = (row[j + 1] + 1).min(row[j] + 1).min(diagonal + cost);
      diagonal = row[j + 1];
      row[j + 1] = next;
    }
  }
  row[b_chars.len()]
}

/// Typo tolerance based on answer length
fn max_typos(answer: &str) -> usize {
  match answer.chars().count() {
    0..=2 => 0, // very short answers must be exact
    3..=4 => 1,
    _ => 2,
  }
}

// ============================================================================
// Validation
// ============================================================================

/// Validate a user's answer against the expected meaning
pub fn validate_answer(user_input: &str, expected: &str) -> AnswerResult {
  let normalized = normalize_answer(&strip_notes(user_input));
  let input = strip_optional_prefix(&normalized);
  if input.is_empty() {
    return AnswerResult::Incorrect;
  }

  let accepted = accepted_answers(expected);

  if accepted.iter().any(|a| a == input) {
    return AnswerResult::Correct;
  }

  // "kitty cat" for "cat, kitty": every typed word is an accepted synonym
  if accepted.len() > 1 {
    let words: Vec<&str> = input.split_whitespace().collect();
    if words.len() > 1 && words.iter().all(|w| accepted.iter().any(|a| a == w)) {
      return AnswerResult::Correct;
    }
  }

  let input_len = input.chars().count();
  for answer in &accepted {
    let allowed = max_typos(answer);
    // Edit distance is at least the length difference
    if input_len.abs_diff(answer.chars().count()) > allowed {
      continue;
    }
    let distance = levenshtein_distance(input, answer);
    if distance > 0 && distance <= allowed {
      return AnswerResult::CloseEnough;
    }
  }

  AnswerResult::Incorrect
}
