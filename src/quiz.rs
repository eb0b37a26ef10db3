//! Multiple choice option building.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;

use crate::config;

/// A multiple choice question for one word
#[derive(Debug, Clone, Serialize)]
pub struct MultipleChoice {
  pub word_id: i64,
  pub term: String,
  pub choices: Vec<String>,
}

/// Build the options for a word: its meaning plus up to `DISTRACTOR_COUNT`
/// distinct distractors drawn from `pool`, shuffled together.
///
/// Pool entries equal to the correct meaning (ignoring case and surrounding
/// whitespace) are skipped, so the correct answer appears exactly once.
pub fn multiple_choice<R: Rng + ?Sized>(correct: &str, pool: &[String], rng: &mut R) -> Vec<String> {
  let needed = config::DISTRACTOR_COUNT;
  let key = |s: &str| s.trim().to_lowercase();
  let correct_key = key(correct);

  let mut distractors: Vec<String> = pool
    .iter()
    .map(|s| s.trim().to_string())
    .filter(|s| !s.is_empty() && key(s) != correct_key)
    .collect();

  distractors.sort_by_key(|s| key(s));
  distractors.dedup_by_key(|s| key(s));
  distractors.shuffle(rng);
  distractors.truncate(needed);

  let mut choices = Vec::with_capacity(distractors.len() + 1);
  choices.push(correct.to_string());
  choices.extend(distractors);
  choices.shuffle(rng);
  choices
}
