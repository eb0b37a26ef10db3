//! Learning progress orchestration.
//!
//! Every operation runs in one SQLite transaction: a failure at any step
//! rolls back the card update, review log, points and unlocks together.

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::Connection;
use serde::Serialize;

use super::ServiceError;
use crate::config::PointsConfig;
use crate::db;
use crate::domain::{
    Achievement, NewWord, QuizMode, RecallGrade, ReviewCard, ReviewLog, User, UserStats, Word,
};
use crate::gamification::{current_streak, evaluate_status, update_best, PointEvent, StreakUpdate};
use crate::srs::process_result;
use crate::validation::{validate_answer, AnswerResult, MAX_ANSWER_CHARS};

// ============================================================================
// Outcomes
// ============================================================================

/// Points, streak and unlocks produced by one learning action
#[derive(Debug, Clone, Serialize)]
pub struct ActivityReward {
    pub points_earned: i64,
    pub total_points: i64,
    pub streak: StreakUpdate,
    /// Achievements unlocked by this action (empty if none)
    pub unlocked: Vec<Achievement>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReviewOutcome {
    pub card: ReviewCard,
    pub grade: RecallGrade,
    #[serde(flatten)]
    pub reward: ActivityReward,
}

#[derive(Debug, Clone, Serialize)]
pub struct AddWordOutcome {
    pub word: Word,
    pub card_id: i64,
    #[serde(flatten)]
    pub reward: ActivityReward,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuizOutcome {
    pub result: AnswerResult,
    pub correct: bool,
    /// The stored meaning, shown after a wrong answer
    pub expected: String,
    pub review: ReviewOutcome,
}

/// Dashboard numbers for one user
#[derive(Debug, Clone, Serialize)]
pub struct ProgressSummary {
    pub user_id: i64,
    pub display_name: String,
    pub total_points: i64,
    pub current_streak: u32,
    pub best_streak: u32,
    pub total_words: usize,
    pub due_count: i64,
    pub total_reviews: i64,
    pub passing_reviews: i64,
    pub unlocked_achievements: usize,
    pub total_achievements: usize,
}

// ============================================================================
// Operations
// ============================================================================

/// Grade a card and apply every consequence of the review.
pub fn submit_review(
    conn: &Connection,
    points: &PointsConfig,
    user_id: i64,
    card_id: i64,
    grade: RecallGrade,
    mode: QuizMode,
    now: DateTime<Utc>,
) -> Result<ReviewOutcome, ServiceError> {
    let tx = conn.unchecked_transaction()?;

    require_user(&tx, user_id)?;
    let card = db::get_card(&tx, user_id, card_id)?.ok_or(ServiceError::CardNotFound(card_id))?;
    let outcome = apply_review(&tx, points, user_id, &card, grade, mode, now, &[])?;

    tx.commit()?;

    tracing::debug!(
        "User {} reviewed card {} with grade {}: next review in {} day(s)",
        user_id,
        card_id,
        grade.value(),
        outcome.card.interval_days
    );
    Ok(outcome)
}

/// Validate and store a new word with its review card.
pub fn add_word(
    conn: &Connection,
    points: &PointsConfig,
    user_id: i64,
    new_word: &NewWord,
    now: DateTime<Utc>,
) -> Result<AddWordOutcome, ServiceError> {
    let new_word = new_word.normalized().map_err(ServiceError::Validation)?;

    let tx = conn.unchecked_transaction()?;

    require_user(&tx, user_id)?;
    if db::term_exists(&tx, user_id, &new_word.term)? {
        return Err(ServiceError::DuplicateWord(new_word.term));
    }

    let word_id = db::insert_word(&tx, user_id, &new_word, now)?;
    let word = db::get_word(&tx, user_id, word_id)?.ok_or(ServiceError::WordNotFound(word_id))?;
    let card = db::get_card_for_word(&tx, user_id, word_id)?
        .ok_or(ServiceError::WordNotFound(word_id))?;
    let reward = record_activity(&tx, points, user_id, &[PointEvent::WordAdded], now.date_naive())?;

    tx.commit()?;

    tracing::info!("User {} added word '{}'", user_id, word.term);
    Ok(AddWordOutcome {
        word,
        card_id: card.id,
        reward,
    })
}

/// Check a typed or chosen answer and review the word's card with the
/// derived grade. A correct answer also earns the quiz bonus.
#[allow(clippy::too_many_arguments)]
pub fn record_quiz_answer(
    conn: &Connection,
    points: &PointsConfig,
    user_id: i64,
    word_id: i64,
    answer: &str,
    used_hint: bool,
    mode: QuizMode,
    now: DateTime<Utc>,
) -> Result<QuizOutcome, ServiceError> {
    if answer.chars().count() > MAX_ANSWER_CHARS {
        return Err(ServiceError::Validation(format!(
            "Answer is longer than {} characters",
            MAX_ANSWER_CHARS
        )));
    }

    let tx = conn.unchecked_transaction()?;

    require_user(&tx, user_id)?;
    let word = db::get_word(&tx, user_id, word_id)?.ok_or(ServiceError::WordNotFound(word_id))?;
    let card = db::get_card_for_word(&tx, user_id, word_id)?
        .ok_or(ServiceError::WordNotFound(word_id))?;

    let result = validate_answer(answer, &word.meaning);
    let grade = result.to_grade(used_hint);
    let bonus: &[PointEvent] = if result.is_correct() {
        &[PointEvent::QuizCorrect]
    } else {
        &[]
    };
    let review = apply_review(&tx, points, user_id, &card, grade, mode, now, bonus)?;

    tx.commit()?;

    tracing::debug!("User {} answered word {}: {:?}", user_id, word_id, result);
    Ok(QuizOutcome {
        result,
        correct: result.is_correct(),
        expected: word.meaning,
        review,
    })
}

/// Points, streaks and review counts for the dashboard.
pub fn user_progress(
    conn: &Connection,
    user_id: i64,
    now: DateTime<Utc>,
) -> Result<ProgressSummary, ServiceError> {
    let user = require_user(conn, user_id)?;

    let dates = db::get_learning_dates(conn, user_id)?;
    let current = current_streak(&dates, now.date_naive());
    // A stored best below today's streak is raised on the next activity
    let best = update_best(current, to_days(user.best_streak)).best;

    let (total_reviews, passing_reviews) = db::get_review_counts(conn, user_id)?;
    let achievements = db::list_achievements_for_user(conn, user_id)?;

    Ok(ProgressSummary {
        user_id,
        display_name: user.display_name,
        total_points: user.total_points,
        current_streak: current,
        best_streak: best,
        total_words: db::list_words(conn, user_id, None)?.len(),
        due_count: db::get_due_count(conn, user_id, now)?,
        total_reviews,
        passing_reviews,
        unlocked_achievements: achievements.iter().filter(|(_, s)| s.unlocked).count(),
        total_achievements: achievements.len(),
    })
}

// ============================================================================
// Shared steps
// ============================================================================

fn require_user(conn: &Connection, user_id: i64) -> Result<User, ServiceError> {
    db::get_user(conn, user_id)?.ok_or(ServiceError::UserNotFound(user_id))
}

#[allow(clippy::too_many_arguments)]
fn apply_review(
    conn: &Connection,
    points: &PointsConfig,
    user_id: i64,
    card: &ReviewCard,
    grade: RecallGrade,
    mode: QuizMode,
    now: DateTime<Utc>,
    bonus: &[PointEvent],
) -> Result<ReviewOutcome, ServiceError> {
    let updated = process_result(card, grade, now);
    db::update_card_schedule(conn, &updated)?;
    db::insert_review_log(conn, &ReviewLog::new(user_id, card.id, grade, mode, now))?;

    let mut events = vec![if grade.is_passing() {
        PointEvent::ReviewPassed
    } else {
        PointEvent::ReviewFailed
    }];
    events.extend_from_slice(bonus);

    let reward = record_activity(conn, points, user_id, &events, now.date_naive())?;
    Ok(ReviewOutcome {
        card: updated,
        grade,
        reward,
    })
}

/// Award points, mark the day as learned, refresh the best streak and
/// unlock any achievements the new stats reach.
fn record_activity(
    conn: &Connection,
    points: &PointsConfig,
    user_id: i64,
    events: &[PointEvent],
    today: NaiveDate,
) -> Result<ActivityReward, ServiceError> {
    let mut events = events.to_vec();
    if db::record_learning_day(conn, user_id, today)? {
        events.push(PointEvent::DailyFirstActivity);
    }

    let points_earned = crate::gamification::total_points(&events, points);
    let total_points = db::add_points(conn, user_id, points_earned)?;

    let user = require_user(conn, user_id)?;
    let dates = db::get_learning_dates(conn, user_id)?;
    let streak = update_best(current_streak(&dates, today), to_days(user.best_streak));
    if streak.new_best {
        db::set_best_streak(conn, user_id, i64::from(streak.best))?;
    }

    let stats = UserStats {
        total_points,
        best_streak: i64::from(streak.best),
    };

    let mut unlocked = Vec::new();
    for (achievement, status) in db::list_achievements_for_user(conn, user_id)? {
        let next = evaluate_status(status, &achievement.condition, &stats, today);
        if next.unlocked && !status.unlocked && db::unlock_achievement(conn, user_id, achievement.id, today)? {
            tracing::info!("User {} unlocked achievement '{}'", user_id, achievement.code);
            unlocked.push(achievement);
        }
    }

    Ok(ActivityReward {
        points_earned,
        total_points,
        streak,
        unlocked,
    })
}

fn to_days(stored: i64) -> u32 {
    u32::try_from(stored.max(0)).unwrap_or(u32::MAX)
}
