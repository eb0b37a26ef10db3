//! Review logging

use rusqlite::types::Type;
use rusqlite::{params, Connection, Result};

use crate::domain::{QuizMode, RecallGrade, ReviewLog};

use super::{timestamp_column, timestamp_to_sql};

pub fn insert_review_log(conn: &Connection, log: &ReviewLog) -> Result<i64> {
    conn.execute(
        r#"
    INSERT INTO review_logs (user_id, card_id, grade, quiz_mode, reviewed_at)
    VALUES (?1, ?2, ?3, ?4, ?5)
    "#,
        params![
            log.user_id,
            log.card_id,
            log.grade.value(),
            log.quiz_mode.as_str(),
            timestamp_to_sql(log.reviewed_at),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// (total reviews, passing reviews) for a user
pub fn get_review_counts(conn: &Connection, user_id: i64) -> Result<(i64, i64)> {
    conn.query_row(
        r#"
    SELECT COUNT(*), COALESCE(SUM(CASE WHEN grade >= 3 THEN 1 ELSE 0 END), 0)
    FROM review_logs WHERE user_id = ?1
    "#,
        params![user_id],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )
}

/// Most recent reviews for a card, newest first
pub fn get_card_reviews(conn: &Connection, card_id: i64, limit: usize) -> Result<Vec<ReviewLog>> {
    let mut stmt = conn.prepare(
        r#"
    SELECT id, user_id, card_id, grade, quiz_mode, reviewed_at
    FROM review_logs
    WHERE card_id = ?1
    ORDER BY reviewed_at DESC, id DESC
    LIMIT ?2
    "#,
    )?;

    let logs = stmt
        .query_map(params![card_id, limit as i64], |row| {
            let raw_grade: u8 = row.get(3)?;
            let grade = RecallGrade::new(raw_grade).map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(3, Type::Integer, Box::new(e))
            })?;
            let mode: String = row.get(4)?;
            let quiz_mode = QuizMode::from_str(&mode).ok_or_else(|| {
                rusqlite::Error::FromSqlConversionFailure(
                    4,
                    Type::Text,
                    format!("unknown quiz mode '{}'", mode).into(),
                )
            })?;
            Ok(ReviewLog {
                id: row.get(0)?,
                user_id: row.get(1)?,
                card_id: row.get(2)?,
                grade,
                quiz_mode,
                reviewed_at: timestamp_column(row, 5)?,
            })
        })?
        .collect::<Result<Vec<_>>>()?;

    Ok(logs)
}
