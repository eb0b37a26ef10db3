//! Review card storage and due-card queries

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Result};
use serde::Serialize;

use crate::domain::ReviewCard;

use super::{optional_timestamp_column, timestamp_column, timestamp_to_sql};

const CARD_COLUMNS: &str = "id, user_id, word_id, repetitions, interval_days, ease_factor, last_reviewed_at, next_review";

pub fn insert_card(conn: &Connection, card: &ReviewCard) -> Result<i64> {
    conn.execute(
        r#"
    INSERT INTO review_cards (user_id, word_id, repetitions, interval_days, ease_factor,
                              last_reviewed_at, next_review)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
    "#,
        params![
            card.user_id,
            card.word_id,
            card.repetitions,
            card.interval_days,
            card.ease_factor,
            card.last_reviewed_at.map(timestamp_to_sql),
            timestamp_to_sql(card.next_review),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Load a card owned by `user_id`
pub fn get_card(conn: &Connection, user_id: i64, card_id: i64) -> Result<Option<ReviewCard>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM review_cards WHERE id = ?1 AND user_id = ?2",
        CARD_COLUMNS
    ))?;

    let mut rows = stmt.query(params![card_id, user_id])?;
    if let Some(row) = rows.next()? {
        Ok(Some(row_to_card(row)?))
    } else {
        Ok(None)
    }
}

pub fn get_card_for_word(conn: &Connection, user_id: i64, word_id: i64) -> Result<Option<ReviewCard>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM review_cards WHERE word_id = ?1 AND user_id = ?2",
        CARD_COLUMNS
    ))?;

    let mut rows = stmt.query(params![word_id, user_id])?;
    if let Some(row) = rows.next()? {
        Ok(Some(row_to_card(row)?))
    } else {
        Ok(None)
    }
}

/// Persist the scheduling fields produced by the SM-2 scheduler
pub fn update_card_schedule(conn: &Connection, card: &ReviewCard) -> Result<()> {
    conn.execute(
        r#"
    UPDATE review_cards
    SET repetitions = ?1, interval_days = ?2, ease_factor = ?3,
        last_reviewed_at = ?4, next_review = ?5
    WHERE id = ?6
    "#,
        params![
            card.repetitions,
            card.interval_days,
            card.ease_factor,
            card.last_reviewed_at.map(timestamp_to_sql),
            timestamp_to_sql(card.next_review),
            card.id,
        ],
    )?;
    Ok(())
}

/// A due card joined with the word it tests
#[derive(Debug, Clone, Serialize)]
pub struct DueCard {
    pub card: ReviewCard,
    pub term: String,
    pub meaning: String,
}

/// Cards due at `now`, most overdue first
pub fn get_due_cards(
    conn: &Connection,
    user_id: i64,
    now: DateTime<Utc>,
    limit: usize,
) -> Result<Vec<DueCard>> {
    let mut stmt = conn.prepare(
        r#"
    SELECT c.id, c.user_id, c.word_id, c.repetitions, c.interval_days, c.ease_factor,
           c.last_reviewed_at, c.next_review, w.term, w.meaning
    FROM review_cards c
    JOIN words w ON w.id = c.word_id
    WHERE c.user_id = ?1 AND c.next_review <= ?2
    ORDER BY c.next_review ASC, c.id ASC
    LIMIT ?3
    "#,
    )?;

    let cards = stmt
        .query_map(params![user_id, timestamp_to_sql(now), limit as i64], |row| {
            Ok(DueCard {
                card: row_to_card(row)?,
                term: row.get(8)?,
                meaning: row.get(9)?,
            })
        })?
        .collect::<Result<Vec<_>>>()?;

    Ok(cards)
}

pub fn get_due_count(conn: &Connection, user_id: i64, now: DateTime<Utc>) -> Result<i64> {
    conn.query_row(
        "SELECT COUNT(*) FROM review_cards WHERE user_id = ?1 AND next_review <= ?2",
        params![user_id, timestamp_to_sql(now)],
        |row| row.get(0),
    )
}

/// Convert a database row to ReviewCard (columns in CARD_COLUMNS order)
fn row_to_card(row: &rusqlite::Row) -> Result<ReviewCard> {
    Ok(ReviewCard {
        id: row.get(0)?,
        user_id: row.get(1)?,
        word_id: row.get(2)?,
        repetitions: row.get(3)?,
        interval_days: row.get(4)?,
        ease_factor: row.get(5)?,
        last_reviewed_at: optional_timestamp_column(row, 6)?,
        next_review: timestamp_column(row, 7)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RecallGrade;
    use crate::srs::process_result;
    use crate::testing::TestEnv;
    use chrono::Duration;

    #[test]
    fn test_card_scoped_to_user() {
        let env = TestEnv::new().unwrap();
        let ana = env.user("ana");
        let ben = env.user("ben");
        let (_, card_id) = env.word(ana, "gato", "cat");

        assert!(get_card(&env.conn, ana, card_id).unwrap().is_some());
        assert!(get_card(&env.conn, ben, card_id).unwrap().is_none());
    }

    #[test]
    fn test_update_schedule_roundtrip() {
        let env = TestEnv::new().unwrap();
        let user = env.user("ana");
        let (_, card_id) = env.word(user, "gato", "cat");
        let now = Utc::now();

        let card = get_card(&env.conn, user, card_id).unwrap().unwrap();
        let updated = process_result(&card, RecallGrade::PERFECT, now);
        update_card_schedule(&env.conn, &updated).unwrap();

        let stored = get_card(&env.conn, user, card_id).unwrap().unwrap();
        assert_eq!(stored.repetitions, 1);
        assert_eq!(stored.interval_days, 1);
        assert!((stored.ease_factor - 2.6).abs() < 1e-9);
        // RFC 3339 keeps sub-second precision
        assert_eq!(stored.last_reviewed_at, Some(now));
        assert_eq!(stored.next_review, now + Duration::days(1));
    }

    #[test]
    fn test_due_cards_excludes_future() {
        let env = TestEnv::new().unwrap();
        let user = env.user("ana");
        let (_, due_id) = env.word(user, "gato", "cat");
        let (_, later_id) = env.word(user, "perro", "dog");
        let now = Utc::now() + Duration::seconds(1);

        let later = get_card(&env.conn, user, later_id).unwrap().unwrap();
        update_card_schedule(&env.conn, &process_result(&later, RecallGrade::GOOD, now)).unwrap();

        let due = get_due_cards(&env.conn, user, now, 10).unwrap();
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].card.id, due_id);
        assert_eq!(due[0].term, "gato");
        assert_eq!(due[0].meaning, "cat");
        assert_eq!(get_due_count(&env.conn, user, now).unwrap(), 1);
    }

    #[test]
    fn test_due_cards_limit() {
        let env = TestEnv::new().unwrap();
        let user = env.user("ana");
        for (term, meaning) in [("uno", "one"), ("dos", "two"), ("tres", "three")] {
            env.word(user, term, meaning);
        }
        let now = Utc::now() + Duration::seconds(1);

        assert_eq!(get_due_cards(&env.conn, user, now, 2).unwrap().len(), 2);
        assert_eq!(get_due_count(&env.conn, user, now).unwrap(), 3);
    }
}
