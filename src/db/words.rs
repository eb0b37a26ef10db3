//! Vocabulary collection storage

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Result};

use crate::domain::{NewWord, ReviewCard, Word};

use super::cards::insert_card;
use super::{timestamp_column, timestamp_to_sql};

/// Insert a word and its review card (due immediately). Returns the word id.
pub fn insert_word(
    conn: &Connection,
    user_id: i64,
    word: &NewWord,
    now: DateTime<Utc>,
) -> Result<i64> {
    conn.execute(
        r#"
    INSERT INTO words (user_id, term, meaning, example_sentence, collection, created_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6)
    "#,
        params![
            user_id,
            word.term,
            word.meaning,
            word.example_sentence,
            word.collection,
            timestamp_to_sql(now),
        ],
    )?;
    let word_id = conn.last_insert_rowid();

    insert_card(conn, &ReviewCard::new(user_id, word_id, now))?;
    Ok(word_id)
}

pub fn term_exists(conn: &Connection, user_id: i64, term: &str) -> Result<bool> {
    conn.query_row(
        "SELECT COUNT(*) > 0 FROM words WHERE user_id = ?1 AND term = ?2",
        params![user_id, term],
        |row| row.get(0),
    )
}

pub fn get_word(conn: &Connection, user_id: i64, word_id: i64) -> Result<Option<Word>> {
    let mut stmt = conn.prepare(
        r#"
    SELECT id, user_id, term, meaning, example_sentence, collection, created_at
    FROM words WHERE id = ?1 AND user_id = ?2
    "#,
    )?;

    let mut rows = stmt.query(params![word_id, user_id])?;
    if let Some(row) = rows.next()? {
        Ok(Some(row_to_word(row)?))
    } else {
        Ok(None)
    }
}

/// List a user's words, optionally restricted to one collection
pub fn list_words(conn: &Connection, user_id: i64, collection: Option<&str>) -> Result<Vec<Word>> {
    let mut stmt = conn.prepare(
        r#"
    SELECT id, user_id, term, meaning, example_sentence, collection, created_at
    FROM words
    WHERE user_id = ?1 AND (?2 IS NULL OR collection = ?2)
    ORDER BY created_at DESC, id DESC
    "#,
    )?;

    let words = stmt
        .query_map(params![user_id, collection], row_to_word)?
        .collect::<Result<Vec<_>>>()?;

    Ok(words)
}

/// Distinct collection names for a user, alphabetical
pub fn list_collections(conn: &Connection, user_id: i64) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(
        r#"
    SELECT DISTINCT collection FROM words
    WHERE user_id = ?1 AND collection IS NOT NULL
    ORDER BY collection
    "#,
    )?;

    let collections = stmt
        .query_map(params![user_id], |row| row.get(0))?
        .collect::<Result<Vec<_>>>()?;

    Ok(collections)
}

/// Meanings of the user's other words, used as quiz distractors
pub fn get_other_meanings(conn: &Connection, user_id: i64, word_id: i64) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT DISTINCT meaning FROM words WHERE user_id = ?1 AND id != ?2",
    )?;

    let meanings = stmt
        .query_map(params![user_id, word_id], |row| row.get(0))?
        .collect::<Result<Vec<_>>>()?;

    Ok(meanings)
}

/// Delete a word; its card and review logs go with it. Returns false if no such word.
pub fn delete_word(conn: &Connection, user_id: i64, word_id: i64) -> Result<bool> {
    let deleted = conn.execute(
        "DELETE FROM words WHERE id = ?1 AND user_id = ?2",
        params![word_id, user_id],
    )?;
    Ok(deleted > 0)
}

fn row_to_word(row: &rusqlite::Row) -> Result<Word> {
    Ok(Word {
        id: row.get(0)?,
        user_id: row.get(1)?,
        term: row.get(2)?,
        meaning: row.get(3)?,
        example_sentence: row.get(4)?,
        collection: row.get(5)?,
        created_at: timestamp_column(row, 6)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::get_card_for_word;
    use crate::testing::TestEnv;

    #[test]
    fn test_insert_creates_due_card() {
        let env = TestEnv::new().unwrap();
        let user = env.user("ana");
        let now = Utc::now();

        let word_id = insert_word(&env.conn, user, &NewWord::new("gato", "cat"), now).unwrap();

        let card = get_card_for_word(&env.conn, user, word_id).unwrap().unwrap();
        assert_eq!(card.repetitions, 0);
        assert!(card.is_due(now));
    }

    #[test]
    fn test_get_word_scoped_to_user() {
        let env = TestEnv::new().unwrap();
        let ana = env.user("ana");
        let ben = env.user("ben");
        let (word_id, _) = env.word(ana, "gato", "cat");

        let word = get_word(&env.conn, ana, word_id).unwrap().unwrap();
        assert_eq!(word.term, "gato");
        assert!(get_word(&env.conn, ben, word_id).unwrap().is_none());
    }

    #[test]
    fn test_duplicate_term_rejected_per_user() {
        let env = TestEnv::new().unwrap();
        let ana = env.user("ana");
        let ben = env.user("ben");
        env.word(ana, "gato", "cat");

        assert!(term_exists(&env.conn, ana, "gato").unwrap());
        assert!(!term_exists(&env.conn, ben, "gato").unwrap());
        assert!(insert_word(&env.conn, ana, &NewWord::new("gato", "cat"), Utc::now()).is_err());
        // Another user may own the same term
        assert!(insert_word(&env.conn, ben, &NewWord::new("gato", "cat"), Utc::now()).is_ok());
    }

    #[test]
    fn test_list_words_by_collection() {
        let env = TestEnv::new().unwrap();
        let user = env.user("ana");
        let now = Utc::now();
        insert_word(&env.conn, user, &NewWord::new("gato", "cat").in_collection("Animals"), now).unwrap();
        insert_word(&env.conn, user, &NewWord::new("perro", "dog").in_collection("Animals"), now).unwrap();
        insert_word(&env.conn, user, &NewWord::new("pan", "bread").in_collection("Food"), now).unwrap();
        insert_word(&env.conn, user, &NewWord::new("hola", "hello"), now).unwrap();

        assert_eq!(list_words(&env.conn, user, None).unwrap().len(), 4);

        let animals = list_words(&env.conn, user, Some("Animals")).unwrap();
        let terms: Vec<&str> = animals.iter().map(|w| w.term.as_str()).collect();
        assert_eq!(terms, vec!["perro", "gato"]);

        assert_eq!(list_collections(&env.conn, user).unwrap(), vec!["Animals", "Food"]);
    }

    #[test]
    fn test_other_meanings_excludes_word() {
        let env = TestEnv::new().unwrap();
        let user = env.user("ana");
        let (gato, _) = env.word(user, "gato", "cat");
        env.word(user, "perro", "dog");
        env.word(user, "pez", "fish");

        let mut meanings = get_other_meanings(&env.conn, user, gato).unwrap();
        meanings.sort();
        assert_eq!(meanings, vec!["dog", "fish"]);
    }

    #[test]
    fn test_delete_word_cascades_card() {
        let env = TestEnv::new().unwrap();
        let user = env.user("ana");
        let (word_id, _) = env.word(user, "gato", "cat");

        assert!(delete_word(&env.conn, user, word_id).unwrap());
        assert!(get_card_for_word(&env.conn, user, word_id).unwrap().is_none());
        assert!(!delete_word(&env.conn, user, word_id).unwrap());
    }
}
