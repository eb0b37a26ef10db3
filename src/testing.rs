//! Test utilities for database setup.
//!
//! Provides helpers that reuse the authoritative schema initialization,
//! eliminating schema duplication in test code.

use chrono::Utc;
use rusqlite::Connection;
use std::path::PathBuf;
use tempfile::TempDir;

use crate::config::{self, Config, PointsConfig};
use crate::db;
use crate::domain::NewWord;
use crate::gamification::default_catalogue;
use crate::state::AppState;

/// Test environment with an on-disk notebook database.
///
/// The database lives in a temporary directory that is removed on drop.
pub struct TestEnv {
    /// Temporary directory (kept alive for database file persistence)
    pub temp: TempDir,
    /// Connection with the full schema and seeded achievement catalogue
    pub conn: Connection,
}

impl TestEnv {
    pub fn new() -> rusqlite::Result<Self> {
        let temp =
            TempDir::new().map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        let conn = Connection::open(temp.path().join("notebook.db"))?;
        db::run_migrations(&conn)?;
        db::seed_achievements(&conn, &default_catalogue())?;

        Ok(Self { temp, conn })
    }

    /// Create a user and return their id
    pub fn user(&self, name: &str) -> i64 {
        db::create_user(&self.conn, name, Utc::now()).expect("create test user")
    }

    /// Add a word (with its card) and return (word_id, card_id)
    pub fn word(&self, user_id: i64, term: &str, meaning: &str) -> (i64, i64) {
        let word = NewWord::new(term, meaning);
        let word_id = db::insert_word(&self.conn, user_id, &word, Utc::now()).expect("insert test word");
        let card = db::get_card_for_word(&self.conn, user_id, word_id)
            .expect("load test card")
            .expect("card created with word");
        (word_id, card.id)
    }
}

/// Application state backed by a fresh in-memory database
pub fn test_state() -> AppState {
    let conn = Connection::open_in_memory().expect("open in-memory database");
    db::run_migrations(&conn).expect("run migrations");
    db::seed_achievements(&conn, &default_catalogue()).expect("seed achievements");

    let config = Config {
        database_path: PathBuf::from(":memory:"),
        server_port: config::DEFAULT_SERVER_PORT,
        points: PointsConfig::default(),
    };
    AppState::new(db::open_pool(conn), config)
}
