use rusqlite::{Connection, Result};

pub fn run_migrations(conn: &Connection) -> Result<()> {
  // Idempotent: every statement is IF NOT EXISTS
  conn.execute_batch(
    r#"
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS users (
      id INTEGER PRIMARY KEY AUTOINCREMENT,
      display_name TEXT NOT NULL,
      total_points INTEGER NOT NULL DEFAULT 0,
      best_streak INTEGER NOT NULL DEFAULT 0,
      created_at TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS words (
      id INTEGER PRIMARY KEY AUTOINCREMENT,
      user_id INTEGER NOT NULL,
      term TEXT NOT NULL,
      meaning TEXT NOT NULL,
      example_sentence TEXT,
      collection TEXT,
      created_at TEXT NOT NULL,
      UNIQUE (user_id, term),
      FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
    );

    CREATE TABLE IF NOT EXISTS review_cards (
      id INTEGER PRIMARY KEY AUTOINCREMENT,
      user_id INTEGER NOT NULL,
      word_id INTEGER NOT NULL UNIQUE,
      repetitions INTEGER NOT NULL DEFAULT 0,
      interval_days INTEGER NOT NULL DEFAULT 0,
      ease_factor REAL NOT NULL DEFAULT 2.5,
      last_reviewed_at TEXT,
      next_review TEXT NOT NULL,
      FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE,
      FOREIGN KEY (word_id) REFERENCES words(id) ON DELETE CASCADE
    );

    CREATE TABLE IF NOT EXISTS review_logs (
      id INTEGER PRIMARY KEY AUTOINCREMENT,
      user_id INTEGER NOT NULL,
      card_id INTEGER NOT NULL,
      grade INTEGER NOT NULL,
      quiz_mode TEXT NOT NULL DEFAULT 'flashcard',
      reviewed_at TEXT NOT NULL,
      FOREIGN KEY (card_id) REFERENCES review_cards(id) ON DELETE CASCADE
    );

    -- One row per user per day with learning activity
    CREATE TABLE IF NOT EXISTS learning_days (
      user_id INTEGER NOT NULL,
      day TEXT NOT NULL,
      learned INTEGER NOT NULL DEFAULT 1,
      PRIMARY KEY (user_id, day),
      FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
    );

    CREATE TABLE IF NOT EXISTS achievements (
      id INTEGER PRIMARY KEY AUTOINCREMENT,
      code TEXT NOT NULL UNIQUE,
      title TEXT NOT NULL,
      description TEXT NOT NULL,
      kind TEXT NOT NULL,
      target_value INTEGER NOT NULL
    );

    CREATE TABLE IF NOT EXISTS user_achievements (
      user_id INTEGER NOT NULL,
      achievement_id INTEGER NOT NULL,
      unlocked_at TEXT NOT NULL,
      PRIMARY KEY (user_id, achievement_id),
      FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE,
      FOREIGN KEY (achievement_id) REFERENCES achievements(id)
    );

    -- Indexes
    CREATE INDEX IF NOT EXISTS idx_words_user ON words(user_id);
    CREATE INDEX IF NOT EXISTS idx_words_collection ON words(user_id, collection);
    CREATE INDEX IF NOT EXISTS idx_review_cards_due ON review_cards(user_id, next_review);
    CREATE INDEX IF NOT EXISTS idx_review_logs_user ON review_logs(user_id);
    CREATE INDEX IF NOT EXISTS idx_review_logs_card_id ON review_logs(card_id);
    CREATE INDEX IF NOT EXISTS idx_users_points ON users(total_points DESC);
    "#,
  )?;

  Ok(())
}
