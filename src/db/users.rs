//! Users, point totals and the leaderboard

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Result};

use crate::domain::User;

use super::timestamp_to_sql;

pub fn create_user(conn: &Connection, display_name: &str, now: DateTime<Utc>) -> Result<i64> {
    conn.execute(
        "INSERT INTO users (display_name, created_at) VALUES (?1, ?2)",
        params![display_name, timestamp_to_sql(now)],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_user(conn: &Connection, user_id: i64) -> Result<Option<User>> {
    let mut stmt = conn.prepare(
        "SELECT id, display_name, total_points, best_streak FROM users WHERE id = ?1",
    )?;

    let mut rows = stmt.query(params![user_id])?;
    if let Some(row) = rows.next()? {
        Ok(Some(User {
            id: row.get(0)?,
            display_name: row.get(1)?,
            total_points: row.get(2)?,
            best_streak: row.get(3)?,
        }))
    } else {
        Ok(None)
    }
}

/// Add (or subtract) points and return the new total
pub fn add_points(conn: &Connection, user_id: i64, delta: i64) -> Result<i64> {
    conn.execute(
        "UPDATE users SET total_points = total_points + ?1 WHERE id = ?2",
        params![delta, user_id],
    )?;
    conn.query_row(
        "SELECT total_points FROM users WHERE id = ?1",
        params![user_id],
        |row| row.get(0),
    )
}

/// Raise the stored best streak. Never lowers it.
pub fn set_best_streak(conn: &Connection, user_id: i64, best_streak: i64) -> Result<()> {
    conn.execute(
        "UPDATE users SET best_streak = ?1 WHERE id = ?2 AND best_streak < ?1",
        params![best_streak, user_id],
    )?;
    Ok(())
}

/// Top users as (user_id, display_name, total_points), highest first
pub fn get_leaderboard_rows(conn: &Connection, limit: usize) -> Result<Vec<(i64, String, i64)>> {
    let mut stmt = conn.prepare(
        r#"
    SELECT id, display_name, total_points
    FROM users
    ORDER BY total_points DESC, display_name ASC
    LIMIT ?1
    "#,
    )?;

    let rows = stmt
        .query_map(params![limit as i64], |row| {
            Ok((row.get(0)?, row.get(1)?, row.get(2)?))
        })?
        .collect::<Result<Vec<_>>>()?;

    Ok(rows)
}
