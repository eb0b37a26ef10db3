//! Daily learning activity records (streak source data)

use chrono::NaiveDate;
use rusqlite::{params, Connection, Result};

use crate::domain::LearningDay;

use super::{day_column, day_to_sql};

/// Record that the user learned on `day`. Returns true if this is the
/// first activity of that day.
pub fn record_learning_day(conn: &Connection, user_id: i64, day: NaiveDate) -> Result<bool> {
    let inserted = conn.execute(
        "INSERT OR IGNORE INTO learning_days (user_id, day, learned) VALUES (?1, ?2, 1)",
        params![user_id, day_to_sql(day)],
    )?;
    Ok(inserted > 0)
}

/// All learning days for a user, most recent first
pub fn get_learning_days(conn: &Connection, user_id: i64) -> Result<Vec<LearningDay>> {
    let mut stmt = conn.prepare(
        r#"
    SELECT user_id, day, learned
    FROM learning_days
    WHERE user_id = ?1 AND learned = 1
    ORDER BY day DESC
    "#,
    )?;

    let days = stmt
        .query_map(params![user_id], |row| {
            Ok(LearningDay {
                user_id: row.get(0)?,
                date: day_column(row, 1)?,
                learned: row.get(2)?,
            })
        })?
        .collect::<Result<Vec<_>>>()?;

    Ok(days)
}

/// Learning dates for a user, most recent first
pub fn get_learning_dates(conn: &Connection, user_id: i64) -> Result<Vec<NaiveDate>> {
    Ok(get_learning_days(conn, user_id)?
        .into_iter()
        .map(|d| d.date)
        .collect())
}
