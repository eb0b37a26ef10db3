//! Achievement catalogue and per-user unlocks

use std::collections::HashMap;

use chrono::NaiveDate;
use rusqlite::types::Type;
use rusqlite::{params, Connection, Result};

use crate::domain::{Achievement, AchievementStatus, UnlockCondition, UnlockKind};
use crate::gamification::AchievementDef;

use super::{day_column, day_to_sql};

/// Insert catalogue entries that are not present yet (matched by code)
pub fn seed_achievements(conn: &Connection, catalogue: &[AchievementDef]) -> Result<()> {
    for def in catalogue {
        conn.execute(
            r#"
      INSERT OR IGNORE INTO achievements (code, title, description, kind, target_value)
      VALUES (?1, ?2, ?3, ?4, ?5)
      "#,
            params![
                def.code,
                def.title,
                def.description,
                def.condition.kind.as_str(),
                def.condition.target_value,
            ],
        )?;
    }
    Ok(())
}

pub fn get_achievements(conn: &Connection) -> Result<Vec<Achievement>> {
    let mut stmt = conn.prepare(
        r#"
    SELECT id, code, title, description, kind, target_value
    FROM achievements
    ORDER BY id
    "#,
    )?;

    let achievements = stmt
        .query_map([], |row| {
            let kind: String = row.get(4)?;
            let kind = UnlockKind::from_str(&kind).ok_or_else(|| {
                rusqlite::Error::FromSqlConversionFailure(
                    4,
                    Type::Text,
                    format!("unknown achievement kind '{}'", kind).into(),
                )
            })?;

            Ok(Achievement {
                id: row.get(0)?,
                code: row.get(1)?,
                title: row.get(2)?,
                description: row.get(3)?,
                condition: UnlockCondition {
                    kind,
                    target_value: row.get(5)?,
                },
            })
        })?
        .collect::<Result<Vec<_>>>()?;

    Ok(achievements)
}

/// Unlocked achievements for a user, keyed by achievement id.
/// Achievements missing from the map are locked.
pub fn get_unlocked_achievements(
    conn: &Connection,
    user_id: i64,
) -> Result<HashMap<i64, AchievementStatus>> {
    let mut stmt = conn.prepare(
        "SELECT achievement_id, unlocked_at FROM user_achievements WHERE user_id = ?1",
    )?;

    let unlocked = stmt
        .query_map(params![user_id], |row| {
            Ok((row.get(0)?, AchievementStatus::unlocked_on(day_column(row, 1)?)))
        })?
        .collect::<Result<HashMap<_, _>>>()?;

    Ok(unlocked)
}

/// Record an unlock. The first unlock date wins; returns false if the
/// achievement was already unlocked.
pub fn unlock_achievement(
    conn: &Connection,
    user_id: i64,
    achievement_id: i64,
    day: NaiveDate,
) -> Result<bool> {
    let inserted = conn.execute(
        r#"
    INSERT OR IGNORE INTO user_achievements (user_id, achievement_id, unlocked_at)
    VALUES (?1, ?2, ?3)
    "#,
        params![user_id, achievement_id, day_to_sql(day)],
    )?;
    Ok(inserted > 0)
}

/// Every catalogue entry with the user's status
pub fn list_achievements_for_user(
    conn: &Connection,
    user_id: i64,
) -> Result<Vec<(Achievement, AchievementStatus)>> {
    let unlocked = get_unlocked_achievements(conn, user_id)?;
    Ok(get_achievements(conn)?
        .into_iter()
        .map(|a| {
            let status = unlocked.get(&a.id).copied().unwrap_or_default();
            (a, status)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gamification::default_catalogue;
    use crate::testing::TestEnv;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, d).unwrap()
    }

    #[test]
    fn test_seed_is_idempotent() {
        let env = TestEnv::new().unwrap();
        seed_achievements(&env.conn, &default_catalogue()).unwrap();

        let achievements = get_achievements(&env.conn).unwrap();
        assert_eq!(achievements.len(), default_catalogue().len());

        let streak_7 = achievements.iter().find(|a| a.code == "streak_7").unwrap();
        assert_eq!(streak_7.condition, UnlockCondition::learning_streak(7));
    }

    #[test]
    fn test_unlock_keeps_first_date() {
        let env = TestEnv::new().unwrap();
        let user = env.user("ana");
        let first = get_achievements(&env.conn).unwrap()[0].id;

        assert!(unlock_achievement(&env.conn, user, first, day(1)).unwrap());
        assert!(!unlock_achievement(&env.conn, user, first, day(20)).unwrap());

        let unlocked = get_unlocked_achievements(&env.conn, user).unwrap();
        assert_eq!(unlocked[&first], AchievementStatus::unlocked_on(day(1)));
    }

    #[test]
    fn test_list_for_user_marks_locked() {
        let env = TestEnv::new().unwrap();
        let ana = env.user("ana");
        let ben = env.user("ben");
        let first = get_achievements(&env.conn).unwrap()[0].id;
        unlock_achievement(&env.conn, ana, first, day(2)).unwrap();

        let ana_list = list_achievements_for_user(&env.conn, ana).unwrap();
        let unlocked: Vec<_> = ana_list.iter().filter(|(_, s)| s.unlocked).collect();
        assert_eq!(unlocked.len(), 1);
        assert_eq!(unlocked[0].0.id, first);

        let ben_list = list_achievements_for_user(&env.conn, ben).unwrap();
        assert!(ben_list.iter().all(|(_, s)| !s.unlocked && s.unlocked_at.is_none()));
    }
}
