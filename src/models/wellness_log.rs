//! Wellness log model
//!
//! Sleep and stress check-ins with their computed score.

use rusqlite::{params, Connection, Row};
use serde::Serialize;

use crate::db::{DbError, DbResult};
use crate::nutrition::WellnessReport;

#[derive(Debug, Clone, Serialize)]
pub struct WellnessLog {
    pub id: i64,
    pub user_id: i64,
    pub date: String,
    pub sleep_hours: f64,
    pub stress_level: u8,
    pub score: u8,
    pub created_at: String,
}

impl WellnessLog {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            date: row.get("date")?,
            sleep_hours: row.get("sleep_hours")?,
            stress_level: row.get("stress_level")?,
            score: row.get("score")?,
            created_at: row.get("created_at")?,
        })
    }

    /// Save a scored check-in
    pub fn create(conn: &Connection, user_id: i64, date: &str, report: &WellnessReport) -> DbResult<Self> {
        conn.execute(
            r#"
            INSERT INTO wellness_logs (user_id, date, sleep_hours, stress_level, score)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![user_id, date, report.sleep_hours, report.stress_level, report.score],
        )?;

        let id = conn.last_insert_rowid();
        Self::get_by_id(conn, id)?.ok_or(DbError::NotFound { entity: "Wellness log", id })
    }

    pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM wellness_logs WHERE id = ?1")?;

        let result = stmt.query_row([id], Self::from_row);
        match result {
            Ok(log) => Ok(Some(log)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Recent check-ins for a user, newest first
    pub fn recent_for_user(conn: &Connection, user_id: i64, limit: i64) -> DbResult<Vec<Self>> {
        let mut stmt = conn.prepare(
            "SELECT * FROM wellness_logs WHERE user_id = ?1 ORDER BY date DESC, id DESC LIMIT ?2",
        )?;
        let logs = stmt
            .query_map(params![user_id, limit], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(logs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;
    use crate::models::User;
    use crate::nutrition::{assess, ActivityLevel, BiometricInput, Gender};

    #[test]
    fn test_create_and_recent() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("PRAGMA foreign_keys = ON;").unwrap();
        run_migrations(&conn).unwrap();
        let input = BiometricInput::new(41, Gender::Other, 168.0, 62.0, ActivityLevel::Light).unwrap();
        let user = User::create(&conn, None, &input).unwrap();

        let first = WellnessLog::create(&conn, user.id, "2025-04-01", &assess(6.0, 4).unwrap()).unwrap();
        assert_eq!(first.score, 68);
        WellnessLog::create(&conn, user.id, "2025-04-02", &assess(8.0, 2).unwrap()).unwrap();

        let recent = WellnessLog::recent_for_user(&conn, user.id, 10).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].date, "2025-04-02");
    }
}
