//! User model
//!
//! Stores a user's current biometric attributes.

use rusqlite::{params, Connection, Row};
use serde::Serialize;

use crate::db::{DbError, DbResult};
use crate::nutrition::{ActivityLevel, BiometricInput, BiometricRequest, Gender, ValidationError};

/// A persisted user
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: i64,
    pub name: Option<String>,
    pub age: u32,
    pub gender: String,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub activity_level: String,
    pub created_at: String,
    pub updated_at: String,
}

impl User {
    /// Create from a database row
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            age: row.get("age")?,
            gender: row.get("gender")?,
            height_cm: row.get("height_cm")?,
            weight_kg: row.get("weight_kg")?,
            activity_level: row.get("activity_level")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }

    /// Stored attributes as a calculator request
    pub fn to_request(&self) -> BiometricRequest {
        BiometricRequest {
            age: f64::from(self.age),
            gender: self.gender.clone(),
            height: self.height_cm,
            weight: self.weight_kg,
            activity_level: self.activity_level.clone(),
        }
    }

    /// Re-validate the stored attributes
    pub fn biometrics(&self) -> Result<BiometricInput, ValidationError> {
        self.to_request().validate()
    }

    /// Create a new user
    pub fn create(conn: &Connection, name: Option<&str>, input: &BiometricInput) -> DbResult<Self> {
        conn.execute(
            r#"
            INSERT INTO users (name, age, gender, height_cm, weight_kg, activity_level)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                name,
                input.age(),
                input.gender().as_str(),
                input.height_cm(),
                input.weight_kg(),
                input.activity_level().as_str(),
            ],
        )?;

        let id = conn.last_insert_rowid();
        Self::get_by_id(conn, id)?.ok_or(DbError::NotFound { entity: "User", id })
    }

    /// Get a user by ID
    pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM users WHERE id = ?1")?;

        let result = stmt.query_row([id], Self::from_row);
        match result {
            Ok(user) => Ok(Some(user)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// List users, most recently updated first
    pub fn list(conn: &Connection, limit: i64, offset: i64) -> DbResult<Vec<Self>> {
        let mut stmt = conn.prepare(
            "SELECT * FROM users ORDER BY updated_at DESC, id DESC LIMIT ?1 OFFSET ?2",
        )?;
        let users = stmt
            .query_map(params![limit, offset], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(users)
    }

    /// Every user ID, ascending
    pub fn all_ids(conn: &Connection) -> DbResult<Vec<i64>> {
        let mut stmt = conn.prepare("SELECT id FROM users ORDER BY id")?;
        let ids = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ids)
    }

    /// Count all users
    pub fn count(conn: &Connection) -> DbResult<i64> {
        let count = conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Replace the biometric attributes (and optionally the name)
    pub fn update_biometrics(
        conn: &Connection,
        id: i64,
        name: Option<&str>,
        input: &BiometricInput,
    ) -> DbResult<Option<Self>> {
        let updated = conn.execute(
            r#"
            UPDATE users SET
                name = COALESCE(?2, name),
                age = ?3,
                gender = ?4,
                height_cm = ?5,
                weight_kg = ?6,
                activity_level = ?7,
                updated_at = datetime('now')
            WHERE id = ?1
            "#,
            params![
                id,
                name,
                input.age(),
                input.gender().as_str(),
                input.height_cm(),
                input.weight_kg(),
                input.activity_level().as_str(),
            ],
        )?;

        if updated == 0 {
            return Ok(None);
        }
        Self::get_by_id(conn, id)
    }

    /// Delete a user; profiles and logs cascade
    pub fn delete(conn: &Connection, id: i64) -> DbResult<bool> {
        let deleted = conn.execute("DELETE FROM users WHERE id = ?1", [id])?;
        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;

    fn setup() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("PRAGMA foreign_keys = ON;").unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    fn input() -> BiometricInput {
        BiometricInput::new(25, Gender::Male, 175.0, 70.0, ActivityLevel::Moderate).unwrap()
    }

    #[test]
    fn test_create_and_get() {
        let conn = setup();
        let user = User::create(&conn, Some("Abebe"), &input()).unwrap();
        assert_eq!(user.name.as_deref(), Some("Abebe"));
        assert_eq!(user.gender, "male");
        assert_eq!(user.activity_level, "moderate");

        let fetched = User::get_by_id(&conn, user.id).unwrap().unwrap();
        assert_eq!(fetched.biometrics().unwrap(), input());
    }

    #[test]
    fn test_missing_user() {
        let conn = setup();
        assert!(User::get_by_id(&conn, 42).unwrap().is_none());
        assert!(!User::delete(&conn, 42).unwrap());
    }

    #[test]
    fn test_update_keeps_name_when_absent() {
        let conn = setup();
        let user = User::create(&conn, Some("Amina"), &input()).unwrap();
        let heavier = BiometricInput::new(26, Gender::Male, 175.0, 74.0, ActivityLevel::Active).unwrap();

        let updated = User::update_biometrics(&conn, user.id, None, &heavier).unwrap().unwrap();
        assert_eq!(updated.name.as_deref(), Some("Amina"));
        assert_eq!(updated.age, 26);
        assert_eq!(updated.activity_level, "active");

        assert!(User::update_biometrics(&conn, 999, None, &heavier).unwrap().is_none());
    }

    #[test]
    fn test_list_and_count() {
        let conn = setup();
        for _ in 0..3 {
            User::create(&conn, None, &input()).unwrap();
        }
        assert_eq!(User::count(&conn).unwrap(), 3);
        assert_eq!(User::list(&conn, 2, 0).unwrap().len(), 2);
        assert_eq!(User::all_ids(&conn).unwrap().len(), 3);
    }
}
