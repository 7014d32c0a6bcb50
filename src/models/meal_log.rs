//! Meal log model
//!
//! Food a user reports eating, with its macros.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::{DbError, DbResult};

/// Meal type enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
    Unspecified,
}

impl MealType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
            MealType::Unspecified => "unspecified",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => MealType::Breakfast,
            "lunch" => MealType::Lunch,
            "dinner" => MealType::Dinner,
            "snack" => MealType::Snack,
            _ => MealType::Unspecified,
        }
    }
}

/// A logged meal
#[derive(Debug, Clone, Serialize)]
pub struct MealLog {
    pub id: i64,
    pub user_id: i64,
    pub date: String,
    pub meal_type: MealType,
    pub name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub notes: Option<String>,
    pub logged_at: String,
}

/// Data for logging a meal
#[derive(Debug, Clone)]
pub struct MealLogCreate {
    pub user_id: i64,
    pub date: String,
    pub meal_type: MealType,
    pub name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub notes: Option<String>,
}

/// Summed intake for one user and day
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct IntakeTotals {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub meal_count: i64,
}

impl MealLog {
    /// Create from a database row
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let meal_type: String = row.get("meal_type")?;
        Ok(Self {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            date: row.get("date")?,
            meal_type: MealType::from_str(&meal_type),
            name: row.get("name")?,
            calories: row.get("calories")?,
            protein: row.get("protein")?,
            carbs: row.get("carbs")?,
            fat: row.get("fat")?,
            notes: row.get("notes")?,
            logged_at: row.get("logged_at")?,
        })
    }

    /// Log a new meal
    pub fn create(conn: &Connection, data: &MealLogCreate) -> DbResult<Self> {
        conn.execute(
            r#"
            INSERT INTO meal_logs (user_id, date, meal_type, name, calories, protein, carbs, fat, notes)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
            params![
                data.user_id,
                data.date,
                data.meal_type.as_str(),
                data.name,
                data.calories,
                data.protein,
                data.carbs,
                data.fat,
                data.notes,
            ],
        )?;

        let id = conn.last_insert_rowid();
        Self::get_by_id(conn, id)?.ok_or(DbError::NotFound { entity: "Meal log", id })
    }

    /// Get a meal log by ID
    pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM meal_logs WHERE id = ?1")?;

        let result = stmt.query_row([id], Self::from_row);
        match result {
            Ok(meal) => Ok(Some(meal)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Meals for a user on a date, in logging order
    pub fn list_for_user_date(conn: &Connection, user_id: i64, date: &str) -> DbResult<Vec<Self>> {
        let mut stmt = conn.prepare(
            "SELECT * FROM meal_logs WHERE user_id = ?1 AND date = ?2 ORDER BY logged_at, id",
        )?;
        let meals = stmt
            .query_map(params![user_id, date], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(meals)
    }

    /// Sum intake for a user on a date
    pub fn totals_for_user_date(conn: &Connection, user_id: i64, date: &str) -> DbResult<IntakeTotals> {
        let totals = conn.query_row(
            r#"
            SELECT COALESCE(SUM(calories), 0.0), COALESCE(SUM(protein), 0.0),
                   COALESCE(SUM(carbs), 0.0), COALESCE(SUM(fat), 0.0), COUNT(*)
            FROM meal_logs WHERE user_id = ?1 AND date = ?2
            "#,
            params![user_id, date],
            |row| {
                Ok(IntakeTotals {
                    calories: row.get(0)?,
                    protein: row.get(1)?,
                    carbs: row.get(2)?,
                    fat: row.get(3)?,
                    meal_count: row.get(4)?,
                })
            },
        )?;
        Ok(totals)
    }

    /// Delete a meal log
    pub fn delete(conn: &Connection, id: i64) -> DbResult<bool> {
        let deleted = conn.execute("DELETE FROM meal_logs WHERE id = ?1", [id])?;
        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;
    use crate::models::User;
    use crate::nutrition::{ActivityLevel, BiometricInput, Gender};

    fn setup() -> (Connection, i64) {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("PRAGMA foreign_keys = ON;").unwrap();
        run_migrations(&conn).unwrap();
        let input = BiometricInput::new(25, Gender::Male, 175.0, 70.0, ActivityLevel::Moderate).unwrap();
        let user = User::create(&conn, None, &input).unwrap();
        (conn, user.id)
    }

    fn meal(user_id: i64, date: &str, calories: f64) -> MealLogCreate {
        MealLogCreate {
            user_id,
            date: date.to_string(),
            meal_type: MealType::Lunch,
            name: "Injera with shiro".to_string(),
            calories,
            protein: 20.0,
            carbs: 80.0,
            fat: 10.0,
            notes: None,
        }
    }

    #[test]
    fn test_meal_type_parsing() {
        assert_eq!(MealType::from_str("Dinner"), MealType::Dinner);
        assert_eq!(MealType::from_str("brunch"), MealType::Unspecified);
    }

    #[test]
    fn test_create_and_list() {
        let (conn, user_id) = setup();
        let logged = MealLog::create(&conn, &meal(user_id, "2025-03-01", 550.0)).unwrap();
        assert_eq!(logged.meal_type, MealType::Lunch);

        MealLog::create(&conn, &meal(user_id, "2025-03-02", 400.0)).unwrap();
        let meals = MealLog::list_for_user_date(&conn, user_id, "2025-03-01").unwrap();
        assert_eq!(meals.len(), 1);
        assert_eq!(meals[0].id, logged.id);
    }

    #[test]
    fn test_totals() {
        let (conn, user_id) = setup();
        MealLog::create(&conn, &meal(user_id, "2025-03-01", 550.0)).unwrap();
        MealLog::create(&conn, &meal(user_id, "2025-03-01", 300.0)).unwrap();

        let totals = MealLog::totals_for_user_date(&conn, user_id, "2025-03-01").unwrap();
        assert_eq!(totals.calories, 850.0);
        assert_eq!(totals.protein, 40.0);
        assert_eq!(totals.meal_count, 2);

        let empty = MealLog::totals_for_user_date(&conn, user_id, "2025-01-01").unwrap();
        assert_eq!(empty, IntakeTotals::default());
    }

    #[test]
    fn test_delete() {
        let (conn, user_id) = setup();
        let logged = MealLog::create(&conn, &meal(user_id, "2025-03-01", 550.0)).unwrap();
        assert!(MealLog::delete(&conn, logged.id).unwrap());
        assert!(MealLog::get_by_id(&conn, logged.id).unwrap().is_none());
    }
}
