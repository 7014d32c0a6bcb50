//! Stored nutrition profile model
//!
//! Append-only history of profiles calculated for a user.

use rusqlite::{params, Connection, Row};
use serde::Serialize;

use crate::db::{DbError, DbResult};
use crate::nutrition::NutritionProfile;

/// A nutrition profile saved for a user
#[derive(Debug, Clone, Serialize)]
pub struct StoredProfile {
    pub id: i64,
    pub user_id: i64,
    #[serde(flatten)]
    pub profile: NutritionProfile,
    pub created_at: String,
}

impl StoredProfile {
    /// Create from a database row
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            profile: NutritionProfile {
                bmi: row.get("bmi")?,
                bmr: row.get("bmr")?,
                tdee: row.get("tdee")?,
                calorie_goal: row.get("calorie_goal")?,
                protein_goal: row.get("protein_goal")?,
                carb_goal: row.get("carb_goal")?,
                fat_goal: row.get("fat_goal")?,
                water_goal: row.get("water_goal")?,
            },
            created_at: row.get("created_at")?,
        })
    }

    /// Append a profile to a user's history
    pub fn create(conn: &Connection, user_id: i64, profile: &NutritionProfile) -> DbResult<Self> {
        conn.execute(
            r#"
            INSERT INTO nutrition_profiles
                (user_id, bmi, bmr, tdee, calorie_goal, protein_goal, carb_goal, fat_goal, water_goal)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
            params![
                user_id,
                profile.bmi,
                profile.bmr,
                profile.tdee,
                profile.calorie_goal,
                profile.protein_goal,
                profile.carb_goal,
                profile.fat_goal,
                profile.water_goal,
            ],
        )?;

        let id = conn.last_insert_rowid();
        Self::get_by_id(conn, id)?.ok_or(DbError::NotFound { entity: "Nutrition profile", id })
    }

    /// Get a profile by ID
    pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM nutrition_profiles WHERE id = ?1")?;

        let result = stmt.query_row([id], Self::from_row);
        match result {
            Ok(profile) => Ok(Some(profile)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Most recent profile for a user
    pub fn latest_for_user(conn: &Connection, user_id: i64) -> DbResult<Option<Self>> {
        Ok(Self::history_for_user(conn, user_id, 1)?.into_iter().next())
    }

    /// Profiles for a user, newest first
    pub fn history_for_user(conn: &Connection, user_id: i64, limit: i64) -> DbResult<Vec<Self>> {
        // created_at has one-second resolution, id breaks ties
        let mut stmt = conn.prepare(
            "SELECT * FROM nutrition_profiles WHERE user_id = ?1
             ORDER BY created_at DESC, id DESC LIMIT ?2",
        )?;
        let profiles = stmt
            .query_map(params![user_id, limit], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(profiles)
    }

    /// Number of profiles stored for a user
    pub fn count_for_user(conn: &Connection, user_id: i64) -> DbResult<i64> {
        let count = conn.query_row(
            "SELECT COUNT(*) FROM nutrition_profiles WHERE user_id = ?1",
            [user_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}
