//! Database migrations
//!
//! Schema creation and migration logic.

use rusqlite::Connection;

use super::connection::DbResult;

/// Current schema version
const SCHEMA_VERSION: i32 = 2;

/// Run all migrations to bring the database up to the current schema version
pub fn run_migrations(conn: &Connection) -> DbResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
        [],
    )?;

    let current_version = get_schema_version(conn)?;

    if current_version < 1 {
        migrate_v1(conn)?;
        conn.execute("INSERT INTO schema_migrations (version) VALUES (1)", [])?;
        tracing::info!("applied schema migration v1");
    }

    if current_version < 2 {
        migrate_v2(conn)?;
        conn.execute("INSERT INTO schema_migrations (version) VALUES (2)", [])?;
        tracing::info!("applied schema migration v2");
    }

    Ok(())
}

/// Migration v1: users and their nutrition profile history
fn migrate_v1(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(
        r#"
        -- ============================================
        -- USERS
        -- Current biometric attributes
        -- ============================================
        CREATE TABLE users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT,
            age INTEGER NOT NULL CHECK(age > 0),
            gender TEXT NOT NULL CHECK(gender IN ('male', 'female', 'other')),
            height_cm REAL NOT NULL CHECK(height_cm > 0),
            weight_kg REAL NOT NULL CHECK(weight_kg > 0),
            activity_level TEXT NOT NULL CHECK(activity_level IN
                ('sedentary', 'light', 'moderate', 'active', 'very_active')),
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- ============================================
        -- NUTRITION PROFILES
        -- Append-only history of calculations per user
        -- ============================================
        CREATE TABLE nutrition_profiles (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            bmi REAL NOT NULL,
            bmr REAL NOT NULL,
            tdee REAL NOT NULL,
            calorie_goal REAL NOT NULL,
            protein_goal REAL NOT NULL,      -- grams
            carb_goal REAL NOT NULL,         -- grams
            fat_goal REAL NOT NULL,          -- grams
            water_goal REAL NOT NULL,        -- liters
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX idx_nutrition_profiles_user ON nutrition_profiles(user_id);
        "#,
    )?;

    Ok(())
}

/// Migration v2: meal and wellness logs
fn migrate_v2(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(
        r#"
        -- ============================================
        -- MEAL LOGS
        -- ============================================
        CREATE TABLE meal_logs (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            date TEXT NOT NULL,              -- ISO date: "2025-01-09"
            meal_type TEXT NOT NULL DEFAULT 'unspecified'
                CHECK(meal_type IN ('breakfast', 'lunch', 'dinner', 'snack', 'unspecified')),
            name TEXT NOT NULL,
            calories REAL NOT NULL DEFAULT 0,
            protein REAL NOT NULL DEFAULT 0, -- grams
            carbs REAL NOT NULL DEFAULT 0,   -- grams
            fat REAL NOT NULL DEFAULT 0,     -- grams
            notes TEXT,
            logged_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX idx_meal_logs_user_date ON meal_logs(user_id, date);

        -- ============================================
        -- WELLNESS LOGS
        -- Sleep / stress check-ins
        -- ============================================
        CREATE TABLE wellness_logs (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            date TEXT NOT NULL,
            sleep_hours REAL NOT NULL,
            stress_level INTEGER NOT NULL CHECK(stress_level BETWEEN 0 AND 10),
            score INTEGER NOT NULL,
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX idx_wellness_logs_user_date ON wellness_logs(user_id, date);
        "#,
    )?;

    Ok(())
}

/// Get the current schema version
pub fn get_schema_version(conn: &Connection) -> DbResult<i32> {
    let version: i32 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
        [],
        |row| row.get(0),
    )?;
    Ok(version)
}

/// Check if the database needs migration
pub fn needs_migration(conn: &Connection) -> DbResult<bool> {
    let current = get_schema_version(conn)?;
    Ok(current < SCHEMA_VERSION)
}
