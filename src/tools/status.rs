//! SmartEats Status Tool
//!
//! Provides runtime status information about the SmartEats service.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;

/// Usage guide for AI assistants
pub const INSTRUCTIONS: &str = r#"
# SmartEats Instructions

SmartEats turns a person's biometrics into daily nutrition targets and tracks
what they eat against those targets.

## 1. Calculate a nutrition profile

Tool: `calculate_nutrition_profile` (nothing is saved)

| Field | Type | Allowed values |
|-------|------|----------------|
| age | integer | 1-150 (years) |
| gender | string | male, female, other |
| height | number | 30-300 (cm) |
| weight | number | 1-700 (kg) |
| activity_level | string | sedentary, light, moderate, active, very_active |

The result contains:
- **bmi** (kg/m²)
- **bmr** - Mifflin-St Jeor basal metabolic rate (kcal/day)
- **tdee** - bmr x activity multiplier (1.2 / 1.375 / 1.55 / 1.725 / 1.9)
- **calorie_goal** - equal to tdee (maintenance)
- **protein_goal / carb_goal / fat_goal** - 30% / 45% / 25% of calories, in grams
- **water_goal** - 0.033 L per kg

For gender "other", bmr is the mean of the male and female formulas.

If any field is invalid, the response is `{"error": "validation", ...}` listing
EVERY bad field with a reason. Show those reasons to the user; do not guess
replacement values.

## 2. Save and update

- `save_profile` - creates a user and stores their first profile
- `update_biometrics` - change any subset of fields; a new profile is appended
  and the previous ones are kept as history
- `get_user`, `list_users`, `get_profile_history`, `delete_user`

## 3. Meals

- `log_meal` - user_id, name, calories, protein, carbs, fat (grams, >= 0),
  optional date (YYYY-MM-DD, defaults to today) and meal_type
  (breakfast, lunch, dinner, snack)
- `list_meals`, `delete_meal`
- `get_daily_progress` - intake vs. the latest profile's goals, in percent
- `check_deficiencies` - food-group counts for a day's meals, a 0-100
  completeness score, risk level and recommendations
- `lookup_food` - reference calories and macros per 100 g; unknown foods get
  a generic estimate. Use it when the user does not know a meal's macros.

## 4. Hydration and wellness

- `calculate_water_needs` - weight, activity_level, optional climate
  (cold, temperate, hot)
- `track_wellness` - sleep_hours (0-24) and stress_level (0-10) give a 0-100
  score; pass user_id to save it
- `get_wellness_history`
"#;

/// Runtime status of the SmartEats service
#[derive(Debug, Clone, Serialize)]
pub struct SmartEatsStatus {
    /// Build information
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,

    /// Database information
    pub database_path: String,
    pub database_size_bytes: Option<u64>,

    /// Process information
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    database_path: PathBuf,
}

impl StatusTracker {
    /// Create a new status tracker
    pub fn new(database_path: PathBuf) -> Self {
        Self {
            start_time: Instant::now(),
            database_path,
        }
    }

    /// Get the current status
    pub fn get_status(&self) -> SmartEatsStatus {
        let build_info = BuildInfo::current();

        let database_size_bytes = std::fs::metadata(&self.database_path)
            .ok()
            .map(|m| m.len());

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        SmartEatsStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            database_path: self.database_path.display().to_string(),
            database_size_bytes,
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}
