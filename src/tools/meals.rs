//! Meal Logging Tools
//!
//! Log meals, compare a day's intake with the user's goals, check a day for
//! food-group gaps and look up reference nutrition for a food.

use serde::Serialize;

use super::{parse_date, Rejection, ToolResult};
use crate::db::Database;
use crate::models::{IntakeTotals, MealLog, MealLogCreate, MealType, StoredProfile, User};
use crate::nutrition::{
    analyze_gaps, lookup_food, Field, FieldError, FoodNutrition, GapAnalysis, NutritionProfile,
    ValidationError,
};

/// Input for log_meal
#[derive(Debug, Clone)]
pub struct LogMealInput {
    pub user_id: i64,
    pub date: Option<String>,
    pub meal_type: Option<String>,
    pub name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub notes: Option<String>,
}

/// Response for list_meals
#[derive(Debug, Serialize)]
pub struct DayMealsResponse {
    pub user_id: i64,
    pub date: String,
    pub meals: Vec<MealLog>,
    pub totals: IntakeTotals,
}

/// Percent of each goal reached
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GoalProgress {
    pub calories_pct: f64,
    pub protein_pct: f64,
    pub carbs_pct: f64,
    pub fat_pct: f64,
}

impl GoalProgress {
    pub fn new(intake: &IntakeTotals, goals: &NutritionProfile) -> Self {
        Self {
            calories_pct: percent(intake.calories, goals.calorie_goal),
            protein_pct: percent(intake.protein, goals.protein_goal),
            carbs_pct: percent(intake.carbs, goals.carb_goal),
            fat_pct: percent(intake.fat, goals.fat_goal),
        }
    }
}

fn percent(value: f64, goal: f64) -> f64 {
    if goal > 0.0 {
        value / goal * 100.0
    } else {
        0.0
    }
}

/// Response for get_daily_progress
#[derive(Debug, Serialize)]
pub struct DailyProgressResponse {
    pub user_id: i64,
    pub date: String,
    pub intake: IntakeTotals,
    /// Latest stored profile; null when the user has none
    pub goals: Option<NutritionProfile>,
    pub progress: Option<GoalProgress>,
    pub remaining_calories: Option<f64>,
}

/// Response for check_deficiencies
#[derive(Debug, Serialize)]
pub struct DeficiencyCheckResponse {
    pub user_id: i64,
    pub date: String,
    pub meal_count: usize,
    #[serde(flatten)]
    pub analysis: GapAnalysis,
}

fn require_amount(errors: &mut Vec<FieldError>, field: Field, value: f64) {
    if !value.is_finite() || value < 0.0 {
        errors.push(FieldError::new(
            field,
            format!("{} must be a non-negative number", field),
        ));
    }
}

fn validate_meal(input: &LogMealInput) -> Result<String, ValidationError> {
    let mut errors = Vec::new();

    let date = parse_date(input.date.as_deref()).map_err(|e| errors.push(e)).ok();
    if input.name.trim().is_empty() {
        errors.push(FieldError::new(Field::Name, "name must not be empty"));
    }
    require_amount(&mut errors, Field::Calories, input.calories);
    require_amount(&mut errors, Field::Protein, input.protein);
    require_amount(&mut errors, Field::Carbs, input.carbs);
    require_amount(&mut errors, Field::Fat, input.fat);

    ValidationError::check(errors)?;
    Ok(date.map(|d| d.to_string()).unwrap_or_default())
}

// ============================================================================
// Meal Tools
// ============================================================================

/// Log a meal for a user
pub fn log_meal(db: &Database, input: LogMealInput) -> ToolResult<MealLog> {
    let date = match validate_meal(&input) {
        Ok(date) => date,
        Err(e) => return Ok(Err(e.into())),
    };

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    if User::get_by_id(&conn, input.user_id)
        .map_err(|e| format!("Failed to get user: {}", e))?
        .is_none()
    {
        return Ok(Err(Rejection::not_found("User", input.user_id)));
    }

    let data = MealLogCreate {
        user_id: input.user_id,
        date,
        meal_type: input
            .meal_type
            .as_deref()
            .map(MealType::from_str)
            .unwrap_or(MealType::Unspecified),
        name: input.name.trim().to_string(),
        calories: input.calories,
        protein: input.protein,
        carbs: input.carbs,
        fat: input.fat,
        notes: input.notes,
    };

    let meal = MealLog::create(&conn, &data)
        .map_err(|e| format!("Failed to log meal: {}", e))?;

    tracing::info!(user_id = meal.user_id, meal_id = meal.id, date = %meal.date, "logged meal");

    Ok(Ok(meal))
}

/// Meals for a user on a date (default today)
pub fn list_meals(db: &Database, user_id: i64, date: Option<&str>) -> ToolResult<DayMealsResponse> {
    let date = match parse_date(date) {
        Ok(date) => date.to_string(),
        Err(e) => return Ok(Err(ValidationError::from_errors(vec![e]).into())),
    };

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    if User::get_by_id(&conn, user_id)
        .map_err(|e| format!("Failed to get user: {}", e))?
        .is_none()
    {
        return Ok(Err(Rejection::not_found("User", user_id)));
    }

    let meals = MealLog::list_for_user_date(&conn, user_id, &date)
        .map_err(|e| format!("Failed to list meals: {}", e))?;
    let totals = MealLog::totals_for_user_date(&conn, user_id, &date)
        .map_err(|e| format!("Failed to total meals: {}", e))?;

    Ok(Ok(DayMealsResponse {
        user_id,
        date,
        meals,
        totals,
    }))
}

/// Delete a meal log
pub fn delete_meal(db: &Database, id: i64) -> Result<bool, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    MealLog::delete(&conn, id).map_err(|e| format!("Failed to delete meal: {}", e))
}

/// Compare a day's intake with the user's latest goals
pub fn daily_progress(db: &Database, user_id: i64, date: Option<&str>) -> ToolResult<DailyProgressResponse> {
    let date = match parse_date(date) {
        Ok(date) => date.to_string(),
        Err(e) => return Ok(Err(ValidationError::from_errors(vec![e]).into())),
    };

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    if User::get_by_id(&conn, user_id)
        .map_err(|e| format!("Failed to get user: {}", e))?
        .is_none()
    {
        return Ok(Err(Rejection::not_found("User", user_id)));
    }

    let intake = MealLog::totals_for_user_date(&conn, user_id, &date)
        .map_err(|e| format!("Failed to total meals: {}", e))?;
    let goals = StoredProfile::latest_for_user(&conn, user_id)
        .map_err(|e| format!("Failed to get profile: {}", e))?
        .map(|p| p.profile);

    Ok(Ok(DailyProgressResponse {
        user_id,
        date,
        intake,
        progress: goals.as_ref().map(|g| GoalProgress::new(&intake, g)),
        remaining_calories: goals.as_ref().map(|g| g.calorie_goal - intake.calories),
        goals,
    }))
}

/// Food-group gaps in a user's meals for a date
pub fn check_deficiencies(db: &Database, user_id: i64, date: Option<&str>) -> ToolResult<DeficiencyCheckResponse> {
    let date = match parse_date(date) {
        Ok(date) => date.to_string(),
        Err(e) => return Ok(Err(ValidationError::from_errors(vec![e]).into())),
    };

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    if User::get_by_id(&conn, user_id)
        .map_err(|e| format!("Failed to get user: {}", e))?
        .is_none()
    {
        return Ok(Err(Rejection::not_found("User", user_id)));
    }

    let meals = MealLog::list_for_user_date(&conn, user_id, &date)
        .map_err(|e| format!("Failed to list meals: {}", e))?;
    let analysis = analyze_gaps(meals.iter().map(|m| m.name.as_str()));

    Ok(Ok(DeficiencyCheckResponse {
        user_id,
        date,
        meal_count: meals.len(),
        analysis,
    }))
}

/// Reference nutrition per 100 g, for logging a meal whose macros are unknown
pub fn lookup_food_nutrition(name: &str) -> Result<FoodNutrition, Rejection> {
    Ok(lookup_food(name)?)
}
