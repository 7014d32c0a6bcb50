//! SmartEats MCP Server Implementation
//!
//! Implements the MCP server with all SmartEats tools.

use std::path::PathBuf;
use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::db::Database;
use crate::nutrition::BiometricRequest;
use crate::tools::meals::{self, LogMealInput};
use crate::tools::profiles::{self, BiometricUpdate};
use crate::tools::status::StatusTracker;
use crate::tools::{hydration, wellness, Rejection, ToolResult};

/// SmartEats MCP Service
#[derive(Clone)]
pub struct SmartEatsService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    database: Database,
    tool_router: ToolRouter<SmartEatsService>,
}

impl SmartEatsService {
    pub fn new(database_path: PathBuf, database: Database) -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(database_path))),
            database,
            tool_router: Self::tool_router(),
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, McpError> {
    serde_json::to_string_pretty(value).map_err(|e| McpError::internal_error(e.to_string(), None))
}

fn success<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    Ok(CallToolResult::success(vec![Content::text(to_json(value)?)]))
}

/// Rejections go back to the caller as tool errors carrying the JSON payload
fn rejected(rejection: &Rejection) -> Result<CallToolResult, McpError> {
    Ok(CallToolResult::error(vec![Content::text(to_json(rejection)?)]))
}

fn respond<T: Serialize>(result: Result<T, Rejection>) -> Result<CallToolResult, McpError> {
    match result {
        Ok(value) => success(&value),
        Err(rejection) => rejected(&rejection),
    }
}

fn respond_db<T: Serialize>(result: ToolResult<T>) -> Result<CallToolResult, McpError> {
    respond(result.map_err(|e| McpError::internal_error(e, None))?)
}

// ============================================================================
// Profile Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct BiometricParams {
    /// Age in whole years (1-150)
    pub age: f64,
    /// male, female, or other
    pub gender: String,
    /// Height in centimeters (30-300)
    pub height: f64,
    /// Weight in kilograms (1-700)
    pub weight: f64,
    /// sedentary, light, moderate, active, or very_active
    #[serde(alias = "activityLevel", alias = "activity")]
    pub activity_level: String,
}

impl From<BiometricParams> for BiometricRequest {
    fn from(p: BiometricParams) -> Self {
        BiometricRequest {
            age: p.age,
            gender: p.gender,
            height: p.height,
            weight: p.weight,
            activity_level: p.activity_level,
        }
    }
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SaveProfileParams {
    /// Display name (optional)
    pub name: Option<String>,
    /// Age in whole years (1-150)
    pub age: f64,
    /// male, female, or other
    pub gender: String,
    /// Height in centimeters (30-300)
    pub height: f64,
    /// Weight in kilograms (1-700)
    pub weight: f64,
    /// sedentary, light, moderate, active, or very_active
    #[serde(alias = "activityLevel", alias = "activity")]
    pub activity_level: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UpdateBiometricsParams {
    /// User ID
    pub user_id: i64,
    /// New display name (optional)
    pub name: Option<String>,
    pub age: Option<f64>,
    pub gender: Option<String>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    #[serde(alias = "activityLevel", alias = "activity")]
    pub activity_level: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UserIdParams {
    /// User ID
    pub user_id: i64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListUsersParams {
    #[serde(default = "default_list_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_list_limit() -> i64 { 50 }

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ProfileHistoryParams {
    /// User ID
    pub user_id: i64,
    /// Maximum profiles to return (default 20)
    #[serde(default = "default_history_limit")]
    pub limit: i64,
}

fn default_history_limit() -> i64 { 20 }

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct WaterNeedsParams {
    /// Weight in kilograms (1-700)
    pub weight: f64,
    /// sedentary, light, moderate, active, or very_active
    #[serde(alias = "activityLevel", alias = "activity")]
    pub activity_level: String,
    /// cold, temperate, or hot (default temperate)
    pub climate: Option<String>,
}

// ============================================================================
// Meal Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct LogMealParams {
    /// User ID
    pub user_id: i64,
    /// ISO date YYYY-MM-DD (default today)
    pub date: Option<String>,
    /// breakfast, lunch, dinner, or snack
    pub meal_type: Option<String>,
    /// What was eaten
    pub name: String,
    /// kcal
    pub calories: f64,
    /// grams
    #[serde(default)]
    pub protein: f64,
    /// grams
    #[serde(default)]
    pub carbs: f64,
    /// grams
    #[serde(default)]
    pub fat: f64,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UserDateParams {
    /// User ID
    pub user_id: i64,
    /// ISO date YYYY-MM-DD (default today)
    pub date: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct FoodLookupParams {
    /// Food name, e.g. "grilled chicken"
    pub name: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct MealIdParams {
    /// Meal log ID
    pub id: i64,
}

// ============================================================================
// Wellness Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct TrackWellnessParams {
    /// Save the check-in for this user (optional)
    pub user_id: Option<i64>,
    /// ISO date YYYY-MM-DD (default today)
    pub date: Option<String>,
    /// Hours slept (0-24)
    pub sleep_hours: f64,
    /// Stress level (0-10)
    pub stress_level: i64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct WellnessHistoryParams {
    /// User ID
    pub user_id: i64,
    /// Maximum check-ins to return (default 30)
    #[serde(default = "default_wellness_limit")]
    pub limit: i64,
}

fn default_wellness_limit() -> i64 { 30 }

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl SmartEatsService {
    // --- Status ---

    #[tool(description = "Get the current status of the SmartEats service including build info, database status, and process information")]
    async fn smarteats_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        success(&tracker.get_status())
    }

    #[tool(description = "Get instructions for calculating nutrition profiles and logging meals. Call this when starting a session or when unsure how to use the SmartEats tools.")]
    fn smarteats_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(INSTRUCTIONS)]))
    }

    // --- Profiles ---

    #[tool(description = "Calculate BMI, BMR, TDEE and daily calorie, macro and water goals from biometrics. Nothing is saved. Invalid fields are all reported together.")]
    fn calculate_nutrition_profile(&self, Parameters(p): Parameters<BiometricParams>) -> Result<CallToolResult, McpError> {
        let request = BiometricRequest::from(p);
        respond(profiles::calculate_profile(&request))
    }

    #[tool(description = "Create a user from biometrics and save their first nutrition profile")]
    fn save_profile(&self, Parameters(p): Parameters<SaveProfileParams>) -> Result<CallToolResult, McpError> {
        let request = BiometricRequest {
            age: p.age, gender: p.gender, height: p.height, weight: p.weight, activity_level: p.activity_level,
        };
        respond_db(profiles::save_profile(&self.database, p.name.as_deref(), &request))
    }

    #[tool(description = "Update any subset of a user's biometrics. A recalculated profile is appended to their history.")]
    fn update_biometrics(&self, Parameters(p): Parameters<UpdateBiometricsParams>) -> Result<CallToolResult, McpError> {
        let update = BiometricUpdate {
            age: p.age, gender: p.gender, height: p.height, weight: p.weight, activity_level: p.activity_level,
        };
        respond_db(profiles::update_biometrics(&self.database, p.user_id, p.name.as_deref(), update))
    }

    #[tool(description = "Get a user with their latest nutrition profile")]
    fn get_user(&self, Parameters(p): Parameters<UserIdParams>) -> Result<CallToolResult, McpError> {
        let result = profiles::get_user(&self.database, p.user_id).map_err(|e| McpError::internal_error(e, None))?;
        match result {
            Some(detail) => success(&detail),
            None => rejected(&Rejection::not_found("User", p.user_id)),
        }
    }

    #[tool(description = "List users with pagination")]
    fn list_users(&self, Parameters(p): Parameters<ListUsersParams>) -> Result<CallToolResult, McpError> {
        let result = profiles::list_users(&self.database, p.limit, p.offset).map_err(|e| McpError::internal_error(e, None))?;
        success(&result)
    }

    #[tool(description = "Get a user's nutrition profile history, newest first")]
    fn get_profile_history(&self, Parameters(p): Parameters<ProfileHistoryParams>) -> Result<CallToolResult, McpError> {
        let result = profiles::get_profile_history(&self.database, p.user_id, p.limit)
            .map_err(|e| McpError::internal_error(e, None))?;
        match result {
            Some(history) => success(&history),
            None => rejected(&Rejection::not_found("User", p.user_id)),
        }
    }

    #[tool(description = "Delete a user together with their profiles, meals and wellness logs")]
    fn delete_user(&self, Parameters(p): Parameters<UserIdParams>) -> Result<CallToolResult, McpError> {
        let deleted = profiles::delete_user(&self.database, p.user_id).map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::json!({"success": deleted, "user_id": p.user_id}).to_string();
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Calculate daily water needs from weight, activity level and climate (cold, temperate, hot)")]
    fn calculate_water_needs(&self, Parameters(p): Parameters<WaterNeedsParams>) -> Result<CallToolResult, McpError> {
        respond(hydration::water_needs(p.weight, &p.activity_level, p.climate.as_deref()))
    }

    // --- Meals ---

    #[tool(description = "Log a meal with its calories and macros for a user. Date defaults to today.")]
    fn log_meal(&self, Parameters(p): Parameters<LogMealParams>) -> Result<CallToolResult, McpError> {
        let input = LogMealInput {
            user_id: p.user_id, date: p.date, meal_type: p.meal_type, name: p.name,
            calories: p.calories, protein: p.protein, carbs: p.carbs, fat: p.fat, notes: p.notes,
        };
        respond_db(meals::log_meal(&self.database, input))
    }

    #[tool(description = "List a user's meals for a date with totals")]
    fn list_meals(&self, Parameters(p): Parameters<UserDateParams>) -> Result<CallToolResult, McpError> {
        respond_db(meals::list_meals(&self.database, p.user_id, p.date.as_deref()))
    }

    #[tool(description = "Delete a meal log")]
    fn delete_meal(&self, Parameters(p): Parameters<MealIdParams>) -> Result<CallToolResult, McpError> {
        let deleted = meals::delete_meal(&self.database, p.id).map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::json!({"success": deleted, "id": p.id}).to_string();
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Compare a day's logged intake with the user's latest nutrition goals")]
    fn get_daily_progress(&self, Parameters(p): Parameters<UserDateParams>) -> Result<CallToolResult, McpError> {
        respond_db(meals::daily_progress(&self.database, p.user_id, p.date.as_deref()))
    }

    #[tool(description = "Check a day's meals for food-group gaps. Returns food-group counts, a 0-100 completeness score, a risk level and recommendations.")]
    fn check_deficiencies(&self, Parameters(p): Parameters<UserDateParams>) -> Result<CallToolResult, McpError> {
        respond_db(meals::check_deficiencies(&self.database, p.user_id, p.date.as_deref()))
    }

    #[tool(description = "Look up reference nutrition per 100 g for a food by name. Unknown foods get a generic estimate. Use it to fill in log_meal when macros are unknown.")]
    fn lookup_food(&self, Parameters(p): Parameters<FoodLookupParams>) -> Result<CallToolResult, McpError> {
        respond(meals::lookup_food_nutrition(&p.name))
    }

    // --- Wellness ---

    #[tool(description = "Score sleep hours and stress level (0-100) with recommendations. Saved when user_id is given.")]
    fn track_wellness(&self, Parameters(p): Parameters<TrackWellnessParams>) -> Result<CallToolResult, McpError> {
        respond_db(wellness::track_wellness(&self.database, p.user_id, p.date.as_deref(), p.sleep_hours, p.stress_level))
    }

    #[tool(description = "Get a user's recent wellness check-ins and average score")]
    fn get_wellness_history(&self, Parameters(p): Parameters<WellnessHistoryParams>) -> Result<CallToolResult, McpError> {
        respond_db(wellness::wellness_history(&self.database, p.user_id, p.limit))
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for SmartEatsService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "smarteats".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("SmartEats".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "SmartEats - personal nutrition targets, meal logging and wellness. \
                 Call smarteats_instructions first. \
                 Profiles: calculate_nutrition_profile (no save), save_profile, update_biometrics, \
                 get_user, list_users, get_profile_history, delete_user. \
                 Hydration: calculate_water_needs. \
                 Meals: log_meal, list_meals, delete_meal, get_daily_progress, \
                 check_deficiencies, lookup_food. \
                 Wellness: track_wellness, get_wellness_history."
                    .into(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;

    fn service() -> SmartEatsService {
        let db = Database::open_in_memory().unwrap();
        db.with_conn(|conn| run_migrations(conn)).unwrap();
        SmartEatsService::new(PathBuf::from(":memory:"), db)
    }

    fn params() -> BiometricParams {
        BiometricParams {
            age: 25.0,
            gender: "male".to_string(),
            height: 175.0,
            weight: 70.0,
            activity_level: "moderate".to_string(),
        }
    }

    #[test]
    fn test_calculate_success_is_not_error() {
        let result = service().calculate_nutrition_profile(Parameters(params())).unwrap();
        assert_ne!(result.is_error, Some(true));
    }

    #[test]
    fn test_calculate_validation_is_tool_error() {
        let mut bad = params();
        bad.age = 0.0;
        let result = service().calculate_nutrition_profile(Parameters(bad)).unwrap();
        assert_eq!(result.is_error, Some(true));
    }

    #[test]
    fn test_missing_user_is_tool_error() {
        let result = service().get_user(Parameters(UserIdParams { user_id: 1 })).unwrap();
        assert_eq!(result.is_error, Some(true));
    }

    #[test]
    fn test_activity_level_key_aliases() {
        for key in ["activity_level", "activityLevel", "activity"] {
            let json = format!(
                r#"{{"age": 25, "gender": "male", "height": 175, "weight": 70, "{}": "moderate"}}"#,
                key
            );
            let p: BiometricParams = serde_json::from_str(&json).unwrap();
            assert_eq!(p.activity_level, "moderate");
            let result = service().calculate_nutrition_profile(Parameters(p)).unwrap();
            assert_ne!(result.is_error, Some(true));

            let json = format!(r#"{{"user_id": 1, "{}": "light"}}"#, key);
            let p: UpdateBiometricsParams = serde_json::from_str(&json).unwrap();
            assert_eq!(p.activity_level.as_deref(), Some("light"));
        }

        let json = r#"{"name": "Abebe", "age": 25, "gender": "male", "height": 175, "weight": 70, "activityLevel": "active"}"#;
        let p: SaveProfileParams = serde_json::from_str(json).unwrap();
        let result = service().save_profile(Parameters(p)).unwrap();
        assert_ne!(result.is_error, Some(true));
    }

    #[test]
    fn test_wellness_history_unknown_user_is_tool_error() {
        let p = WellnessHistoryParams { user_id: 5, limit: 30 };
        let result = service().get_wellness_history(Parameters(p)).unwrap();
        assert_eq!(result.is_error, Some(true));
    }

    #[test]
    fn test_lookup_food_tool() {
        let p = FoodLookupParams { name: "banana".to_string() };
        let result = service().lookup_food(Parameters(p)).unwrap();
        assert_ne!(result.is_error, Some(true));
    }

    #[test]
    fn test_server_info_names_service() {
        let info = service().get_info();
        assert_eq!(info.server_info.name, "smarteats");
    }
}
