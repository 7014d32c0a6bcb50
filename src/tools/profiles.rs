//! Nutrition Profile Tools
//!
//! Calculate profiles, and save them against users with history.

use serde::{Deserialize, Serialize};

use super::{Rejection, ToolResult};
use crate::db::Database;
use crate::models::{StoredProfile, User};
use crate::nutrition::{BiometricInput, BiometricRequest, NutritionProfile};

/// Response for calculate_nutrition_profile
#[derive(Debug, Serialize)]
pub struct CalculateProfileResponse {
    pub input: BiometricInput,
    pub profile: NutritionProfile,
}

/// Response for save_profile and update_biometrics
#[derive(Debug, Serialize)]
pub struct SavedProfileResponse {
    pub user: User,
    pub profile: StoredProfile,
    pub profile_count: i64,
}

/// User with their most recent profile
#[derive(Debug, Serialize)]
pub struct UserDetail {
    pub user: User,
    pub latest_profile: Option<StoredProfile>,
    pub profile_count: i64,
}

/// Response for list_users
#[derive(Debug, Serialize)]
pub struct ListUsersResponse {
    pub users: Vec<User>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

/// Response for get_profile_history
#[derive(Debug, Serialize)]
pub struct ProfileHistoryResponse {
    pub user_id: i64,
    pub profiles: Vec<StoredProfile>,
    pub total: i64,
}

/// Partial biometric update; absent fields keep their stored value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BiometricUpdate {
    pub age: Option<f64>,
    pub gender: Option<String>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    #[serde(alias = "activityLevel", alias = "activity")]
    pub activity_level: Option<String>,
}

impl BiometricUpdate {
    /// Overlay onto an existing request
    pub fn apply(self, base: BiometricRequest) -> BiometricRequest {
        BiometricRequest {
            age: self.age.unwrap_or(base.age),
            gender: self.gender.unwrap_or(base.gender),
            height: self.height.unwrap_or(base.height),
            weight: self.weight.unwrap_or(base.weight),
            activity_level: self.activity_level.unwrap_or(base.activity_level),
        }
    }
}

/// Summary for recalculate_all_profiles
#[derive(Debug, Default, Serialize)]
pub struct RecalculateSummary {
    pub users: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub invalid: usize,
}

// ============================================================================
// Profile Tools
// ============================================================================

/// Calculate a profile without saving anything
pub fn calculate_profile(request: &BiometricRequest) -> Result<CalculateProfileResponse, Rejection> {
    let input = request.validate()?;
    Ok(CalculateProfileResponse {
        profile: NutritionProfile::from_input(&input),
        input,
    })
}

/// Create a user and their first profile in one transaction
pub fn save_profile(
    db: &Database,
    name: Option<&str>,
    request: &BiometricRequest,
) -> ToolResult<SavedProfileResponse> {
    let input = match request.validate() {
        Ok(input) => input,
        Err(e) => return Ok(Err(e.into())),
    };
    let profile = NutritionProfile::from_input(&input);

    let (user, stored) = db
        .with_transaction(|tx| {
            let user = User::create(tx, name, &input)?;
            let stored = StoredProfile::create(tx, user.id, &profile)?;
            Ok((user, stored))
        })
        .map_err(|e| format!("Failed to save profile: {}", e))?;

    tracing::info!(user_id = user.id, calorie_goal = profile.calorie_goal, "saved nutrition profile");

    Ok(Ok(SavedProfileResponse {
        user,
        profile: stored,
        profile_count: 1,
    }))
}

/// Update a user's biometrics and append a recalculated profile
pub fn update_biometrics(
    db: &Database,
    user_id: i64,
    name: Option<&str>,
    update: BiometricUpdate,
) -> ToolResult<SavedProfileResponse> {
    db.with_transaction(|tx| {
        let Some(user) = User::get_by_id(tx, user_id)? else {
            return Ok(Err(Rejection::not_found("User", user_id)));
        };

        let input = match update.apply(user.to_request()).validate() {
            Ok(input) => input,
            Err(e) => return Ok(Err(e.into())),
        };
        let profile = NutritionProfile::from_input(&input);

        let Some(user) = User::update_biometrics(tx, user_id, name, &input)? else {
            return Ok(Err(Rejection::not_found("User", user_id)));
        };
        let stored = StoredProfile::create(tx, user_id, &profile)?;
        let profile_count = StoredProfile::count_for_user(tx, user_id)?;

        tracing::info!(user_id, profile_count, "recalculated nutrition profile");

        Ok(Ok(SavedProfileResponse {
            user,
            profile: stored,
            profile_count,
        }))
    })
    .map_err(|e| format!("Failed to update biometrics: {}", e))
}

/// Get a user with their latest profile
pub fn get_user(db: &Database, user_id: i64) -> Result<Option<UserDetail>, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let user = User::get_by_id(&conn, user_id)
        .map_err(|e| format!("Failed to get user: {}", e))?;

    match user {
        Some(user) => {
            let latest_profile = StoredProfile::latest_for_user(&conn, user.id)
                .map_err(|e| format!("Failed to get profile: {}", e))?;
            let profile_count = StoredProfile::count_for_user(&conn, user.id)
                .map_err(|e| format!("Failed to count profiles: {}", e))?;
            Ok(Some(UserDetail {
                user,
                latest_profile,
                profile_count,
            }))
        }
        None => Ok(None),
    }
}

/// List users with pagination
pub fn list_users(db: &Database, limit: i64, offset: i64) -> Result<ListUsersResponse, String> {
    let limit = limit.clamp(1, 200);
    let offset = offset.max(0);

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let users = User::list(&conn, limit, offset)
        .map_err(|e| format!("Failed to list users: {}", e))?;
    let total = User::count(&conn)
        .map_err(|e| format!("Failed to count users: {}", e))?;

    Ok(ListUsersResponse {
        users,
        total,
        limit,
        offset,
    })
}

/// Profiles for a user, newest first
pub fn get_profile_history(db: &Database, user_id: i64, limit: i64) -> Result<Option<ProfileHistoryResponse>, String> {
    let limit = limit.clamp(1, 500);

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    if User::get_by_id(&conn, user_id)
        .map_err(|e| format!("Failed to get user: {}", e))?
        .is_none()
    {
        return Ok(None);
    }

    let profiles = StoredProfile::history_for_user(&conn, user_id, limit)
        .map_err(|e| format!("Failed to get profile history: {}", e))?;
    let total = StoredProfile::count_for_user(&conn, user_id)
        .map_err(|e| format!("Failed to count profiles: {}", e))?;

    Ok(Some(ProfileHistoryResponse {
        user_id,
        profiles,
        total,
    }))
}

/// Delete a user with their profiles and logs
pub fn delete_user(db: &Database, user_id: i64) -> Result<bool, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let deleted = User::delete(&conn, user_id)
        .map_err(|e| format!("Failed to delete user: {}", e))?;
    if deleted {
        tracing::info!(user_id, "deleted user");
    }
    Ok(deleted)
}

/// Re-derive every user's profile from stored biometrics.
///
/// A new profile is appended only when it differs from the latest one, so
/// running this twice is a no-op the second time.
pub fn recalculate_all_profiles(db: &Database) -> Result<RecalculateSummary, String> {
    let mut summary = RecalculateSummary::default();

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let ids = User::all_ids(&conn).map_err(|e| format!("Failed to list users: {}", e))?;

    for id in ids {
        let Some(user) = User::get_by_id(&conn, id).map_err(|e| format!("Failed to get user: {}", e))? else {
            continue;
        };
        summary.users += 1;

        let input = match user.biometrics() {
            Ok(input) => input,
            Err(e) => {
                tracing::warn!(user_id = id, error = %e, "stored biometrics are invalid");
                summary.invalid += 1;
                continue;
            }
        };
        let profile = NutritionProfile::from_input(&input);

        let latest = StoredProfile::latest_for_user(&conn, id)
            .map_err(|e| format!("Failed to get profile: {}", e))?;
        if latest.map(|p| p.profile) == Some(profile) {
            summary.unchanged += 1;
            continue;
        }

        StoredProfile::create(&conn, id, &profile)
            .map_err(|e| format!("Failed to save profile: {}", e))?;
        summary.updated += 1;
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;
    use crate::nutrition::Field;

    fn setup() -> Database {
        let db = Database::open_in_memory().unwrap();
        db.with_conn(|conn| run_migrations(conn)).unwrap();
        db
    }

    fn request() -> BiometricRequest {
        BiometricRequest {
            age: 25.0,
            gender: "male".to_string(),
            height: 175.0,
            weight: 70.0,
            activity_level: "moderate".to_string(),
        }
    }

    #[test]
    fn test_calculate_profile_rejects_invalid() {
        let mut bad = request();
        bad.gender = "unknown".to_string();
        match calculate_profile(&bad).unwrap_err() {
            Rejection::Validation { errors, .. } => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].field, Field::Gender);
            }
            other => panic!("unexpected rejection: {:?}", other),
        }
    }

    #[test]
    fn test_save_profile_creates_user_and_profile() {
        let db = setup();
        let saved = save_profile(&db, Some("Tigist"), &request()).unwrap().unwrap();
        assert_eq!(saved.profile.user_id, saved.user.id);
        assert_eq!(saved.profile_count, 1);

        let detail = get_user(&db, saved.user.id).unwrap().unwrap();
        assert_eq!(detail.latest_profile.unwrap().id, saved.profile.id);
        assert_eq!(list_users(&db, 50, 0).unwrap().total, 1);
    }

    #[test]
    fn test_save_profile_invalid_writes_nothing() {
        let db = setup();
        let mut bad = request();
        bad.age = 0.0;
        assert!(save_profile(&db, None, &bad).unwrap().is_err());
        assert_eq!(list_users(&db, 50, 0).unwrap().total, 0);
    }

    #[test]
    fn test_update_biometrics_appends_history() {
        let db = setup();
        let saved = save_profile(&db, None, &request()).unwrap().unwrap();

        let update = BiometricUpdate {
            weight: Some(75.0),
            ..Default::default()
        };
        let updated = update_biometrics(&db, saved.user.id, Some("Kofi"), update).unwrap().unwrap();
        assert_eq!(updated.user.weight_kg, 75.0);
        assert_eq!(updated.user.name.as_deref(), Some("Kofi"));
        assert_eq!(updated.profile_count, 2);
        assert!(updated.profile.profile.bmr > saved.profile.profile.bmr);

        let history = get_profile_history(&db, saved.user.id, 10).unwrap().unwrap();
        assert_eq!(history.total, 2);
        assert_eq!(history.profiles[0].id, updated.profile.id);
        assert_eq!(history.profiles[1].id, saved.profile.id);
    }

    #[test]
    fn test_update_accepts_activity_level_aliases() {
        for key in ["activity_level", "activityLevel", "activity"] {
            let json = format!(r#"{{"{}": "active"}}"#, key);
            let update: BiometricUpdate = serde_json::from_str(&json).unwrap();
            assert_eq!(update.activity_level.as_deref(), Some("active"));
        }
    }

    #[test]
    fn test_update_biometrics_validation_and_missing_user() {
        let db = setup();
        let saved = save_profile(&db, None, &request()).unwrap().unwrap();

        let update = BiometricUpdate {
            activity_level: Some("couch".to_string()),
            ..Default::default()
        };
        let rejection = update_biometrics(&db, saved.user.id, None, update).unwrap().unwrap_err();
        assert!(matches!(rejection, Rejection::Validation { .. }));
        assert_eq!(get_user(&db, saved.user.id).unwrap().unwrap().profile_count, 1);

        let rejection = update_biometrics(&db, 999, None, BiometricUpdate::default()).unwrap().unwrap_err();
        assert_eq!(rejection, Rejection::not_found("User", 999));
    }

    #[test]
    fn test_delete_user() {
        let db = setup();
        let saved = save_profile(&db, None, &request()).unwrap().unwrap();
        assert!(delete_user(&db, saved.user.id).unwrap());
        assert!(get_user(&db, saved.user.id).unwrap().is_none());
        assert!(get_profile_history(&db, saved.user.id, 10).unwrap().is_none());
        assert!(!delete_user(&db, saved.user.id).unwrap());
    }

    #[test]
    fn test_delete_user_removes_dependent_rows() {
        use crate::tools::meals::{log_meal, LogMealInput};
        use crate::tools::wellness::track_wellness;

        let db = setup();
        let saved = save_profile(&db, None, &request()).unwrap().unwrap();
        let user_id = saved.user.id;
        let other = save_profile(&db, Some("Kept"), &request()).unwrap().unwrap();

        for id in [user_id, other.user.id] {
            let meal = LogMealInput {
                user_id: id,
                date: Some("2025-07-01".to_string()),
                meal_type: Some("lunch".to_string()),
                name: "Lentil soup".to_string(),
                calories: 320.0,
                protein: 18.0,
                carbs: 45.0,
                fat: 7.0,
                notes: None,
            };
            log_meal(&db, meal).unwrap().unwrap();
            track_wellness(&db, Some(id), Some("2025-07-01"), 7.5, 3).unwrap().unwrap();
        }
        update_biometrics(&db, user_id, None, BiometricUpdate { weight: Some(72.0), ..Default::default() })
            .unwrap()
            .unwrap();

        assert!(delete_user(&db, user_id).unwrap());

        let count = |table: &str| -> (i64, i64) {
            db.with_conn(|conn| {
                let sql = format!("SELECT COUNT(*) FROM {} WHERE user_id = ?1", table);
                let deleted = conn.query_row(&sql, [user_id], |row| row.get(0))?;
                let kept = conn.query_row(&sql, [other.user.id], |row| row.get(0))?;
                Ok((deleted, kept))
            })
            .unwrap()
        };
        assert_eq!(count("nutrition_profiles"), (0, 1));
        assert_eq!(count("meal_logs"), (0, 1));
        assert_eq!(count("wellness_logs"), (0, 1));
    }

    #[test]
    fn test_recalculate_is_idempotent() {
        let db = setup();
        save_profile(&db, None, &request()).unwrap().unwrap();

        let summary = recalculate_all_profiles(&db).unwrap();
        assert_eq!(summary.users, 1);
        assert_eq!(summary.unchanged, 1);
        assert_eq!(summary.updated, 0);
    }

    #[test]
    fn test_recalculate_appends_when_missing() {
        let db = setup();
        let input = request().validate().unwrap();
        let user = db.with_conn(|conn| User::create(conn, None, &input)).unwrap();

        let summary = recalculate_all_profiles(&db).unwrap();
        assert_eq!(summary.updated, 1);
        assert_eq!(get_user(&db, user.id).unwrap().unwrap().profile_count, 1);
    }
}
