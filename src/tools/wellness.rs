//! Wellness Tools
//!
//! Score sleep/stress check-ins and keep them per user.

use serde::Serialize;

use super::{parse_date, Rejection, ToolResult};
use crate::db::Database;
use crate::models::{User, WellnessLog};
use crate::nutrition::{assess, ValidationError, WellnessReport};

/// Response for track_wellness
#[derive(Debug, Serialize)]
pub struct TrackWellnessResponse {
    #[serde(flatten)]
    pub report: WellnessReport,
    /// Present when the check-in was saved for a user
    pub saved: Option<WellnessLog>,
}

/// Response for get_wellness_history
#[derive(Debug, Serialize)]
pub struct WellnessHistoryResponse {
    pub user_id: i64,
    pub logs: Vec<WellnessLog>,
    pub average_score: Option<f64>,
}

/// Score a check-in; saved when `user_id` is given
pub fn track_wellness(
    db: &Database,
    user_id: Option<i64>,
    date: Option<&str>,
    sleep_hours: f64,
    stress_level: i64,
) -> ToolResult<TrackWellnessResponse> {
    let (report, date) = match (assess(sleep_hours, stress_level), parse_date(date)) {
        (Ok(report), Ok(date)) => (report, date.to_string()),
        (report, date) => {
            let errors = report
                .err()
                .map(|e| e.errors().to_vec())
                .unwrap_or_default()
                .into_iter()
                .chain(date.err())
                .collect();
            return Ok(Err(ValidationError::from_errors(errors).into()));
        }
    };

    let Some(user_id) = user_id else {
        return Ok(Ok(TrackWellnessResponse { report, saved: None }));
    };

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    if User::get_by_id(&conn, user_id)
        .map_err(|e| format!("Failed to get user: {}", e))?
        .is_none()
    {
        return Ok(Err(Rejection::not_found("User", user_id)));
    }

    let saved = WellnessLog::create(&conn, user_id, &date, &report)
        .map_err(|e| format!("Failed to save wellness log: {}", e))?;

    Ok(Ok(TrackWellnessResponse {
        report,
        saved: Some(saved),
    }))
}

/// Recent check-ins for a user
pub fn wellness_history(db: &Database, user_id: i64, limit: i64) -> ToolResult<WellnessHistoryResponse> {
    let limit = limit.clamp(1, 365);

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    if User::get_by_id(&conn, user_id)
        .map_err(|e| format!("Failed to get user: {}", e))?
        .is_none()
    {
        return Ok(Err(Rejection::not_found("User", user_id)));
    }
    let logs = WellnessLog::recent_for_user(&conn, user_id, limit)
        .map_err(|e| format!("Failed to get wellness logs: {}", e))?;

    let average_score = if logs.is_empty() {
        None
    } else {
        Some(logs.iter().map(|l| f64::from(l.score)).sum::<f64>() / logs.len() as f64)
    };

    Ok(Ok(WellnessHistoryResponse {
        user_id,
        logs,
        average_score,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;
    use crate::nutrition::{BiometricRequest, Field};
    use crate::tools::profiles::save_profile;

    fn setup() -> (Database, i64) {
        let db = Database::open_in_memory().unwrap();
        db.with_conn(|conn| run_migrations(conn)).unwrap();
        let request = BiometricRequest {
            age: 33.0,
            gender: "female".to_string(),
            height: 165.0,
            weight: 58.0,
            activity_level: "active".to_string(),
        };
        let saved = save_profile(&db, None, &request).unwrap().unwrap();
        (db, saved.user.id)
    }

    #[test]
    fn test_anonymous_check_in_not_saved() {
        let (db, _) = setup();
        let response = track_wellness(&db, None, None, 8.0, 0).unwrap().unwrap();
        assert_eq!(response.report.score, 100);
        assert!(response.saved.is_none());
    }

    #[test]
    fn test_saved_and_averaged() {
        let (db, user_id) = setup();
        track_wellness(&db, Some(user_id), Some("2025-06-01"), 8.0, 0).unwrap().unwrap();
        track_wellness(&db, Some(user_id), Some("2025-06-02"), 0.0, 10).unwrap().unwrap();

        let history = wellness_history(&db, user_id, 30).unwrap().unwrap();
        assert_eq!(history.logs.len(), 2);
        assert_eq!(history.average_score, Some(50.0));
    }

    #[test]
    fn test_rejections() {
        let (db, _) = setup();
        assert!(matches!(
            track_wellness(&db, None, None, 30.0, 2).unwrap(),
            Err(Rejection::Validation { .. })
        ));
        assert_eq!(
            track_wellness(&db, Some(77), None, 7.0, 2).unwrap().unwrap_err(),
            Rejection::not_found("User", 77)
        );
    }

    #[test]
    fn test_anonymous_check_in_validates_date() {
        let (db, _) = setup();
        match track_wellness(&db, None, Some("not-a-date"), 8.0, 0).unwrap().unwrap_err() {
            Rejection::Validation { errors, .. } => {
                assert_eq!(errors.iter().map(|e| e.field).collect::<Vec<_>>(), vec![Field::Date]);
            }
            other => panic!("unexpected rejection: {:?}", other),
        }
    }

    #[test]
    fn test_date_errors_collected_with_score_errors() {
        let (db, user_id) = setup();
        match track_wellness(&db, Some(user_id), Some("2025-13-40"), -1.0, 11).unwrap().unwrap_err() {
            Rejection::Validation { errors, .. } => {
                assert_eq!(
                    errors.iter().map(|e| e.field).collect::<Vec<_>>(),
                    vec![Field::SleepHours, Field::StressLevel, Field::Date]
                );
            }
            other => panic!("unexpected rejection: {:?}", other),
        }
    }

    #[test]
    fn test_history_unknown_user() {
        let (db, _) = setup();
        assert_eq!(
            wellness_history(&db, 404, 30).unwrap().unwrap_err(),
            Rejection::not_found("User", 404)
        );
    }

    #[test]
    fn test_history_empty_for_known_user() {
        let (db, user_id) = setup();
        let history = wellness_history(&db, user_id, 30).unwrap().unwrap();
        assert!(history.logs.is_empty());
        assert_eq!(history.average_score, None);
    }
}
