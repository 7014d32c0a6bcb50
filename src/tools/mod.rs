//! SmartEats Tools module
//!
//! Tool implementations combining the calculators with the store.

pub mod hydration;
pub mod meals;
pub mod profiles;
pub mod status;
pub mod wellness;

use chrono::NaiveDate;
use serde::Serialize;

use crate::nutrition::{Field, FieldError, ValidationError};

/// Why a tool call was refused without touching the database
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "error", rename_all = "snake_case")]
pub enum Rejection {
    Validation {
        message: String,
        errors: Vec<FieldError>,
    },
    NotFound {
        entity: &'static str,
        id: i64,
    },
}

impl Rejection {
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        Rejection::NotFound { entity, id }
    }
}

impl From<ValidationError> for Rejection {
    fn from(err: ValidationError) -> Self {
        Rejection::Validation {
            message: err.to_string(),
            errors: err.errors().to_vec(),
        }
    }
}

/// Outer error is a database failure, inner is a refusal the caller should see
pub type ToolResult<T> = Result<Result<T, Rejection>, String>;

/// Parse an ISO date (YYYY-MM-DD), defaulting to today
pub(crate) fn parse_date(date: Option<&str>) -> Result<NaiveDate, FieldError> {
    match date {
        None => Ok(chrono::Local::now().date_naive()),
        Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
            FieldError::new(Field::Date, format!("date must be YYYY-MM-DD (got {:?})", s))
        }),
    }
}
