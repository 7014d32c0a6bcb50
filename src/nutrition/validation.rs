//! Input validation errors
//!
//! Validation collects every violation before failing so a caller can report
//! all bad fields at once.

use serde::Serialize;
use thiserror::Error;

/// Input field that can fail validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Age,
    Gender,
    Height,
    Weight,
    ActivityLevel,
    Climate,
    SleepHours,
    StressLevel,
    Date,
    Name,
    Calories,
    Protein,
    Carbs,
    Fat,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Age => "age",
            Field::Gender => "gender",
            Field::Height => "height",
            Field::Weight => "weight",
            Field::ActivityLevel => "activity_level",
            Field::Climate => "climate",
            Field::SleepHours => "sleep_hours",
            Field::StressLevel => "stress_level",
            Field::Date => "date",
            Field::Name => "name",
            Field::Calories => "calories",
            Field::Protein => "protein",
            Field::Carbs => "carbs",
            Field::Fat => "fat",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single invalid field with a human-readable reason
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: Field,
    pub reason: String,
}

impl FieldError {
    pub fn new(field: Field, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// One or more fields were outside their domain
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[error("invalid input: {}", join_reasons(.errors))]
pub struct ValidationError {
    errors: Vec<FieldError>,
}

fn join_reasons(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.reason.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    /// Wrap collected errors; `Ok(())` when nothing was collected
    pub fn check(errors: Vec<FieldError>) -> Result<(), ValidationError> {
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Self { errors })
        }
    }

    /// Callers must only pass a non-empty list
    pub(crate) fn from_errors(errors: Vec<FieldError>) -> Self {
        debug_assert!(!errors.is_empty());
        Self { errors }
    }

    pub fn single(field: Field, reason: impl Into<String>) -> Self {
        Self {
            errors: vec![FieldError::new(field, reason)],
        }
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Invalid field names, in the order they were checked
    pub fn fields(&self) -> Vec<Field> {
        self.errors.iter().map(|e| e.field).collect()
    }

    pub fn contains(&self, field: Field) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }
}

/// Push an error unless `value` is finite and within `min..=max`
pub(crate) fn require_in_range(
    errors: &mut Vec<FieldError>,
    field: Field,
    value: f64,
    (min, max): (f64, f64),
    unit: &str,
) {
    if !value.is_finite() || value < min || value > max {
        errors.push(FieldError::new(
            field,
            format!("{} must be between {} and {} {}", field, min, max, unit),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_in_range_is_inclusive() {
        let mut errors = Vec::new();
        require_in_range(&mut errors, Field::Height, 30.0, (30.0, 300.0), "centimeters");
        require_in_range(&mut errors, Field::Height, 300.0, (30.0, 300.0), "centimeters");
        assert!(errors.is_empty());

        require_in_range(&mut errors, Field::Height, 29.9, (30.0, 300.0), "centimeters");
        require_in_range(&mut errors, Field::Weight, f64::INFINITY, (1.0, 700.0), "kilograms");
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].reason, "height must be between 30 and 300 centimeters");
    }

    #[test]
    fn test_check_empty_is_ok() {
        assert!(ValidationError::check(Vec::new()).is_ok());
    }

    #[test]
    fn test_display_joins_reasons() {
        let err = ValidationError::check(vec![
            FieldError::new(Field::Age, "age must be a positive integer"),
            FieldError::new(Field::Gender, "gender must be one of male, female, other"),
        ])
        .unwrap_err();

        assert_eq!(
            err.to_string(),
            "invalid input: age must be a positive integer; gender must be one of male, female, other"
        );
        assert_eq!(err.fields(), vec![Field::Age, Field::Gender]);
    }

    #[test]
    fn test_serializes_snake_case_fields() {
        let err = ValidationError::single(Field::ActivityLevel, "bad");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["errors"][0]["field"], "activity_level");
    }
}
