//! Biometric input types
//!
//! `BiometricRequest` is the raw wire form; `BiometricInput` can only be
//! obtained through validation, so holding one means every field is in domain.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::constants::{
    ACTIVITY_ACTIVE, ACTIVITY_LIGHT, ACTIVITY_MODERATE, ACTIVITY_SEDENTARY, ACTIVITY_VERY_ACTIVE,
    HEIGHT_RANGE_CM, MAX_AGE_YEARS, MIN_AGE_YEARS, WEIGHT_RANGE_KG,
};
use super::profile::bmr;
use super::validation::{require_in_range, Field, FieldError, ValidationError};

/// Biological sex used to select the BMR formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

impl FromStr for Gender {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            _ => Err(FieldError::new(
                Field::Gender,
                format!("gender must be one of male, female, other (got {:?})", s),
            )),
        }
    }
}

/// Habitual activity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Active,
    VeryActive,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::Light,
        ActivityLevel::Moderate,
        ActivityLevel::Active,
        ActivityLevel::VeryActive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Light => "light",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::Active => "active",
            ActivityLevel::VeryActive => "very_active",
        }
    }

    /// TDEE multiplier applied to BMR
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => ACTIVITY_SEDENTARY,
            ActivityLevel::Light => ACTIVITY_LIGHT,
            ActivityLevel::Moderate => ACTIVITY_MODERATE,
            ActivityLevel::Active => ACTIVITY_ACTIVE,
            ActivityLevel::VeryActive => ACTIVITY_VERY_ACTIVE,
        }
    }
}

impl FromStr for ActivityLevel {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sedentary" => Ok(ActivityLevel::Sedentary),
            "light" => Ok(ActivityLevel::Light),
            "moderate" => Ok(ActivityLevel::Moderate),
            "active" => Ok(ActivityLevel::Active),
            "very_active" => Ok(ActivityLevel::VeryActive),
            _ => Err(FieldError::new(
                Field::ActivityLevel,
                format!(
                    "activity_level must be one of sedentary, light, moderate, active, very_active (got {:?})",
                    s
                ),
            )),
        }
    }
}

/// Unvalidated biometric fields as received from a caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiometricRequest {
    /// Years; must be a whole number
    pub age: f64,
    pub gender: String,
    /// Centimeters
    pub height: f64,
    /// Kilograms
    pub weight: f64,
    #[serde(alias = "activity", alias = "activityLevel")]
    pub activity_level: String,
}

impl BiometricRequest {
    /// Validate every field, collecting all violations
    pub fn validate(&self) -> Result<BiometricInput, ValidationError> {
        let age = parse_age(self.age);
        let gender = self.gender.parse::<Gender>();
        let mut measurements = Vec::new();
        check_measurements(&mut measurements, self.height, self.weight);
        let activity_level = self.activity_level.parse::<ActivityLevel>();

        match (age, gender, activity_level) {
            (Ok(age), Ok(gender), Ok(activity_level)) if measurements.is_empty() => {
                BiometricInput::new(age, gender, self.height, self.weight, activity_level)
            }
            (age, gender, activity_level) => {
                let errors = age
                    .err()
                    .into_iter()
                    .chain(gender.err())
                    .chain(measurements)
                    .chain(activity_level.err())
                    .collect();
                Err(ValidationError::from_errors(errors))
            }
        }
    }
}

fn age_error() -> FieldError {
    FieldError::new(
        Field::Age,
        format!("age must be a whole number between {} and {}", MIN_AGE_YEARS, MAX_AGE_YEARS),
    )
}

fn parse_age(age: f64) -> Result<u32, FieldError> {
    let in_range = age >= f64::from(MIN_AGE_YEARS) && age <= f64::from(MAX_AGE_YEARS);
    if age.is_finite() && age.fract() == 0.0 && in_range {
        Ok(age as u32)
    } else {
        Err(age_error())
    }
}

fn check_measurements(errors: &mut Vec<FieldError>, height_cm: f64, weight_kg: f64) {
    require_in_range(errors, Field::Height, height_cm, HEIGHT_RANGE_CM, "centimeters");
    require_in_range(errors, Field::Weight, weight_kg, WEIGHT_RANGE_KG, "kilograms");
}

/// Validated biometric data
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BiometricInput {
    age: u32,
    gender: Gender,
    height_cm: f64,
    weight_kg: f64,
    activity_level: ActivityLevel,
}

impl BiometricInput {
    /// Build from already-typed values; numeric domains are still checked.
    ///
    /// Each field can be in range while the combination still gives a
    /// non-positive BMR (a very light, short, old body). That is reported
    /// against weight.
    pub fn new(
        age: u32,
        gender: Gender,
        height_cm: f64,
        weight_kg: f64,
        activity_level: ActivityLevel,
    ) -> Result<Self, ValidationError> {
        let mut errors = Vec::new();
        if !(MIN_AGE_YEARS..=MAX_AGE_YEARS).contains(&age) {
            errors.push(age_error());
        }
        check_measurements(&mut errors, height_cm, weight_kg);
        ValidationError::check(errors)?;

        if bmr(gender, height_cm, weight_kg, age) <= 0.0 {
            return Err(ValidationError::single(
                Field::Weight,
                "weight is too low for this height and age to give a positive energy requirement",
            ));
        }

        Ok(Self {
            age,
            gender,
            height_cm,
            weight_kg,
            activity_level,
        })
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn height_cm(&self) -> f64 {
        self.height_cm
    }

    pub fn weight_kg(&self) -> f64 {
        self.weight_kg
    }

    pub fn activity_level(&self) -> ActivityLevel {
        self.activity_level
    }

    /// Back to the wire form, e.g. to merge a partial update
    pub fn to_request(&self) -> BiometricRequest {
        BiometricRequest {
            age: f64::from(self.age),
            gender: self.gender.as_str().to_string(),
            height: self.height_cm,
            weight: self.weight_kg,
            activity_level: self.activity_level.as_str().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(age: f64, gender: &str, height: f64, weight: f64, activity: &str) -> BiometricRequest {
        BiometricRequest {
            age,
            gender: gender.to_string(),
            height,
            weight,
            activity_level: activity.to_string(),
        }
    }

    #[test]
    fn test_valid_request() {
        let input = request(25.0, "male", 175.0, 70.0, "moderate").validate().unwrap();
        assert_eq!(input.age(), 25);
        assert_eq!(input.gender(), Gender::Male);
        assert_eq!(input.activity_level(), ActivityLevel::Moderate);
    }

    #[test]
    fn test_enum_parsing_ignores_case_and_whitespace() {
        let input = request(40.0, " Female ", 160.0, 60.0, "VERY_ACTIVE").validate().unwrap();
        assert_eq!(input.gender(), Gender::Female);
        assert_eq!(input.activity_level(), ActivityLevel::VeryActive);
    }

    #[test]
    fn test_zero_age_reports_only_age() {
        let err = request(0.0, "male", 175.0, 70.0, "moderate").validate().unwrap_err();
        assert_eq!(err.fields(), vec![Field::Age]);
    }

    #[test]
    fn test_unknown_gender_reports_only_gender() {
        let err = request(25.0, "unknown", 175.0, 70.0, "moderate").validate().unwrap_err();
        assert_eq!(err.fields(), vec![Field::Gender]);
        assert!(err.errors()[0].reason.contains("unknown"));
    }

    #[test]
    fn test_fractional_age_rejected() {
        let err = request(25.5, "male", 175.0, 70.0, "moderate").validate().unwrap_err();
        assert_eq!(err.fields(), vec![Field::Age]);
    }

    #[test]
    fn test_all_violations_collected() {
        let err = request(-3.0, "x", 0.0, f64::INFINITY, "couch").validate().unwrap_err();
        assert_eq!(
            err.fields(),
            vec![Field::Age, Field::Gender, Field::Height, Field::Weight, Field::ActivityLevel]
        );
    }

    #[test]
    fn test_legacy_activity_key_accepted() {
        let json = r#"{"age": 30, "gender": "other", "height": 170, "weight": 65, "activity": "light"}"#;
        let req: BiometricRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.activity_level, "light");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_new_rejects_zero_values() {
        let err = BiometricInput::new(0, Gender::Male, 0.0, 0.0, ActivityLevel::Light).unwrap_err();
        assert_eq!(err.fields(), vec![Field::Age, Field::Height, Field::Weight]);
    }

    #[test]
    fn test_age_bounds() {
        assert!(request(1.0, "male", 175.0, 70.0, "moderate").validate().is_ok());
        assert!(request(150.0, "male", 175.0, 70.0, "moderate").validate().is_ok());
        let err = request(151.0, "male", 175.0, 70.0, "moderate").validate().unwrap_err();
        assert_eq!(err.fields(), vec![Field::Age]);
        assert!(BiometricInput::new(151, Gender::Male, 175.0, 70.0, ActivityLevel::Light).is_err());
    }

    #[test]
    fn test_height_bounds() {
        assert!(request(40.0, "female", 30.0, 20.0, "light").validate().is_ok());
        assert!(request(40.0, "female", 300.0, 70.0, "light").validate().is_ok());
        for height in [29.9, 300.1, 1e-200, 1e307] {
            let err = request(40.0, "female", height, 70.0, "light").validate().unwrap_err();
            assert_eq!(err.fields(), vec![Field::Height]);
        }
    }

    #[test]
    fn test_weight_bounds() {
        assert!(request(1.0, "male", 30.0, 1.0, "light").validate().is_ok());
        assert!(request(40.0, "male", 175.0, 700.0, "light").validate().is_ok());
        for weight in [0.9, 700.1, 1e307] {
            let err = request(40.0, "male", 175.0, weight, "light").validate().unwrap_err();
            assert_eq!(err.fields(), vec![Field::Weight]);
        }
    }

    #[test]
    fn test_extreme_sizes_rejected_together() {
        let err = request(25.0, "male", 1e307, 1e307, "moderate").validate().unwrap_err();
        assert_eq!(err.fields(), vec![Field::Height, Field::Weight]);
    }

    #[test]
    fn test_non_positive_bmr_rejected() {
        // 10*3 + 6.25*50 - 5*120 - 161 < 0
        let err = request(120.0, "female", 50.0, 3.0, "sedentary").validate().unwrap_err();
        assert_eq!(err.fields(), vec![Field::Weight]);
        assert!(BiometricInput::new(120, Gender::Female, 50.0, 3.0, ActivityLevel::Sedentary).is_err());
    }

    #[test]
    fn test_to_request_round_trips_through_validation() {
        let input = BiometricInput::new(52, Gender::Other, 181.5, 90.2, ActivityLevel::Active).unwrap();
        assert_eq!(input.to_request().validate().unwrap(), input);
    }
}
