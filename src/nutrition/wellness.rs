//! Wellness scoring from sleep and stress

use serde::Serialize;

use super::constants::{
    MAX_SLEEP_HOURS, MAX_STRESS_LEVEL, STRESS_PENALTY_PER_LEVEL, TARGET_SLEEP_HOURS,
    WELLNESS_HALF_POINTS,
};
use super::validation::{Field, FieldError, ValidationError};

/// Recommendation category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationKind {
    Sleep,
    Stress,
    Balanced,
}

#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub kind: RecommendationKind,
    pub message: &'static str,
    pub action: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct WellnessReport {
    pub sleep_hours: f64,
    pub stress_level: u8,
    /// 0-100
    pub score: u8,
    pub recommendations: Vec<Recommendation>,
}

/// Validate sleep hours (0-24) and stress level (integer 0-10)
pub fn validate(sleep_hours: f64, stress_level: i64) -> Result<(f64, u8), ValidationError> {
    let mut errors = Vec::new();
    if !sleep_hours.is_finite() || !(0.0..=MAX_SLEEP_HOURS).contains(&sleep_hours) {
        errors.push(FieldError::new(
            Field::SleepHours,
            format!("sleep_hours must be between 0 and {}", MAX_SLEEP_HOURS),
        ));
    }
    if !(0..=MAX_STRESS_LEVEL).contains(&stress_level) {
        errors.push(FieldError::new(
            Field::StressLevel,
            format!("stress_level must be an integer between 0 and {}", MAX_STRESS_LEVEL),
        ));
    }
    ValidationError::check(errors)?;
    Ok((sleep_hours, stress_level as u8))
}

/// Score in 0..=100, half from sleep and half from (inverse) stress
pub fn wellness_score(sleep_hours: f64, stress_level: u8) -> u8 {
    let sleep_score = (sleep_hours / TARGET_SLEEP_HOURS * WELLNESS_HALF_POINTS).min(WELLNESS_HALF_POINTS);
    let stress_score = (WELLNESS_HALF_POINTS - f64::from(stress_level) * STRESS_PENALTY_PER_LEVEL).max(0.0);
    (sleep_score + stress_score).round().clamp(0.0, 100.0) as u8
}

pub fn recommendations(sleep_hours: f64, stress_level: u8) -> Vec<Recommendation> {
    let mut out = Vec::new();

    if sleep_hours < 7.0 {
        out.push(Recommendation {
            kind: RecommendationKind::Sleep,
            message: "Aim for 7-9 hours of sleep for optimal health",
            action: "Try magnesium-rich foods like almonds before bed",
        });
    }

    if stress_level > 7 {
        out.push(Recommendation {
            kind: RecommendationKind::Stress,
            message: "High stress detected - focus on stress-reducing foods",
            action: "Include omega-3 rich foods like salmon and walnuts",
        });
    }

    if sleep_hours >= 7.0 && stress_level <= 5 {
        out.push(Recommendation {
            kind: RecommendationKind::Balanced,
            message: "Excellent wellness balance! Keep it up!",
            action: "Maintain your current healthy routine",
        });
    }

    out
}

/// Validate and score a check-in
pub fn assess(sleep_hours: f64, stress_level: i64) -> Result<WellnessReport, ValidationError> {
    let (sleep_hours, stress_level) = validate(sleep_hours, stress_level)?;
    Ok(WellnessReport {
        sleep_hours,
        stress_level,
        score: wellness_score(sleep_hours, stress_level),
        recommendations: recommendations(sleep_hours, stress_level),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_score() {
        assert_eq!(wellness_score(8.0, 0), 100);
        // Oversleeping does not exceed the sleep half
        assert_eq!(wellness_score(12.0, 0), 100);
    }

    #[test]
    fn test_worst_score() {
        assert_eq!(wellness_score(0.0, 10), 0);
    }

    #[test]
    fn test_mid_score() {
        // 6/8*50 = 37.5, 50 - 20 = 30
        assert_eq!(wellness_score(6.0, 4), 68);
    }

    #[test]
    fn test_recommendations() {
        let kinds: Vec<_> = recommendations(5.0, 9).iter().map(|r| r.kind).collect();
        assert_eq!(kinds, vec![RecommendationKind::Sleep, RecommendationKind::Stress]);

        let kinds: Vec<_> = recommendations(8.0, 3).iter().map(|r| r.kind).collect();
        assert_eq!(kinds, vec![RecommendationKind::Balanced]);

        assert!(recommendations(7.5, 6).is_empty());
    }

    #[test]
    fn test_validation() {
        let err = assess(25.0, 11).unwrap_err();
        assert_eq!(err.fields(), vec![Field::SleepHours, Field::StressLevel]);
        assert!(assess(f64::NAN, 3).is_err());
        assert!(assess(7.0, 3).is_ok());
    }
}
