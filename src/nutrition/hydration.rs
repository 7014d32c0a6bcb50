//! Hydration planner
//!
//! Daily water needs adjusted for activity and climate.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::biometrics::ActivityLevel;
use super::constants::{
    BOTTLES_PER_LITER, CLIMATE_COLD, CLIMATE_HOT, CLIMATE_TEMPERATE, GLASSES_PER_LITER,
    HYDRATION_ACTIVE, HYDRATION_BASE_L_PER_KG, HYDRATION_LIGHT, HYDRATION_MODERATE,
    HYDRATION_SEDENTARY, HYDRATION_VERY_ACTIVE, WEIGHT_RANGE_KG,
};
use super::validation::{require_in_range, Field, FieldError, ValidationError};

/// Ambient climate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Climate {
    Cold,
    #[default]
    Temperate,
    Hot,
}

impl Climate {
    pub fn as_str(&self) -> &'static str {
        match self {
            Climate::Cold => "cold",
            Climate::Temperate => "temperate",
            Climate::Hot => "hot",
        }
    }

    pub fn multiplier(&self) -> f64 {
        match self {
            Climate::Cold => CLIMATE_COLD,
            Climate::Temperate => CLIMATE_TEMPERATE,
            Climate::Hot => CLIMATE_HOT,
        }
    }
}

impl FromStr for Climate {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cold" => Ok(Climate::Cold),
            "temperate" => Ok(Climate::Temperate),
            "hot" => Ok(Climate::Hot),
            _ => Err(FieldError::new(
                Field::Climate,
                format!("climate must be one of cold, temperate, hot (got {:?})", s),
            )),
        }
    }
}

/// Hydration factor for an activity level
pub fn activity_factor(level: ActivityLevel) -> f64 {
    match level {
        ActivityLevel::Sedentary => HYDRATION_SEDENTARY,
        ActivityLevel::Light => HYDRATION_LIGHT,
        ActivityLevel::Moderate => HYDRATION_MODERATE,
        ActivityLevel::Active => HYDRATION_ACTIVE,
        ActivityLevel::VeryActive => HYDRATION_VERY_ACTIVE,
    }
}

/// Daily water needs
#[derive(Debug, Clone, Serialize)]
pub struct WaterNeeds {
    pub liters: f64,
    /// 250 ml glasses, rounded
    pub glasses: u32,
    /// 500 ml bottles, rounded
    pub bottles: u32,
    pub activity_level: ActivityLevel,
    pub climate: Climate,
}

/// Compute water needs from raw caller values
pub fn calculate_water_needs(
    weight_kg: f64,
    activity_level: &str,
    climate: Option<&str>,
) -> Result<WaterNeeds, ValidationError> {
    let mut weight_errors = Vec::new();
    require_in_range(&mut weight_errors, Field::Weight, weight_kg, WEIGHT_RANGE_KG, "kilograms");
    let activity = activity_level.parse::<ActivityLevel>();
    let climate = climate.map_or(Ok(Climate::default()), str::parse::<Climate>);

    match (activity, climate) {
        (Ok(activity), Ok(climate)) if weight_errors.is_empty() => {
            Ok(water_needs(weight_kg, activity, climate))
        }
        (activity, climate) => {
            let errors = weight_errors
                .into_iter()
                .chain(activity.err())
                .chain(climate.err())
                .collect();
            Err(ValidationError::from_errors(errors))
        }
    }
}

/// Typed core of [`calculate_water_needs`]; `weight_kg` must already be in range
pub fn water_needs(weight_kg: f64, activity_level: ActivityLevel, climate: Climate) -> WaterNeeds {
    let liters = weight_kg * HYDRATION_BASE_L_PER_KG * activity_factor(activity_level) * climate.multiplier();
    WaterNeeds {
        liters,
        glasses: (liters * GLASSES_PER_LITER).round() as u32,
        bottles: (liters * BOTTLES_PER_LITER).round() as u32,
        activity_level,
        climate,
    }
}
