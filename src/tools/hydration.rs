//! Hydration Tool

use serde::Serialize;

use super::Rejection;
use crate::nutrition::{calculate_water_needs, Climate, WaterNeeds};

/// Practical hydration tips
#[derive(Debug, Serialize)]
pub struct HydrationTips {
    pub morning: &'static str,
    pub pre_meals: &'static str,
    pub exercise: &'static str,
    pub climate_note: String,
}

/// Response for calculate_water_needs
#[derive(Debug, Serialize)]
pub struct WaterNeedsResponse {
    pub daily_water_needs: WaterNeeds,
    pub recommendations: HydrationTips,
}

fn tips(climate: Climate) -> HydrationTips {
    HydrationTips {
        morning: "Start with 2 glasses upon waking",
        pre_meals: "1 glass 30 minutes before each meal",
        exercise: "Extra 500ml for every hour of exercise",
        climate_note: format!("Adjusted for {} climate", climate.as_str()),
    }
}

/// Daily water needs for a weight, activity level and climate
pub fn water_needs(weight_kg: f64, activity_level: &str, climate: Option<&str>) -> Result<WaterNeedsResponse, Rejection> {
    let needs = calculate_water_needs(weight_kg, activity_level, climate)?;
    Ok(WaterNeedsResponse {
        recommendations: tips(needs.climate),
        daily_water_needs: needs,
    })
}
