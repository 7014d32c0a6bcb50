//! Offline food nutrition lookup
//!
//! A small reference table of common foods per 100 g serving. Names that
//! match nothing get a generic estimate so a meal can still be logged.

use serde::Serialize;

use super::constants::REFERENCE_SERVING_GRAMS;
use super::validation::{Field, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FoodSource {
    /// Matched an entry in the reference table
    SampleData,
    /// Generic fallback for unknown foods
    Estimated,
}

/// Nutrition for one reference serving
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FoodNutrition {
    pub food: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fiber: f64,
    pub serving_qty: f64,
    pub serving_unit: &'static str,
    pub source: FoodSource,
}

struct ReferenceFood {
    key: &'static str,
    calories: f64,
    protein: f64,
    carbs: f64,
    fat: f64,
    fiber: f64,
}

const fn food(key: &'static str, calories: f64, protein: f64, carbs: f64, fat: f64, fiber: f64) -> ReferenceFood {
    ReferenceFood { key, calories, protein, carbs, fat, fiber }
}

/// Checked in order; the first key contained in the query wins
static REFERENCE_FOODS: [ReferenceFood; 5] = [
    food("apple", 52.0, 0.3, 14.0, 0.2, 2.4),
    food("banana", 89.0, 1.1, 23.0, 0.3, 2.6),
    food("chicken", 165.0, 31.0, 0.0, 3.6, 0.0),
    food("rice", 130.0, 2.7, 28.0, 0.3, 0.4),
    food("broccoli", 34.0, 2.8, 7.0, 0.4, 2.6),
];

static ESTIMATE: ReferenceFood = food("", 100.0, 5.0, 15.0, 3.0, 2.0);

/// Look up a food by name
pub fn lookup_food(name: &str) -> Result<FoodNutrition, ValidationError> {
    let query = name.trim().to_lowercase();
    if query.is_empty() {
        return Err(ValidationError::single(Field::Name, "name must not be empty"));
    }

    let (entry, source) = match REFERENCE_FOODS.iter().find(|f| query.contains(f.key)) {
        Some(entry) => (entry, FoodSource::SampleData),
        None => (&ESTIMATE, FoodSource::Estimated),
    };

    Ok(FoodNutrition {
        food: query,
        calories: entry.calories,
        protein: entry.protein,
        carbs: entry.carbs,
        fat: entry.fat,
        fiber: entry.fiber,
        serving_qty: REFERENCE_SERVING_GRAMS,
        serving_unit: "grams",
        source,
    })
}
