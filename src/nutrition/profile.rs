//! Nutrition profile calculator
//!
//! Pure, synchronous derivation of BMI, BMR, TDEE and daily goals from
//! validated biometrics. No I/O and no shared state: identical input always
//! yields bit-identical output.

use serde::{Deserialize, Serialize};

use super::biometrics::{BiometricInput, BiometricRequest, Gender};
use super::constants::{
    BMR_AGE_FACTOR, BMR_FEMALE_OFFSET, BMR_HEIGHT_FACTOR, BMR_MALE_OFFSET, BMR_WEIGHT_FACTOR,
    CARB_CALORIE_SHARE, FAT_CALORIE_SHARE, KCAL_PER_G_CARB, KCAL_PER_G_FAT, KCAL_PER_G_PROTEIN,
    PROTEIN_CALORIE_SHARE, WATER_L_PER_KG,
};
use super::validation::ValidationError;

/// Derived nutrition metrics and daily goals
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NutritionProfile {
    /// kg/m²
    pub bmi: f64,
    /// kcal/day
    pub bmr: f64,
    /// kcal/day
    pub tdee: f64,
    /// kcal/day
    pub calorie_goal: f64,
    /// grams/day
    pub protein_goal: f64,
    /// grams/day
    pub carb_goal: f64,
    /// grams/day
    pub fat_goal: f64,
    /// liters/day
    pub water_goal: f64,
}

/// Daily macro targets in grams
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MacroGoals {
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl MacroGoals {
    /// Split a calorie budget by the fixed protein/carb/fat shares
    pub fn from_calories(calories: f64) -> Self {
        Self {
            protein: PROTEIN_CALORIE_SHARE * calories / KCAL_PER_G_PROTEIN,
            carbs: CARB_CALORIE_SHARE * calories / KCAL_PER_G_CARB,
            fat: FAT_CALORIE_SHARE * calories / KCAL_PER_G_FAT,
        }
    }

    /// Energy the macros represent, in kcal
    pub fn calories(&self) -> f64 {
        self.protein * KCAL_PER_G_PROTEIN + self.carbs * KCAL_PER_G_CARB + self.fat * KCAL_PER_G_FAT
    }
}

/// Body Mass Index from centimeters and kilograms
pub fn bmi(height_cm: f64, weight_kg: f64) -> f64 {
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}

/// Basal Metabolic Rate (Mifflin-St Jeor).
///
/// `Other` has no published formula; it is the mean of the male and female
/// results, which is the male base shifted by the average offset.
pub fn bmr(gender: Gender, height_cm: f64, weight_kg: f64, age: u32) -> f64 {
    let base = BMR_WEIGHT_FACTOR * weight_kg + BMR_HEIGHT_FACTOR * height_cm
        - BMR_AGE_FACTOR * f64::from(age);
    match gender {
        Gender::Male => base + BMR_MALE_OFFSET,
        Gender::Female => base + BMR_FEMALE_OFFSET,
        Gender::Other => ((base + BMR_MALE_OFFSET) + (base + BMR_FEMALE_OFFSET)) / 2.0,
    }
}

/// Daily water goal in liters
pub fn water_goal(weight_kg: f64) -> f64 {
    weight_kg * WATER_L_PER_KG
}

impl NutritionProfile {
    /// Derive the full profile from validated input
    pub fn from_input(input: &BiometricInput) -> Self {
        let bmi = bmi(input.height_cm(), input.weight_kg());
        let bmr = bmr(input.gender(), input.height_cm(), input.weight_kg(), input.age());
        let tdee = bmr * input.activity_level().multiplier();
        // Maintenance target, no deficit or surplus
        let calorie_goal = tdee;
        let macros = MacroGoals::from_calories(calorie_goal);

        Self {
            bmi,
            bmr,
            tdee,
            calorie_goal,
            protein_goal: macros.protein,
            carb_goal: macros.carbs,
            fat_goal: macros.fat,
            water_goal: water_goal(input.weight_kg()),
        }
    }

    pub fn macros(&self) -> MacroGoals {
        MacroGoals {
            protein: self.protein_goal,
            carbs: self.carb_goal,
            fat: self.fat_goal,
        }
    }
}

/// Validate a raw request and compute its profile.
///
/// Nothing is computed unless every field is valid.
pub fn calculate(request: &BiometricRequest) -> Result<NutritionProfile, ValidationError> {
    let input = request.validate()?;
    Ok(NutritionProfile::from_input(&input))
}
