//! Nutrition policy constants
//!
//! Every tunable number used by the calculators lives here so the formulas
//! never carry inline literals.

// ============================================================================
// Accepted biometric ranges (inclusive)
// ============================================================================

pub const MIN_AGE_YEARS: u32 = 1;
pub const MAX_AGE_YEARS: u32 = 150;
pub const HEIGHT_RANGE_CM: (f64, f64) = (30.0, 300.0);
pub const WEIGHT_RANGE_KG: (f64, f64) = (1.0, 700.0);

// ============================================================================
// Mifflin-St Jeor
// ============================================================================

/// kcal per kg of body weight
pub const BMR_WEIGHT_FACTOR: f64 = 10.0;
/// kcal per cm of height
pub const BMR_HEIGHT_FACTOR: f64 = 6.25;
/// kcal per year of age (subtracted)
pub const BMR_AGE_FACTOR: f64 = 5.0;
/// Sex-specific offset for males
pub const BMR_MALE_OFFSET: f64 = 5.0;
/// Sex-specific offset for females
pub const BMR_FEMALE_OFFSET: f64 = -161.0;

// ============================================================================
// Activity multipliers (TDEE = BMR x multiplier)
// ============================================================================

pub const ACTIVITY_SEDENTARY: f64 = 1.2;
pub const ACTIVITY_LIGHT: f64 = 1.375;
pub const ACTIVITY_MODERATE: f64 = 1.55;
pub const ACTIVITY_ACTIVE: f64 = 1.725;
pub const ACTIVITY_VERY_ACTIVE: f64 = 1.9;

// ============================================================================
// Macro split (fractions of the calorie goal, must sum to 1.0)
// ============================================================================

pub const PROTEIN_CALORIE_SHARE: f64 = 0.30;
pub const CARB_CALORIE_SHARE: f64 = 0.45;
pub const FAT_CALORIE_SHARE: f64 = 0.25;

pub const KCAL_PER_G_PROTEIN: f64 = 4.0;
pub const KCAL_PER_G_CARB: f64 = 4.0;
pub const KCAL_PER_G_FAT: f64 = 9.0;

// ============================================================================
// Water
// ============================================================================

/// Daily water goal in liters per kg of body weight
pub const WATER_L_PER_KG: f64 = 0.033;

/// Base for the hydration planner, which layers activity and climate on top
pub const HYDRATION_BASE_L_PER_KG: f64 = 0.035;

pub const HYDRATION_SEDENTARY: f64 = 1.0;
pub const HYDRATION_LIGHT: f64 = 1.1;
pub const HYDRATION_MODERATE: f64 = 1.2;
pub const HYDRATION_ACTIVE: f64 = 1.4;
pub const HYDRATION_VERY_ACTIVE: f64 = 1.6;

pub const CLIMATE_COLD: f64 = 0.9;
pub const CLIMATE_TEMPERATE: f64 = 1.0;
pub const CLIMATE_HOT: f64 = 1.3;

/// 250 ml glass
pub const GLASSES_PER_LITER: f64 = 4.0;
/// 500 ml bottle
pub const BOTTLES_PER_LITER: f64 = 2.0;

// ============================================================================
// Wellness
// ============================================================================

/// Hours of sleep that earn the full sleep half of the score
pub const TARGET_SLEEP_HOURS: f64 = 8.0;
/// Points available to each half of the wellness score
pub const WELLNESS_HALF_POINTS: f64 = 50.0;
/// Points lost per stress level
pub const STRESS_PENALTY_PER_LEVEL: f64 = 5.0;
pub const MAX_STRESS_LEVEL: i64 = 10;
pub const MAX_SLEEP_HOURS: f64 = 24.0;

// ============================================================================
// Food-group completeness
// ============================================================================

/// Points earned per meal that hits a food group
pub const POINTS_PER_SERVING: u32 = 5;
pub const PROTEIN_MAX_POINTS: u32 = 20;
pub const VEGETABLES_MAX_POINTS: u32 = 25;
pub const FRUITS_MAX_POINTS: u32 = 15;
pub const GRAINS_MAX_POINTS: u32 = 20;
pub const DAIRY_MAX_POINTS: u32 = 10;
pub const WATER_MAX_POINTS: u32 = 10;
pub const MAX_COMPLETENESS_SCORE: u32 = 100;

/// Fewer protein servings than this in a day is flagged
pub const MIN_PROTEIN_SERVINGS: u32 = 2;
/// Fewer vegetable servings than this in a day is flagged
pub const MIN_VEGETABLE_SERVINGS: u32 = 3;

// ============================================================================
// Food lookup
// ============================================================================

/// Reference serving for per-food nutrition values
pub const REFERENCE_SERVING_GRAMS: f64 = 100.0;
