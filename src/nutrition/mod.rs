//! Nutrition calculation module
//!
//! Pure calculators: the nutrition profile, hydration planning, wellness
//! scoring, food-group gap analysis and offline food lookup. Nothing in here
//! touches the database.

pub mod biometrics;
pub mod constants;
pub mod food_groups;
pub mod food_lookup;
pub mod hydration;
pub mod profile;
pub mod validation;
pub mod wellness;

pub use biometrics::{ActivityLevel, BiometricInput, BiometricRequest, Gender};
pub use food_groups::{analyze_gaps, FoodGroup, FoodGroupCounts, GapAnalysis, RiskLevel};
pub use food_lookup::{lookup_food, FoodNutrition, FoodSource};
pub use hydration::{calculate_water_needs, Climate, WaterNeeds};
pub use profile::{calculate, MacroGoals, NutritionProfile};
pub use validation::{Field, FieldError, ValidationError};
pub use wellness::{assess, WellnessReport};
