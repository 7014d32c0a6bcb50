//! Data models
//!
//! Rust structs representing database entities.

mod meal_log;
mod nutrition_profile;
mod user;
mod wellness_log;

pub use meal_log::{IntakeTotals, MealLog, MealLogCreate, MealType};
pub use nutrition_profile::StoredProfile;
pub use user::User;
pub use wellness_log::WellnessLog;
