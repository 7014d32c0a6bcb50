//! SmartEats Library
//!
//! Nutrition profile calculation, meal logging and wellness tracking.

pub mod build_info;
pub mod config;
pub mod db;
pub mod mcp;
pub mod models;
pub mod nutrition;
pub mod tools;
