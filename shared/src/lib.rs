//! Mediterranean Meal Planner Shared Library
//!
//! Pure planning engine used by the backend batch job and the WASM bindings:
//! nutrition targets, food scoring, greedy meal assembly, weekly plans,
//! adherence scores, logged-meal summaries and shopping lists. Nothing in
//! this crate performs I/O.

pub mod adherence;
pub mod errors;
pub mod meal_plan;
pub mod models;
pub mod nutrition;
pub mod scoring;
pub mod shopping;
pub mod taxonomy;
pub mod tracking;
pub mod validation;

// Re-export commonly used items
pub use adherence::*;
pub use errors::*;
pub use meal_plan::*;
pub use models::*;
pub use nutrition::*;
pub use scoring::{score_food, score_foods_for_meal, FoodScore};
pub use taxonomy::{
    is_mediterranean_category, select_mediterranean_foods, serving_size, FoodGroup, CATALOG_LIMIT,
};
pub use tracking::*;
