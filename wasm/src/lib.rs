//! Mediterranean Meal Planner WASM Module
//!
//! This crate provides WebAssembly bindings for the planning engine so
//! targets and plans can be computed in the browser. Structured values
//! cross the boundary as JSON strings.

use chrono::NaiveDate;
use meal_planner_shared::{
    self as shared, validation::validate_biometrics, ActivityLevel, FoodItem, Gender, MealPlanner,
    NutritionProfile,
};
use wasm_bindgen::prelude::*;

/// Calculate BMR with Mifflin-St Jeor
#[wasm_bindgen]
pub fn calculate_bmr(weight_kg: f64, height_cm: f64, age_years: u32, is_male: bool) -> i32 {
    let gender = if is_male { Gender::Male } else { Gender::Female };
    shared::calculate_bmr(weight_kg, height_cm, age_years, gender)
}

/// Calculate TDEE from a BMR and an activity level name such as "moderately_active"
#[wasm_bindgen]
pub fn calculate_tdee(bmr: i32, activity_level: &str) -> Result<i32, JsValue> {
    tdee_for(bmr, activity_level).map_err(|e| JsValue::from_str(&e))
}

/// Daily targets for a profile given as JSON
#[wasm_bindgen]
pub fn calculate_nutrition_targets(profile_json: &str) -> Result<String, JsValue> {
    nutrition_targets_json(profile_json).map_err(|e| JsValue::from_str(&e))
}

/// Score a day's calories against the target, 0-100
#[wasm_bindgen]
pub fn calculate_day_adherence(actual_calories: i32, target_calories: i32) -> f64 {
    shared::calculate_day_adherence(actual_calories, target_calories)
}

/// Plan a week from a JSON catalog, a JSON profile with targets and a YYYY-MM-DD start
#[wasm_bindgen]
pub fn generate_weekly_plan(
    catalog_json: &str,
    profile_json: &str,
    start_date: &str,
) -> Result<String, JsValue> {
    weekly_plan_json(catalog_json, profile_json, start_date).map_err(|e| JsValue::from_str(&e))
}

fn tdee_for(bmr: i32, activity_level: &str) -> Result<i32, String> {
    let level: ActivityLevel =
        serde_json::from_value(serde_json::Value::String(activity_level.to_string()))
            .map_err(|_| format!("Unknown activity level: {}", activity_level))?;
    Ok(shared::calculate_tdee(bmr, level))
}

fn nutrition_targets_json(profile_json: &str) -> Result<String, String> {
    let profile: NutritionProfile = serde_json::from_str(profile_json).map_err(|e| e.to_string())?;
    validate_biometrics(&profile).map_err(|e| e.to_string())?;
    let targets = shared::calculate_nutrition_targets(&profile).map_err(|e| e.to_string())?;
    serde_json::to_string(&targets).map_err(|e| e.to_string())
}

fn weekly_plan_json(catalog_json: &str, profile_json: &str, start_date: &str) -> Result<String, String> {
    let foods: Vec<FoodItem> = serde_json::from_str(catalog_json).map_err(|e| e.to_string())?;
    let profile: NutritionProfile = serde_json::from_str(profile_json).map_err(|e| e.to_string())?;
    let start = NaiveDate::parse_from_str(start_date, "%Y-%m-%d").map_err(|e| e.to_string())?;

    let mediterranean = shared::select_mediterranean_foods(&foods, shared::CATALOG_LIMIT);

    let plan = MealPlanner::new(&mediterranean)
        .generate_week(start, &profile)
        .map_err(|e| e.to_string())?;
    serde_json::to_string(&plan).map_err(|e| e.to_string())
}
