//! Adherence scoring
//!
//! How closely consumed or planned nutrition tracks its target, on a 0-100 scale.

use crate::nutrition::{sum_nutrition_data, MacroDistribution, NutritionData};

/// Score a ratio against a target, or `None` when the target is not positive
fn ratio(actual: f64, target: f64) -> Option<f64> {
    (target > 0.0).then(|| actual / target)
}

/// Without a positive target, only an empty intake counts as on target
fn score_without_target(actual: f64) -> f64 {
    if actual == 0.0 {
        100.0
    } else {
        0.0
    }
}

/// Calorie adherence for a planned day
///
/// `max(0, min(100, 100 - |(day / target - 1) × 100|))`, unrounded.
pub fn calculate_day_adherence(day_calories: i32, target_calories: i32) -> f64 {
    match ratio(day_calories as f64, target_calories as f64) {
        Some(r) => (100.0 - ((r - 1.0) * 100.0).abs()).clamp(0.0, 100.0),
        None => score_without_target(day_calories as f64),
    }
}

fn banded_score(actual: f64, target: f64, band: f64, weight: f64) -> f64 {
    match ratio(actual, target) {
        Some(r) if (1.0 - band..=1.0 + band).contains(&r) => 100.0,
        Some(r) => (100.0 - ((r - 1.0) * weight).abs()).max(0.0),
        None => score_without_target(actual),
    }
}

/// Multi-macro adherence of consumed nutrition against targets
///
/// Mean of four sub-scores, rounded:
/// - calories: 100 within ±10%, else `max(0, 100 - |r - 1| × 100)`
/// - protein: 100 at or above target, else `r × 100`
/// - carbs and fat: 100 within ±20%, else `max(0, 100 - |r - 1| × 50)`
pub fn calculate_adherence_score(consumed: &NutritionData, targets: &NutritionData) -> i32 {
    let calories = banded_score(
        consumed.calories as f64,
        targets.calories as f64,
        0.1,
        100.0,
    );
    let protein = match ratio(consumed.protein, targets.protein) {
        Some(r) if r >= 1.0 => 100.0,
        Some(r) => r * 100.0,
        None => score_without_target(consumed.protein),
    };
    let carbs = banded_score(consumed.carbs, targets.carbs, 0.2, 50.0);
    let fat = banded_score(consumed.fat, targets.fat, 0.2, 50.0);

    ((calories + protein + carbs + fat) / 4.0).round() as i32
}

/// Mediterranean macro score of a set of meals
///
/// Compares each macro's share of energy against the 20/45/35 split. Deviations
/// cost 2 points per percentage point for protein and 1.5 for carbs and fat.
/// Returns 0 when the meals carry no calories.
pub fn calculate_mediterranean_score(nutrition: &[NutritionData]) -> i32 {
    let total = sum_nutrition_data(nutrition);
    if total.calories == 0 {
        return 0;
    }
    let calories = total.calories as f64;
    let ideal = MacroDistribution::mediterranean();

    let protein_pct = total.protein * 4.0 / calories * 100.0;
    let carbs_pct = total.carbs * 4.0 / calories * 100.0;
    let fat_pct = total.fat * 9.0 / calories * 100.0;

    let protein = (100.0 - (protein_pct - ideal.protein_percentage).abs() * 2.0).max(0.0);
    let carbs = (100.0 - (carbs_pct - ideal.carbs_percentage).abs() * 1.5).max(0.0);
    let fat = (100.0 - (fat_pct - ideal.fat_percentage).abs() * 1.5).max(0.0);

    ((protein + carbs + fat) / 3.0).round() as i32
}
