//! Summaries of logged (consumed) meals

use crate::models::MealType;
use crate::nutrition::{sum_nutrition_data, NutritionData};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// A meal the user actually ate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggedMeal {
    pub date: NaiveDate,
    pub meal_type: MealType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub food_id: Option<Uuid>,
    /// Grams
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    pub nutrition: NutritionData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyNutritionSummary {
    pub date: NaiveDate,
    pub total_nutrition: NutritionData,
    /// Only meal types with at least one entry appear
    pub meal_summaries: BTreeMap<MealType, NutritionData>,
    pub meal_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTrendPoint {
    pub date: NaiveDate,
    pub nutrition: NutritionData,
}

/// Sum one day's logged meals per meal type and overall
pub fn daily_nutrition_summary(date: NaiveDate, meals: &[LoggedMeal]) -> DailyNutritionSummary {
    let mut by_meal: BTreeMap<MealType, Vec<NutritionData>> = BTreeMap::new();
    let mut meal_count = 0;

    for meal in meals.iter().filter(|m| m.date == date) {
        by_meal
            .entry(meal.meal_type)
            .or_default()
            .push(meal.nutrition.clone());
        meal_count += 1;
    }

    let meal_summaries: BTreeMap<MealType, NutritionData> = by_meal
        .into_iter()
        .map(|(meal_type, entries)| (meal_type, sum_nutrition_data(&entries)))
        .collect();
    let totals: Vec<NutritionData> = meal_summaries.values().cloned().collect();

    DailyNutritionSummary {
        date,
        total_nutrition: sum_nutrition_data(&totals),
        meal_summaries,
        meal_count,
    }
}

/// Per-date totals for logged meals within `[start, end]`, oldest first
///
/// Dates without entries are omitted.
pub fn weekly_nutrition_trend(
    meals: &[LoggedMeal],
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<DailyTrendPoint> {
    let mut by_date: BTreeMap<NaiveDate, Vec<NutritionData>> = BTreeMap::new();

    for meal in meals.iter().filter(|m| m.date >= start && m.date <= end) {
        by_date.entry(meal.date).or_default().push(meal.nutrition.clone());
    }

    by_date
        .into_iter()
        .map(|(date, entries)| DailyTrendPoint {
            date,
            nutrition: sum_nutrition_data(&entries),
        })
        .collect()
}
