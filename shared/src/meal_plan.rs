//! Greedy meal assembly and weekly planning
//!
//! The planner borrows a catalog snapshot and never mutates it. Meals are
//! filled from the best-scored foods until the calorie target is nearly met.

use crate::adherence::calculate_day_adherence;
use crate::errors::NutritionError;
use crate::models::{FoodItem, MealType, NutritionProfile};
use crate::nutrition::{
    calculate_fiber_target, calculate_food_nutrition, calculate_meal_targets, round_to_tenth,
    sum_nutrition_data, DailyNutritionTarget, NutritionData, SODIUM_TARGET_MG,
};
use crate::scoring::{score_foods_for_meal, FoodScore};
use crate::taxonomy::serving_size;
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

/// Candidates considered per meal
pub const RECOMMENDATION_LIMIT: usize = 20;
/// Share of the calorie target at which a meal counts as complete
pub const CALORIE_FILL_RATIO: f64 = 0.95;
/// Most items in one meal
pub const MAX_ITEMS_PER_MEAL: usize = 5;
/// Portions below this many grams are dropped
pub const MIN_PORTION_GRAMS: f64 = 10.0;
/// Days in a weekly plan
pub const DAYS_PER_WEEK: u32 = 7;

// ============================================================================
// Plan Types
// ============================================================================

/// A portion of one food within a meal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealPlanItem {
    pub food_id: Uuid,
    /// Grams, unrounded
    pub quantity: f64,
    pub nutrition: NutritionData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealPlanMeal {
    pub meal_type: MealType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub items: Vec<MealPlanItem>,
    pub total_nutrition: NutritionData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayMealPlan {
    pub date: NaiveDate,
    /// Breakfast, lunch, dinner, snack
    pub meals: Vec<MealPlanMeal>,
    pub total_nutrition: NutritionData,
    /// 0-100
    pub adherence_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyMealPlan {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub days: Vec<DayMealPlan>,
    pub average_nutrition: NutritionData,
    pub average_adherence_score: i32,
}

// ============================================================================
// Targets
// ============================================================================

/// Daily target built from the targets stored on a profile
///
/// All four stored targets must be present and positive. Fiber is derived
/// from calories and sodium is the fixed ceiling.
pub fn daily_targets_from_profile(
    profile: &NutritionProfile,
) -> Result<DailyNutritionTarget, NutritionError> {
    match (
        profile.target_calories.filter(|v| *v > 0),
        profile.target_protein.filter(|v| *v > 0.0),
        profile.target_carbs.filter(|v| *v > 0.0),
        profile.target_fat.filter(|v| *v > 0.0),
    ) {
        (Some(calories), Some(protein), Some(carbs), Some(fat)) => Ok(DailyNutritionTarget {
            calories,
            protein,
            carbs,
            fat,
            fiber: calculate_fiber_target(calories),
            sodium: SODIUM_TARGET_MG,
        }),
        _ => Err(NutritionError::MissingNutritionTargets),
    }
}

// ============================================================================
// Planner
// ============================================================================

/// Plans meals from an immutable catalog snapshot
#[derive(Debug, Clone, Copy)]
pub struct MealPlanner<'a> {
    catalog: &'a [FoodItem],
    recommendation_limit: usize,
}

impl<'a> MealPlanner<'a> {
    pub fn new(catalog: &'a [FoodItem]) -> Self {
        Self {
            catalog,
            recommendation_limit: RECOMMENDATION_LIMIT,
        }
    }

    pub fn with_recommendation_limit(mut self, limit: usize) -> Self {
        self.recommendation_limit = limit;
        self
    }

    pub fn catalog(&self) -> &'a [FoodItem] {
        self.catalog
    }

    /// Best-scored foods for a meal, excluding the given ids
    pub fn recommend(
        &self,
        meal_type: MealType,
        target: &NutritionData,
        exclude_ids: &[Uuid],
    ) -> Vec<FoodScore> {
        let available: Vec<FoodItem> = self
            .catalog
            .iter()
            .filter(|food| !exclude_ids.contains(&food.id))
            .cloned()
            .collect();

        let mut scored = score_foods_for_meal(&available, meal_type, target);
        scored.truncate(self.recommendation_limit);
        scored
    }

    /// Greedily portion recommended foods toward the meal's calorie target
    pub fn assemble_meal(&self, meal_type: MealType, target: &NutritionData) -> MealPlanMeal {
        let recommendations = self.recommend(meal_type, target, &[]);
        let target_calories = target.calories as f64;

        let mut items: Vec<MealPlanItem> = Vec::new();
        let mut current = NutritionData::default();

        for FoodScore { food, .. } in &recommendations {
            if current.calories as f64 >= target_calories * CALORIE_FILL_RATIO {
                break;
            }

            let mut quantity = serving_size(food, meal_type);
            if food.calories_per_100g > 0.0 {
                let remaining = target_calories - current.calories as f64;
                quantity = quantity.min(remaining / food.calories_per_100g * 100.0);
            }

            if quantity < MIN_PORTION_GRAMS {
                continue;
            }

            let nutrition = calculate_food_nutrition(food, quantity);
            current = sum_nutrition_data(&[current, nutrition.clone()]);
            items.push(MealPlanItem {
                food_id: food.id,
                quantity,
                nutrition,
            });

            if items.len() >= MAX_ITEMS_PER_MEAL {
                break;
            }
        }

        debug!(
            meal_type = %meal_type,
            candidates = recommendations.len(),
            items = items.len(),
            calories = current.calories,
            target_calories = target.calories,
            "Assembled meal"
        );

        MealPlanMeal {
            meal_type,
            name: None,
            items,
            total_nutrition: current,
        }
    }

    /// Plan all four meals for one day
    pub fn generate_day(&self, date: NaiveDate, daily: &DailyNutritionTarget) -> DayMealPlan {
        let meals: Vec<MealPlanMeal> = MealType::ALL
            .iter()
            .map(|meal_type| {
                let target = calculate_meal_targets(daily, *meal_type);
                self.assemble_meal(*meal_type, &target)
            })
            .collect();

        let totals: Vec<NutritionData> = meals.iter().map(|m| m.total_nutrition.clone()).collect();
        let total_nutrition = sum_nutrition_data(&totals);
        let adherence_score = calculate_day_adherence(total_nutrition.calories, daily.calories);

        DayMealPlan {
            date,
            meals,
            total_nutrition,
            adherence_score,
        }
    }

    /// Plan seven consecutive days from the targets stored on a profile
    pub fn generate_week(
        &self,
        start_date: NaiveDate,
        profile: &NutritionProfile,
    ) -> Result<WeeklyMealPlan, NutritionError> {
        let daily = daily_targets_from_profile(profile)?;

        let days: Vec<DayMealPlan> = (0..DAYS_PER_WEEK)
            .map(|offset| self.generate_day(start_date + Duration::days(offset as i64), &daily))
            .collect();

        let average_nutrition = average_day_nutrition(&days);
        let average_adherence_score = (days.iter().map(|d| d.adherence_score).sum::<f64>()
            / DAYS_PER_WEEK as f64)
            .round() as i32;

        debug!(
            start_date = %start_date,
            average_calories = average_nutrition.calories,
            average_adherence_score,
            "Generated weekly plan"
        );

        Ok(WeeklyMealPlan {
            start_date,
            end_date: start_date + Duration::days(DAYS_PER_WEEK as i64 - 1),
            days,
            average_nutrition,
            average_adherence_score,
        })
    }
}

/// Per-day average over a week: calories whole, macros to one decimal
fn average_day_nutrition(days: &[DayMealPlan]) -> NutritionData {
    let n = DAYS_PER_WEEK as f64;
    let sum = |f: fn(&NutritionData) -> f64| -> f64 {
        days.iter().map(|d| f(&d.total_nutrition)).sum::<f64>()
    };

    NutritionData {
        calories: (sum(|t| t.calories as f64) / n).round() as i32,
        protein: round_to_tenth(sum(|t| t.protein) / n),
        carbs: round_to_tenth(sum(|t| t.carbs) / n),
        fat: round_to_tenth(sum(|t| t.fat) / n),
        fiber: None,
        sugar: None,
        sodium: None,
    }
}
