//! Mediterranean food scoring
//!
//! Heuristic ranking of catalog foods for a meal. Every bonus or penalty
//! records a reason so callers can explain a recommendation.

use crate::models::{FoodItem, MealType};
use crate::nutrition::{calculate_food_nutrition, NutritionData};
use crate::taxonomy::FoodGroup;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Reference quantity for nutrient thresholds
const REFERENCE_GRAMS: f64 = 100.0;

/// A food with its heuristic score for one meal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodScore {
    pub food: FoodItem,
    pub score: u32,
    pub reasons: Vec<String>,
}

/// Group bonuses applied regardless of meal, in evaluation order
const GROUP_BONUSES: [(FoodGroup, i32, &str); 6] = [
    (FoodGroup::Vegetables, 30, "Rich in vegetables"),
    (FoodGroup::Fruits, 25, "Mediterranean fruit"),
    (FoodGroup::FishSeafood, 35, "Healthy seafood"),
    (FoodGroup::WholeGrains, 20, "Whole grains"),
    (FoodGroup::Legumes, 25, "Plant protein"),
    (FoodGroup::NutsSeeds, 20, "Healthy fats"),
];

/// Extra bonuses for groups that suit a particular meal
fn meal_bonuses(meal_type: MealType) -> [(FoodGroup, i32, &'static str); 2] {
    match meal_type {
        MealType::Breakfast => [
            (FoodGroup::WholeGrains, 10, "Great for breakfast"),
            (FoodGroup::Fruits, 10, "Perfect breakfast fruit"),
        ],
        MealType::Lunch => [
            (FoodGroup::Vegetables, 10, "Ideal lunch vegetable"),
            (FoodGroup::Legumes, 10, "Satisfying lunch protein"),
        ],
        MealType::Dinner => [
            (FoodGroup::FishSeafood, 15, "Perfect dinner protein"),
            (FoodGroup::Vegetables, 10, "Essential dinner vegetables"),
        ],
        MealType::Snack => [
            (FoodGroup::NutsSeeds, 15, "Perfect healthy snack"),
            (FoodGroup::Fruits, 12, "Ideal snack fruit"),
        ],
    }
}

struct Tally {
    score: i32,
    reasons: Vec<String>,
}

impl Tally {
    fn add(&mut self, points: i32, reason: &str) {
        self.score += points;
        self.reasons.push(reason.to_string());
    }
}

/// Score a single food for a meal type
pub fn score_food(food: &FoodItem, meal_type: MealType) -> FoodScore {
    let mut tally = Tally {
        score: 0,
        reasons: Vec::new(),
    };

    for (group, points, reason) in GROUP_BONUSES {
        if group.matches(&food.category) {
            tally.add(points, reason);
        }
    }

    let reference = calculate_food_nutrition(food, REFERENCE_GRAMS);

    if reference.protein > 15.0 {
        tally.add(15, "High protein");
    } else if reference.protein > 8.0 {
        tally.add(8, "Good protein");
    }

    match reference.fiber {
        Some(fiber) if fiber > 5.0 => tally.add(15, "High fiber"),
        Some(fiber) if fiber > 3.0 => tally.add(8, "Good fiber"),
        _ => {}
    }

    if reference.calories < 100 {
        tally.add(10, "Low calorie density");
    } else if reference.calories > 400 {
        tally.add(-10, "High calorie density");
    }

    for (group, points, reason) in meal_bonuses(meal_type) {
        if group.matches(&food.category) {
            tally.add(points, reason);
        }
    }

    let name = food.name.to_lowercase();
    if name.contains("processed") || name.contains("refined") {
        tally.add(-20, "Avoid processed foods");
    }

    if food.is_verified {
        tally.add(5, "Verified nutrition data");
    }

    FoodScore {
        food: food.clone(),
        score: tally.score.max(0) as u32,
        reasons: tally.reasons,
    }
}

/// Score and rank foods for a meal, best first
///
/// Ties keep catalog order. The target is accepted for interface stability;
/// ranking does not depend on it.
pub fn score_foods_for_meal(
    foods: &[FoodItem],
    meal_type: MealType,
    _target: &NutritionData,
) -> Vec<FoodScore> {
    let mut scored: Vec<FoodScore> = foods.iter().map(|f| score_food(f, meal_type)).collect();
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    debug!(meal_type = %meal_type, candidates = scored.len(), "Scored foods for meal");
    scored
}
