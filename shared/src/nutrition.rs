//! Nutrition calculations module
//!
//! Energy and macro targets from a biometric profile, per-quantity food
//! nutrition, aggregation, and the per-meal split of a daily target.
//!
//! # Design Principles
//!
//! 1. **Pure Functions**: All calculations are pure, no side effects
//! 2. **Fresh Values**: Every operation returns a new `NutritionData`
//! 3. **Fixed Precision**: Calories and sodium are whole numbers, grams carry one decimal

use crate::errors::NutritionError;
use crate::models::{ActivityLevel, FoodItem, Gender, Goal, MealType, NutritionProfile};
use crate::validation::missing_biometric_fields;
use serde::{Deserialize, Serialize};

/// Fiber recommendation in grams per 1000 kcal
pub const FIBER_G_PER_1000_KCAL: f64 = 14.0;

/// Daily sodium ceiling in mg
pub const SODIUM_TARGET_MG: i32 = 2300;

const PROTEIN_KCAL_PER_G: f64 = 4.0;
const CARBS_KCAL_PER_G: f64 = 4.0;
const FAT_KCAL_PER_G: f64 = 9.0;

/// Round to one decimal place
#[inline]
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

// ============================================================================
// Nutrition Value Types
// ============================================================================

/// Nutrition for a concrete quantity of food, a meal, or a day
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionData {
    /// kcal
    pub calories: i32,
    /// grams
    pub protein: f64,
    /// grams
    pub carbs: f64,
    /// grams
    pub fat: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fiber: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sugar: Option<f64>,
    /// mg
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sodium: Option<i32>,
}

/// Whole-day nutrition goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyNutritionTarget {
    pub calories: i32,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fiber: f64,
    /// mg
    pub sodium: i32,
}

/// Share of calories from each macronutrient, in percent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroDistribution {
    pub protein_percentage: f64,
    pub carbs_percentage: f64,
    pub fat_percentage: f64,
}

impl MacroDistribution {
    /// Mediterranean split: 20% protein, 45% carbs, 35% fat
    pub const fn mediterranean() -> Self {
        Self {
            protein_percentage: 20.0,
            carbs_percentage: 45.0,
            fat_percentage: 35.0,
        }
    }
}

impl Default for MacroDistribution {
    fn default() -> Self {
        Self::mediterranean()
    }
}

/// Macro targets in whole grams
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroTargets {
    pub protein: i32,
    pub carbs: i32,
    pub fat: i32,
}

/// BMR and TDEE alongside the targets derived from them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyBreakdown {
    pub bmr: i32,
    pub tdee: i32,
    pub targets: DailyNutritionTarget,
}

// ============================================================================
// BMR, TDEE and Targets
// ============================================================================

/// Calculate Basal Metabolic Rate using the Mifflin-St Jeor equation
///
/// Men: BMR = 10 × weight(kg) + 6.25 × height(cm) - 5 × age(y) + 5
/// Women: BMR = 10 × weight(kg) + 6.25 × height(cm) - 5 × age(y) - 161
///
/// `Gender::Other` takes the female branch.
pub fn calculate_bmr(weight_kg: f64, height_cm: f64, age_years: u32, gender: Gender) -> i32 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * age_years as f64;
    let bmr = match gender {
        Gender::Male => base + 5.0,
        Gender::Female | Gender::Other => base - 161.0,
    };
    bmr.round() as i32
}

/// Calculate Total Daily Energy Expenditure
///
/// TDEE = BMR × Activity Multiplier
pub fn calculate_tdee(bmr: i32, activity_level: ActivityLevel) -> i32 {
    (bmr as f64 * activity_level.multiplier()).round() as i32
}

/// Adjust TDEE for the weight goal: 20% deficit to lose, 10% surplus to gain
pub fn calculate_target_calories(tdee: i32, goal: Goal) -> i32 {
    match goal {
        Goal::Lose => (tdee as f64 * 0.8).round() as i32,
        Goal::Maintain => tdee,
        Goal::Gain => (tdee as f64 * 1.1).round() as i32,
    }
}

/// Split target calories into macro grams (4/4/9 kcal per gram)
///
/// Uses the Mediterranean distribution when none is given.
pub fn calculate_macro_targets(
    target_calories: i32,
    distribution: Option<&MacroDistribution>,
) -> MacroTargets {
    let macros = distribution.copied().unwrap_or_default();
    let calories = target_calories as f64;

    let protein_calories = calories * (macros.protein_percentage / 100.0);
    let carbs_calories = calories * (macros.carbs_percentage / 100.0);
    let fat_calories = calories * (macros.fat_percentage / 100.0);

    MacroTargets {
        protein: (protein_calories / PROTEIN_KCAL_PER_G).round() as i32,
        carbs: (carbs_calories / CARBS_KCAL_PER_G).round() as i32,
        fat: (fat_calories / FAT_KCAL_PER_G).round() as i32,
    }
}

/// Fiber target for a calorie level: 14 g per 1000 kcal
pub fn calculate_fiber_target(target_calories: i32) -> f64 {
    (target_calories as f64 / 1000.0 * FIBER_G_PER_1000_KCAL).round()
}

/// Calculate BMR, TDEE and daily targets for a profile
///
/// Fails with `IncompleteProfile` if weight, height, age or gender is absent.
pub fn calculate_energy_breakdown(
    profile: &NutritionProfile,
) -> Result<EnergyBreakdown, NutritionError> {
    let (weight_kg, height_cm, age, gender) =
        match (profile.weight_kg, profile.height_cm, profile.age, profile.gender) {
            (Some(w), Some(h), Some(a), Some(g)) => (w, h, a, g),
            _ => {
                return Err(NutritionError::IncompleteProfile {
                    missing: missing_biometric_fields(profile),
                })
            }
        };

    let bmr = calculate_bmr(weight_kg, height_cm, age, gender);
    let tdee = calculate_tdee(bmr, profile.activity_level);
    let calories = calculate_target_calories(tdee, profile.goal);
    let macros = calculate_macro_targets(calories, None);

    Ok(EnergyBreakdown {
        bmr,
        tdee,
        targets: DailyNutritionTarget {
            calories,
            protein: macros.protein as f64,
            carbs: macros.carbs as f64,
            fat: macros.fat as f64,
            fiber: calculate_fiber_target(calories),
            sodium: SODIUM_TARGET_MG,
        },
    })
}

/// Calculate complete daily nutrition targets for a profile
pub fn calculate_nutrition_targets(
    profile: &NutritionProfile,
) -> Result<DailyNutritionTarget, NutritionError> {
    calculate_energy_breakdown(profile).map(|breakdown| breakdown.targets)
}

/// Return a copy of the profile with BMR, TDEE and targets filled in
pub fn apply_targets(profile: &NutritionProfile, breakdown: &EnergyBreakdown) -> NutritionProfile {
    NutritionProfile {
        bmr: Some(breakdown.bmr),
        tdee: Some(breakdown.tdee),
        target_calories: Some(breakdown.targets.calories),
        target_protein: Some(breakdown.targets.protein),
        target_carbs: Some(breakdown.targets.carbs),
        target_fat: Some(breakdown.targets.fat),
        ..profile.clone()
    }
}

// ============================================================================
// Food Nutrition
// ============================================================================

/// Scale a food's per-100g profile to a quantity in grams
pub fn calculate_food_nutrition(food: &FoodItem, quantity_grams: f64) -> NutritionData {
    let factor = quantity_grams / 100.0;

    NutritionData {
        calories: (food.calories_per_100g * factor).round() as i32,
        protein: round_to_tenth(food.protein_per_100g * factor),
        carbs: round_to_tenth(food.carbs_per_100g * factor),
        fat: round_to_tenth(food.fat_per_100g * factor),
        fiber: food.fiber_per_100g.map(|v| round_to_tenth(v * factor)),
        sugar: food.sugar_per_100g.map(|v| round_to_tenth(v * factor)),
        sodium: food.sodium_per_100g.map(|v| (v * factor).round() as i32),
    }
}

/// Combine two optional amounts: add when both exist, otherwise keep whichever exists
fn merge_optional<T>(a: Option<T>, b: Option<T>, add: impl FnOnce(T, T) -> T) -> Option<T> {
    match (a, b) {
        (Some(x), Some(y)) => Some(add(x, y)),
        (x, None) => x,
        (None, y) => y,
    }
}

/// Sum nutrition values element-wise
///
/// Optional fields prefer the present value rather than treating a missing
/// value as zero. An empty slice sums to zero with no optional fields.
pub fn sum_nutrition_data(nutrition: &[NutritionData]) -> NutritionData {
    nutrition.iter().fold(NutritionData::default(), |total, n| NutritionData {
        calories: total.calories + n.calories,
        protein: round_to_tenth(total.protein + n.protein),
        carbs: round_to_tenth(total.carbs + n.carbs),
        fat: round_to_tenth(total.fat + n.fat),
        fiber: merge_optional(total.fiber, n.fiber, |a, b| round_to_tenth(a + b)),
        sugar: merge_optional(total.sugar, n.sugar, |a, b| round_to_tenth(a + b)),
        sodium: merge_optional(total.sodium, n.sodium, |a, b| a + b),
    })
}

// ============================================================================
// Meal Distribution
// ============================================================================

impl MealType {
    /// Share of the daily target assigned to this meal
    pub fn distribution_factor(&self) -> f64 {
        match self {
            MealType::Breakfast => 0.25,
            MealType::Lunch => 0.35,
            MealType::Dinner => 0.30,
            MealType::Snack => 0.10,
        }
    }
}

/// Calculate the portion of a daily target that falls to one meal
pub fn calculate_meal_targets(daily: &DailyNutritionTarget, meal_type: MealType) -> NutritionData {
    let factor = meal_type.distribution_factor();

    NutritionData {
        calories: (daily.calories as f64 * factor).round() as i32,
        protein: round_to_tenth(daily.protein * factor),
        carbs: round_to_tenth(daily.carbs * factor),
        fat: round_to_tenth(daily.fat * factor),
        fiber: Some(round_to_tenth(daily.fiber * factor)),
        sugar: None,
        sodium: Some((daily.sodium as f64 * factor).round() as i32),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn sample_profile() -> NutritionProfile {
        NutritionProfile {
            age: Some(30),
            gender: Some(Gender::Male),
            height_cm: Some(175.0),
            weight_kg: Some(70.0),
            activity_level: ActivityLevel::ModeratelyActive,
            goal: Goal::Maintain,
            ..Default::default()
        }
    }

    // =========================================================================
    // BMR/TDEE Tests
    // =========================================================================

    #[rstest]
    #[case(70.0, 175.0, 30, Gender::Male, 1649)]
    #[case(60.0, 165.0, 25, Gender::Female, 1345)]
    #[case(60.0, 165.0, 25, Gender::Other, 1345)]
    fn test_bmr_mifflin(
        #[case] weight: f64,
        #[case] height: f64,
        #[case] age: u32,
        #[case] gender: Gender,
        #[case] expected: i32,
    ) {
        assert_eq!(calculate_bmr(weight, height, age, gender), expected);
    }

    #[test]
    fn test_tdee_increases_with_each_tier() {
        let tdees: Vec<i32> = ActivityLevel::ALL
            .iter()
            .map(|level| calculate_tdee(1649, *level))
            .collect();
        assert!(tdees.windows(2).all(|w| w[0] < w[1]), "{:?}", tdees);
        assert_eq!(tdees[2], 2556);
    }

    #[test]
    fn test_target_calories_by_goal() {
        assert_eq!(calculate_target_calories(2556, Goal::Lose), 2045);
        assert_eq!(calculate_target_calories(2556, Goal::Maintain), 2556);
        assert_eq!(calculate_target_calories(2556, Goal::Gain), 2812);
    }

    #[test]
    fn test_macro_targets_default_distribution() {
        let macros = calculate_macro_targets(2000, None);
        assert_eq!(
            macros,
            MacroTargets {
                protein: 100,
                carbs: 225,
                fat: 78
            }
        );
    }

    #[test]
    fn test_macro_targets_custom_distribution() {
        let distribution = MacroDistribution {
            protein_percentage: 30.0,
            carbs_percentage: 40.0,
            fat_percentage: 30.0,
        };
        let macros = calculate_macro_targets(2000, Some(&distribution));
        assert_eq!(macros.protein, 150);
        assert_eq!(macros.carbs, 200);
        assert_eq!(macros.fat, 67);
    }

    #[test]
    fn test_full_profile_scenario() {
        let breakdown = calculate_energy_breakdown(&sample_profile()).unwrap();
        assert_eq!(breakdown.bmr, 1649);
        assert_eq!(breakdown.tdee, 2556);
        assert_eq!(breakdown.targets.calories, 2556);
        assert_eq!(breakdown.targets.protein, 128.0);
        assert_eq!(breakdown.targets.carbs, 288.0);
        assert_eq!(breakdown.targets.fat, 99.0);
        assert_eq!(breakdown.targets.fiber, 36.0);
        assert_eq!(breakdown.targets.sodium, 2300);
    }

    #[test]
    fn test_incomplete_profile_fails() {
        let profile = NutritionProfile {
            weight_kg: None,
            gender: None,
            ..sample_profile()
        };
        match calculate_nutrition_targets(&profile) {
            Err(NutritionError::IncompleteProfile { missing }) => {
                assert_eq!(missing, vec!["Current Weight", "Biological Sex"]);
            }
            other => panic!("expected IncompleteProfile, got {:?}", other),
        }
    }

    #[test]
    fn test_apply_targets_fills_profile() {
        let profile = sample_profile();
        let breakdown = calculate_energy_breakdown(&profile).unwrap();
        let updated = apply_targets(&profile, &breakdown);
        assert_eq!(updated.bmr, Some(1649));
        assert_eq!(updated.tdee, Some(2556));
        assert_eq!(updated.target_calories, Some(2556));
        assert_eq!(updated.target_fat, Some(99.0));
        assert_eq!(updated.age, profile.age);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: maintenance equals TDEE and lose < maintain < gain
        #[test]
        fn prop_goal_ordering(tdee in 1200i32..5000) {
            let lose = calculate_target_calories(tdee, Goal::Lose);
            let maintain = calculate_target_calories(tdee, Goal::Maintain);
            let gain = calculate_target_calories(tdee, Goal::Gain);
            prop_assert_eq!(maintain, tdee);
            prop_assert!(lose < maintain && maintain < gain);
        }

        /// Property: TDEE strictly increases across activity tiers
        #[test]
        fn prop_tdee_monotonic(bmr in 1000i32..3000) {
            let tdees: Vec<i32> = ActivityLevel::ALL
                .iter()
                .map(|level| calculate_tdee(bmr, *level))
                .collect();
            prop_assert!(tdees.windows(2).all(|w| w[0] < w[1]));
        }

        /// Property: male BMR is exactly 166 kcal above female for the same stats
        #[test]
        fn prop_male_female_offset(
            weight in 40.0f64..150.0,
            height in 140.0f64..210.0,
            age in 16u32..90
        ) {
            let male = calculate_bmr(weight, height, age, Gender::Male);
            let female = calculate_bmr(weight, height, age, Gender::Female);
            prop_assert!((male - female - 166).abs() <= 1);
        }
    }

    // =========================================================================
    // Food Nutrition Tests
    // =========================================================================

    fn salmon() -> FoodItem {
        FoodItem::new("Atlantic Salmon", "fish", 208.0, 20.4, 0.0, 13.4)
            .with_sodium(59.0)
            .verified()
    }

    fn lentils() -> FoodItem {
        FoodItem::new("Cooked Lentils", "legumes", 116.0, 9.0, 20.1, 0.4)
            .with_fiber(7.9)
            .with_sugar(1.8)
    }

    #[test]
    fn test_scale_food() {
        let n = calculate_food_nutrition(&salmon(), 150.0);
        assert_eq!(n.calories, 312);
        assert_eq!(n.protein, 30.6);
        assert_eq!(n.carbs, 0.0);
        assert_eq!(n.fat, 20.1);
        assert_eq!(n.fiber, None);
        assert_eq!(n.sugar, None);
        assert_eq!(n.sodium, Some(89));
    }

    #[test]
    fn test_scale_zero_quantity() {
        let n = calculate_food_nutrition(&lentils(), 0.0);
        assert_eq!(n.calories, 0);
        assert_eq!(n.protein, 0.0);
        assert_eq!(n.carbs, 0.0);
        assert_eq!(n.fat, 0.0);
        assert_eq!(n.fiber, Some(0.0));
    }

    #[test]
    fn test_sum_empty_is_zero() {
        let total = sum_nutrition_data(&[]);
        assert_eq!(total, NutritionData::default());
        assert_eq!(total.fiber, None);
        assert_eq!(total.sugar, None);
        assert_eq!(total.sodium, None);
    }

    #[test]
    fn test_sum_propagates_present_optional_values() {
        let fish = calculate_food_nutrition(&salmon(), 100.0);
        let beans = calculate_food_nutrition(&lentils(), 100.0);
        let total = sum_nutrition_data(&[fish, beans]);

        assert_eq!(total.calories, 324);
        assert_eq!(total.protein, 29.4);
        assert_eq!(total.carbs, 20.1);
        assert_eq!(total.fat, 13.8);
        // Only lentils carry fiber and sugar, only salmon carries sodium
        assert_eq!(total.fiber, Some(7.9));
        assert_eq!(total.sugar, Some(1.8));
        assert_eq!(total.sodium, Some(59));
    }

    #[test]
    fn test_sum_adds_when_both_present() {
        let a = NutritionData {
            calories: 100,
            fiber: Some(1.25),
            sodium: Some(10),
            ..Default::default()
        };
        let b = NutritionData {
            calories: 50,
            fiber: Some(2.0),
            sodium: Some(5),
            ..Default::default()
        };
        let total = sum_nutrition_data(&[a, b]);
        assert_eq!(total.calories, 150);
        assert_eq!(total.fiber, Some(3.3));
        assert_eq!(total.sodium, Some(15));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: scale(q1 + q2) matches scale(q1) + scale(q2) within one unit per field
        #[test]
        fn prop_scaling_linearity(
            cal in 0.0f64..900.0,
            protein in 0.0f64..100.0,
            carbs in 0.0f64..100.0,
            fat in 0.0f64..100.0,
            fiber in 0.0f64..50.0,
            sodium in 0.0f64..2000.0,
            q1 in 1.0f64..500.0,
            q2 in 1.0f64..500.0
        ) {
            let food = FoodItem::new("Food", "vegetables", cal, protein, carbs, fat)
                .with_fiber(fiber)
                .with_sodium(sodium);
            let whole = calculate_food_nutrition(&food, q1 + q2);
            let parts = sum_nutrition_data(&[
                calculate_food_nutrition(&food, q1),
                calculate_food_nutrition(&food, q2),
            ]);

            prop_assert!((whole.calories - parts.calories).abs() <= 1);
            prop_assert!((whole.protein - parts.protein).abs() <= 1.0);
            prop_assert!((whole.carbs - parts.carbs).abs() <= 1.0);
            prop_assert!((whole.fat - parts.fat).abs() <= 1.0);
            prop_assert!((whole.fiber.unwrap() - parts.fiber.unwrap()).abs() <= 1.0);
            prop_assert!((whole.sodium.unwrap() - parts.sodium.unwrap()).abs() <= 1);
        }

        /// Property: scaled nutrition is never negative
        #[test]
        fn prop_scaled_values_non_negative(
            cal in 0.0f64..900.0,
            protein in 0.0f64..100.0,
            grams in 0.0f64..2000.0
        ) {
            let food = FoodItem::new("Food", "fruits", cal, protein, 0.0, 0.0);
            let n = calculate_food_nutrition(&food, grams);
            prop_assert!(n.calories >= 0);
            prop_assert!(n.protein >= 0.0);
        }
    }

    // =========================================================================
    // Meal Distribution Tests
    // =========================================================================

    fn daily_target() -> DailyNutritionTarget {
        DailyNutritionTarget {
            calories: 2000,
            protein: 100.0,
            carbs: 225.0,
            fat: 78.0,
            fiber: 28.0,
            sodium: 2300,
        }
    }

    #[test]
    fn test_distribution_sums_to_one() {
        let total: f64 = MealType::ALL.iter().map(|m| m.distribution_factor()).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[rstest]
    #[case(MealType::Breakfast, 500, 25.0, 56.3, 19.5, 575)]
    #[case(MealType::Lunch, 700, 35.0, 78.8, 27.3, 805)]
    #[case(MealType::Dinner, 600, 30.0, 67.5, 23.4, 690)]
    #[case(MealType::Snack, 200, 10.0, 22.5, 7.8, 230)]
    fn test_meal_targets(
        #[case] meal_type: MealType,
        #[case] calories: i32,
        #[case] protein: f64,
        #[case] carbs: f64,
        #[case] fat: f64,
        #[case] sodium: i32,
    ) {
        let target = calculate_meal_targets(&daily_target(), meal_type);
        assert_eq!(target.calories, calories);
        assert_eq!(target.protein, protein);
        assert_eq!(target.carbs, carbs);
        assert_eq!(target.fat, fat);
        assert_eq!(target.sodium, Some(sodium));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: meal calorie targets add back up to the daily target
        #[test]
        fn prop_meal_distribution_conservation(calories in 1200i32..5000) {
            let daily = DailyNutritionTarget {
                calories,
                ..daily_target()
            };
            let total: i32 = MealType::ALL
                .iter()
                .map(|m| calculate_meal_targets(&daily, *m).calories)
                .sum();
            prop_assert!((total - calories).abs() <= 2,
                "meal targets sum to {} for daily {}", total, calories);
        }
    }
}
