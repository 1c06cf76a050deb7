//! Domain models for the meal planning engine
//!
//! Profiles and food items are owned by the caller and only read here.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;
use validator::Validate;

// ============================================================================
// Profile Types
// ============================================================================

/// Sex category used by the BMR formula
///
/// `Other` shares the female branch of Mifflin-St Jeor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// Activity level for TDEE calculation, least to most active
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Light exercise 1-3 days/week
    #[default]
    LightlyActive,
    /// Moderate exercise 3-5 days/week
    ModeratelyActive,
    /// Hard exercise 6-7 days/week
    VeryActive,
    /// Very hard exercise, physical job
    ExtremelyActive,
}

impl ActivityLevel {
    /// All tiers in ascending order
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::LightlyActive,
        ActivityLevel::ModeratelyActive,
        ActivityLevel::VeryActive,
        ActivityLevel::ExtremelyActive,
    ];

    /// Get the activity multiplier for TDEE calculation
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::LightlyActive => 1.375,
            ActivityLevel::ModeratelyActive => 1.55,
            ActivityLevel::VeryActive => 1.725,
            ActivityLevel::ExtremelyActive => 1.9,
        }
    }

    /// Get a human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Little or no exercise",
            ActivityLevel::LightlyActive => "Light exercise 1-3 days/week",
            ActivityLevel::ModeratelyActive => "Moderate exercise 3-5 days/week",
            ActivityLevel::VeryActive => "Hard exercise 6-7 days/week",
            ActivityLevel::ExtremelyActive => "Very hard exercise or physical job",
        }
    }
}

/// Weight goal driving the calorie adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Goal {
    Lose,
    #[default]
    Maintain,
    Gain,
}

/// Biometric profile plus any targets already stored for the user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct NutritionProfile {
    /// Age in years
    #[validate(range(min = 16, max = 120))]
    pub age: Option<u32>,
    pub gender: Option<Gender>,
    /// Height in centimeters
    #[validate(range(min = 140.0, max = 220.0))]
    pub height_cm: Option<f64>,
    /// Weight in kilograms
    #[validate(range(min = 40.0, max = 300.0))]
    pub weight_kg: Option<f64>,
    #[serde(default)]
    pub activity_level: ActivityLevel,
    #[serde(default)]
    pub goal: Goal,

    #[serde(default)]
    #[validate(range(min = 1000, max = 3000))]
    pub bmr: Option<i32>,
    #[serde(default)]
    #[validate(range(min = 1200, max = 5000))]
    pub tdee: Option<i32>,
    #[serde(default)]
    #[validate(range(min = 1200, max = 5000))]
    pub target_calories: Option<i32>,
    #[serde(default)]
    #[validate(range(min = 50.0, max = 300.0))]
    pub target_protein: Option<f64>,
    #[serde(default)]
    #[validate(range(min = 100.0, max = 500.0))]
    pub target_carbs: Option<f64>,
    #[serde(default)]
    #[validate(range(min = 30.0, max = 200.0))]
    pub target_fat: Option<f64>,
}

// ============================================================================
// Meal Types
// ============================================================================

/// Meal slot within a day
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    /// Meal types in the order a day is planned
    pub const ALL: [MealType; 4] = [
        MealType::Breakfast,
        MealType::Lunch,
        MealType::Dinner,
        MealType::Snack,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MealType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "breakfast" => Ok(MealType::Breakfast),
            "lunch" => Ok(MealType::Lunch),
            "dinner" => Ok(MealType::Dinner),
            "snack" => Ok(MealType::Snack),
            _ => Err(format!(
                "Invalid meal type. Must be one of: {}",
                MealType::ALL.map(|m| m.as_str()).join(", ")
            )),
        }
    }
}

// ============================================================================
// Food Catalog Types
// ============================================================================

/// A catalog food with its nutrient profile per 100 g
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct FoodItem {
    pub id: Uuid,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    /// Free-text category used for keyword matching
    #[validate(length(min = 1, max = 100))]
    pub category: String,
    #[validate(range(min = 0.0, max = 900.0))]
    pub calories_per_100g: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    pub protein_per_100g: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    pub carbs_per_100g: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    pub fat_per_100g: f64,
    #[serde(default)]
    #[validate(range(min = 0.0, max = 50.0))]
    pub fiber_per_100g: Option<f64>,
    #[serde(default)]
    #[validate(range(min = 0.0, max = 100.0))]
    pub sugar_per_100g: Option<f64>,
    /// Sodium in mg per 100 g
    #[serde(default)]
    #[validate(range(min = 0.0, max = 10000.0))]
    pub sodium_per_100g: Option<f64>,
    #[serde(default)]
    pub is_verified: bool,
}

impl FoodItem {
    /// Create an unverified food with the required macros and no optional nutrients
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        calories_per_100g: f64,
        protein_per_100g: f64,
        carbs_per_100g: f64,
        fat_per_100g: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            category: category.into(),
            calories_per_100g,
            protein_per_100g,
            carbs_per_100g,
            fat_per_100g,
            fiber_per_100g: None,
            sugar_per_100g: None,
            sodium_per_100g: None,
            is_verified: false,
        }
    }

    pub fn with_fiber(mut self, fiber_per_100g: f64) -> Self {
        self.fiber_per_100g = Some(fiber_per_100g);
        self
    }

    pub fn with_sugar(mut self, sugar_per_100g: f64) -> Self {
        self.sugar_per_100g = Some(sugar_per_100g);
        self
    }

    pub fn with_sodium(mut self, sodium_per_100g: f64) -> Self {
        self.sodium_per_100g = Some(sodium_per_100g);
        self
    }

    pub fn verified(mut self) -> Self {
        self.is_verified = true;
        self
    }
}
