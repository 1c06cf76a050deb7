//! Mediterranean food taxonomy
//!
//! Food groups are recognised by keyword: a food belongs to a group when its
//! free-text category contains one of the group's keywords, ignoring case.

use crate::models::{FoodItem, MealType};
use serde::{Deserialize, Serialize};

/// Mediterranean food group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoodGroup {
    Vegetables,
    Fruits,
    WholeGrains,
    Legumes,
    NutsSeeds,
    FishSeafood,
    Poultry,
    Dairy,
    /// Catalog filter only, never scored
    HerbsSpices,
}

impl FoodGroup {
    pub const ALL: [FoodGroup; 9] = [
        FoodGroup::Vegetables,
        FoodGroup::Fruits,
        FoodGroup::WholeGrains,
        FoodGroup::Legumes,
        FoodGroup::NutsSeeds,
        FoodGroup::FishSeafood,
        FoodGroup::Poultry,
        FoodGroup::Dairy,
        FoodGroup::HerbsSpices,
    ];

    /// Category keywords that place a food in this group
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            FoodGroup::Vegetables => &[
                "vegetables",
                "leafy greens",
                "tomatoes",
                "peppers",
                "onions",
                "garlic",
            ],
            FoodGroup::Fruits => &["fruits", "berries", "citrus", "stone fruits", "melons"],
            FoodGroup::WholeGrains => &[
                "whole grains",
                "oats",
                "quinoa",
                "brown rice",
                "whole wheat",
            ],
            FoodGroup::Legumes => &["legumes", "beans", "lentils", "chickpeas", "peas"],
            FoodGroup::NutsSeeds => &[
                "nuts",
                "seeds",
                "almonds",
                "walnuts",
                "pistachios",
                "olive oil",
            ],
            FoodGroup::FishSeafood => &[
                "fish",
                "seafood",
                "salmon",
                "sardines",
                "tuna",
                "shellfish",
            ],
            FoodGroup::Poultry => &["poultry", "chicken", "turkey"],
            FoodGroup::Dairy => &["dairy", "yogurt", "cheese", "milk"],
            FoodGroup::HerbsSpices => &["herbs", "spices", "basil", "oregano", "thyme", "rosemary"],
        }
    }

    /// Whether a category string falls in this group
    pub fn matches(&self, category: &str) -> bool {
        let category = category.to_lowercase();
        self.keywords().iter().any(|kw| category.contains(kw))
    }

    /// Base portion in grams for a single serving
    pub fn serving_grams(&self) -> f64 {
        match self {
            FoodGroup::Vegetables => 150.0,
            FoodGroup::Fruits => 120.0,
            FoodGroup::FishSeafood => 120.0,
            FoodGroup::Poultry => 100.0,
            FoodGroup::WholeGrains => 80.0,
            FoodGroup::Legumes => 80.0,
            FoodGroup::NutsSeeds => 30.0,
            FoodGroup::Dairy => 150.0,
            FoodGroup::HerbsSpices => DEFAULT_SERVING_GRAMS,
        }
    }
}

/// Portion used when no group matches
pub const DEFAULT_SERVING_GRAMS: f64 = 100.0;

/// Groups checked for portion sizes, first match wins
const SERVING_ORDER: [FoodGroup; 8] = [
    FoodGroup::Vegetables,
    FoodGroup::Fruits,
    FoodGroup::FishSeafood,
    FoodGroup::Poultry,
    FoodGroup::WholeGrains,
    FoodGroup::Legumes,
    FoodGroup::NutsSeeds,
    FoodGroup::Dairy,
];

/// Whether a category belongs to any Mediterranean group, herbs included
pub fn is_mediterranean_category(category: &str) -> bool {
    FoodGroup::ALL.iter().any(|group| group.matches(category))
}

/// Foods fetched from a catalog for one planning call
pub const CATALOG_LIMIT: usize = 200;

/// Mediterranean foods from a catalog, verified first then by name, at most `limit`
pub fn select_mediterranean_foods<'a>(
    foods: impl IntoIterator<Item = &'a FoodItem>,
    limit: usize,
) -> Vec<FoodItem> {
    let mut matching: Vec<FoodItem> = foods
        .into_iter()
        .filter(|food| is_mediterranean_category(&food.category))
        .cloned()
        .collect();

    matching.sort_by(|a, b| {
        b.is_verified
            .cmp(&a.is_verified)
            .then_with(|| a.name.cmp(&b.name))
    });
    matching.truncate(limit);
    matching
}

/// Scale applied to portions for each meal
pub fn meal_portion_factor(meal_type: MealType) -> f64 {
    match meal_type {
        MealType::Breakfast => 0.8,
        MealType::Lunch => 1.0,
        MealType::Dinner => 1.1,
        MealType::Snack => 0.5,
    }
}

/// Serving size in grams for a food at a given meal
pub fn serving_size(food: &FoodItem, meal_type: MealType) -> f64 {
    let base = SERVING_ORDER
        .iter()
        .find(|group| group.matches(&food.category))
        .map(FoodGroup::serving_grams)
        .unwrap_or(DEFAULT_SERVING_GRAMS);
    base * meal_portion_factor(meal_type)
}
