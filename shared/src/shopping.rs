//! Shopping list generation
//!
//! Turns planned or habitually logged foods into a grouped list with
//! store-friendly units.

use crate::meal_plan::WeeklyMealPlan;
use crate::models::FoodItem;
use crate::nutrition::round_to_tenth;
use crate::tracking::LoggedMeal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;
use uuid::Uuid;

pub const FRESH_PRODUCE: &str = "Fresh Produce";
pub const MEAT_SEAFOOD: &str = "Meat & Seafood";
pub const DAIRY_EGGS: &str = "Dairy & Eggs";
pub const PANTRY: &str = "Pantry & Dry Goods";
pub const BAKERY: &str = "Bakery";
pub const BEVERAGES: &str = "Beverages";
pub const FROZEN: &str = "Frozen Foods";
pub const OTHER: &str = "Other";

/// Food category keyword to store aisle, first match wins
const SHOPPING_CATEGORIES: [(&str, &str); 29] = [
    ("vegetables", FRESH_PRODUCE),
    ("fruits", FRESH_PRODUCE),
    ("leafy greens", FRESH_PRODUCE),
    ("herbs", FRESH_PRODUCE),
    ("fish", MEAT_SEAFOOD),
    ("seafood", MEAT_SEAFOOD),
    ("poultry", MEAT_SEAFOOD),
    ("chicken", MEAT_SEAFOOD),
    ("meat", MEAT_SEAFOOD),
    ("dairy", DAIRY_EGGS),
    ("milk", DAIRY_EGGS),
    ("cheese", DAIRY_EGGS),
    ("yogurt", DAIRY_EGGS),
    ("eggs", DAIRY_EGGS),
    ("grains", PANTRY),
    ("pasta", PANTRY),
    ("rice", PANTRY),
    ("bread", BAKERY),
    ("cereals", PANTRY),
    ("legumes", PANTRY),
    ("beans", PANTRY),
    ("nuts", PANTRY),
    ("seeds", PANTRY),
    ("oils", PANTRY),
    ("spices", PANTRY),
    ("condiments", PANTRY),
    ("beverages", BEVERAGES),
    ("frozen", FROZEN),
    ("canned", PANTRY),
];

/// Share of days a food must appear on to count as recurring
const RECURRING_THRESHOLD: f64 = 0.2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingItem {
    pub name: String,
    /// Store aisle, e.g. "Fresh Produce"
    pub category: String,
    pub quantity: f64,
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub is_recurring: bool,
}

/// Items grouped by store aisle, each group sorted by name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShoppingList {
    pub groups: BTreeMap<String, Vec<ShoppingItem>>,
}

impl ShoppingList {
    /// Group items by category and sort each group by name
    pub fn from_items(items: Vec<ShoppingItem>) -> Self {
        let mut groups: BTreeMap<String, Vec<ShoppingItem>> = BTreeMap::new();
        for item in items {
            groups.entry(item.category.clone()).or_default().push(item);
        }
        for items in groups.values_mut() {
            items.sort_by_key(|item| item.name.to_lowercase());
        }
        Self { groups }
    }

    pub fn total_items(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn total_categories(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn items(&self) -> impl Iterator<Item = &ShoppingItem> {
        self.groups.values().flatten()
    }
}

/// Store aisle for a food category
pub fn shopping_category(food_category: &str) -> &'static str {
    let category = food_category.to_lowercase();
    SHOPPING_CATEGORIES
        .iter()
        .find(|(keyword, _)| category.contains(keyword))
        .map(|(_, aisle)| *aisle)
        .unwrap_or(OTHER)
}

/// Pick a purchase unit for a gram amount
///
/// Liquids go by volume, small amounts and seasonings stay in grams, and
/// anything from a kilogram up is listed in kg.
pub fn shopping_unit(food_category: &str, total_grams: f64) -> (f64, &'static str) {
    let category = food_category.to_lowercase();

    if ["milk", "oil", "juice"].iter().any(|k| category.contains(k)) {
        if total_grams > 1000.0 {
            return (round_to_tenth(total_grams / 1000.0), "L");
        }
        return (total_grams.round(), "ml");
    }

    if category.contains("spice") || category.contains("herb") || total_grams < 50.0 {
        return (total_grams.round(), "g");
    }

    if total_grams >= 1000.0 {
        return (round_to_hundredth(total_grams / 1000.0), "kg");
    }

    (total_grams.round(), "g")
}

fn round_to_hundredth(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Merge items with the same name, aisle and unit
///
/// Quantities are added and distinct notes joined. First-seen order is kept.
pub fn consolidate_items(items: Vec<ShoppingItem>) -> Vec<ShoppingItem> {
    let mut consolidated: Vec<ShoppingItem> = Vec::new();
    let mut index: HashMap<(String, String, String), usize> = HashMap::new();

    for item in items {
        let key = (
            item.name.to_lowercase(),
            item.category.clone(),
            item.unit.clone(),
        );
        match index.get(&key).copied() {
            Some(i) => {
                let existing = &mut consolidated[i];
                existing.quantity = round_to_hundredth(existing.quantity + item.quantity);
                if let Some(note) = item.notes {
                    let merged = match existing.notes.take() {
                        Some(notes) if notes.contains(note.as_str()) => notes,
                        Some(notes) => format!("{}, {}", notes, note),
                        None => note,
                    };
                    existing.notes = Some(merged);
                }
            }
            None => {
                index.insert(key, consolidated.len());
                consolidated.push(item);
            }
        }
    }

    consolidated
}

fn shopping_item(food: &FoodItem, grams: f64, notes: String, is_recurring: bool) -> ShoppingItem {
    let (quantity, unit) = shopping_unit(&food.category, grams);
    ShoppingItem {
        name: food.name.clone(),
        category: shopping_category(&food.category).to_string(),
        quantity,
        unit: unit.to_string(),
        notes: Some(notes),
        is_recurring,
    }
}

/// Shopping list covering every item in a weekly plan
///
/// Items whose food is not in `foods` are left out.
pub fn generate_from_meal_plan(plan: &WeeklyMealPlan, foods: &[FoodItem]) -> ShoppingList {
    let by_id: HashMap<Uuid, &FoodItem> = foods.iter().map(|f| (f.id, f)).collect();
    let mut items = Vec::new();
    let mut skipped = 0usize;

    for day in &plan.days {
        for meal in &day.meals {
            for item in &meal.items {
                let Some(food) = by_id.get(&item.food_id) else {
                    skipped += 1;
                    continue;
                };
                let note = format!(
                    "For {} on {}",
                    meal.meal_type,
                    day.date.format("%a %b %d %Y")
                );
                items.push(shopping_item(food, item.quantity, note, false));
            }
        }
    }

    debug!(
        start_date = %plan.start_date,
        entries = items.len(),
        skipped,
        "Building shopping list from meal plan"
    );

    ShoppingList::from_items(consolidate_items(items))
}

/// Shopping list of foods logged on at least a fifth of the last `days` days
///
/// Each recurring food is listed at a week's worth of its average logged portion.
/// Entries without a food id or quantity are ignored.
pub fn generate_recurring(meals: &[LoggedMeal], foods: &[FoodItem], days: u32) -> ShoppingList {
    let by_id: HashMap<Uuid, &FoodItem> = foods.iter().map(|f| (f.id, f)).collect();

    // (count, total grams) per food, in first-logged order
    let mut usage: Vec<(Uuid, u32, f64)> = Vec::new();
    for meal in meals {
        let (Some(food_id), Some(quantity)) = (meal.food_id, meal.quantity) else {
            continue;
        };
        match usage.iter_mut().find(|(id, _, _)| *id == food_id) {
            Some(entry) => {
                entry.1 += 1;
                entry.2 += quantity;
            }
            None => usage.push((food_id, 1, quantity)),
        }
    }

    let threshold = days as f64 * RECURRING_THRESHOLD;
    let items: Vec<ShoppingItem> = usage
        .into_iter()
        .filter(|(_, count, _)| *count as f64 >= threshold)
        .filter_map(|(food_id, count, grams)| {
            let food = by_id.get(&food_id)?;
            let weekly_grams = grams / count as f64 * 7.0;
            let note = format!("Recurring item (used {}/{} days)", count, days);
            Some(shopping_item(food, weekly_grams, note, true))
        })
        .collect();

    ShoppingList::from_items(consolidate_items(items))
}

/// Staples for a Mediterranean pantry
pub fn mediterranean_suggestions() -> ShoppingList {
    let staple = |name: &str, category: &str, quantity: f64, unit: &str, notes: &str| ShoppingItem {
        name: name.to_string(),
        category: category.to_string(),
        quantity,
        unit: unit.to_string(),
        notes: Some(notes.to_string()),
        is_recurring: false,
    };

    ShoppingList::from_items(vec![
        staple("Extra Virgin Olive Oil", PANTRY, 1.0, "bottle", "Mediterranean staple"),
        staple("Tomatoes", FRESH_PRODUCE, 1.0, "kg", "Rich in lycopene"),
        staple("Spinach", FRESH_PRODUCE, 500.0, "g", "Iron and vitamins"),
        staple("Greek Yogurt", DAIRY_EGGS, 1.0, "kg", "Probiotics and protein"),
        staple("Salmon Fillet", MEAT_SEAFOOD, 500.0, "g", "Omega-3 fatty acids"),
        staple("Whole Grain Bread", BAKERY, 1.0, "loaf", "Complex carbohydrates"),
        staple("Mixed Nuts", PANTRY, 200.0, "g", "Healthy fats and protein"),
        staple("Chickpeas", PANTRY, 400.0, "g", "Plant protein and fiber"),
        staple("Lemons", FRESH_PRODUCE, 6.0, "pcs", "Vitamin C and flavor"),
        staple("Fresh Herbs (Basil, Oregano)", FRESH_PRODUCE, 1.0, "bunch", "Antioxidants"),
    ])
}
