//! Common test utilities for integration tests
//!
//! Builds an `AppState` over in-memory collaborators seeded with a small
//! Mediterranean catalog.

#![allow(dead_code)]

use anyhow::anyhow;
use async_trait::async_trait;
use fake::{faker::lorem::en::Word, Fake};
use meal_planner_backend::{
    config::AppConfig,
    repositories::{
        FoodCatalog, InMemoryFoodCatalog, InMemoryMealPlanWriter, InMemoryProfileStore,
        ProfileStore,
    },
    state::AppState,
};
use meal_planner_shared::{ActivityLevel, FoodItem, Gender, Goal, NutritionProfile};
use std::sync::Arc;
use uuid::Uuid;

/// Test application wrapper
pub struct TestApp {
    pub state: AppState,
    pub catalog: Arc<InMemoryFoodCatalog>,
    pub profiles: Arc<InMemoryProfileStore>,
    pub plans: Arc<InMemoryMealPlanWriter>,
    pub foods: Vec<FoodItem>,
}

impl TestApp {
    /// Create a test application over the fixture catalog
    pub fn new() -> Self {
        Self::with_foods(fixture_foods())
    }

    pub fn with_foods(foods: Vec<FoodItem>) -> Self {
        let catalog = Arc::new(InMemoryFoodCatalog::new(foods.clone()));
        let profiles = Arc::new(InMemoryProfileStore::new());
        let plans = Arc::new(InMemoryMealPlanWriter::new());

        let state = AppState::new(
            catalog.clone(),
            profiles.clone(),
            plans.clone(),
            AppConfig::default(),
        );

        Self {
            state,
            catalog,
            profiles,
            plans,
            foods,
        }
    }

    /// Store a profile under a fresh user id
    pub async fn create_user(&self, profile: NutritionProfile) -> Uuid {
        let user_id = Uuid::new_v4();
        self.profiles
            .save_profile(user_id, profile)
            .await
            .expect("Failed to save profile");
        user_id
    }

    pub fn food(&self, name: &str) -> &FoodItem {
        self.foods
            .iter()
            .find(|f| f.name == name)
            .unwrap_or_else(|| panic!("fixture food {} missing", name))
    }
}

/// A small catalog covering every scored group plus one non-Mediterranean food
pub fn fixture_foods() -> Vec<FoodItem> {
    vec![
        FoodItem::new("Spinach", "leafy greens", 23.0, 2.9, 3.6, 0.4)
            .with_fiber(2.2)
            .verified(),
        FoodItem::new("Cherry Tomatoes", "vegetables", 18.0, 0.9, 3.9, 0.2).with_fiber(1.2),
        FoodItem::new("Blueberries", "berries", 57.0, 0.7, 14.5, 0.3).with_fiber(2.4),
        FoodItem::new("Rolled Oats", "whole grains", 389.0, 16.9, 66.3, 6.9).with_fiber(10.6),
        FoodItem::new("Cooked Lentils", "legumes", 116.0, 9.0, 20.1, 0.4)
            .with_fiber(7.9)
            .verified(),
        FoodItem::new("Almonds", "nuts", 579.0, 21.2, 21.6, 49.9).with_fiber(12.5),
        FoodItem::new("Atlantic Salmon", "fish", 208.0, 20.4, 0.0, 13.4).verified(),
        FoodItem::new("Sardines", "fish", 208.0, 24.6, 0.0, 11.5),
        FoodItem::new("Tuna", "fish", 184.0, 29.9, 0.0, 6.3),
        FoodItem::new("Cod", "fish", 82.0, 17.8, 0.0, 0.7),
        FoodItem::new("Chicken Breast", "poultry", 165.0, 31.0, 0.0, 3.6),
        FoodItem::new("Greek Yogurt", "dairy", 59.0, 10.2, 3.6, 0.4),
        FoodItem::new("Fresh Basil", "herbs", 23.0, 3.2, 2.7, 0.6),
        FoodItem::new("Potato Chips", "snacks", 536.0, 7.0, 53.0, 35.0).with_sodium(525.0),
    ]
}

/// Filler vegetables with random names, for catalog size tests
pub fn filler_vegetables(count: usize) -> Vec<FoodItem> {
    (0..count)
        .map(|i| {
            let word: String = Word().fake();
            FoodItem::new(format!("{} {}", word, i), "vegetables", 30.0, 1.5, 5.0, 0.3)
        })
        .collect()
}

/// Complete biometrics, no stored targets
pub fn biometric_profile() -> NutritionProfile {
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

/// Profile with stored daily targets
pub fn targeted_profile() -> NutritionProfile {
    NutritionProfile {
        target_calories: Some(2000),
        target_protein: Some(100.0),
        target_carbs: Some(225.0),
        target_fat: Some(78.0),
        ..biometric_profile()
    }
}

/// Catalog that always fails, for error mapping tests
pub struct UnavailableCatalog;

#[async_trait]
impl FoodCatalog for UnavailableCatalog {
    async fn fetch_mediterranean_foods(&self, _limit: usize) -> anyhow::Result<Vec<FoodItem>> {
        Err(anyhow!("catalog offline"))
    }

    async fn fetch_food_by_id(&self, _id: Uuid) -> anyhow::Result<Option<FoodItem>> {
        Err(anyhow!("catalog offline"))
    }

    async fn fetch_similar_foods(
        &self,
        _exclude_id: Uuid,
        _category: &str,
        _min_calories: f64,
        _max_calories: f64,
        _limit: usize,
    ) -> anyhow::Result<Vec<FoodItem>> {
        Err(anyhow!("catalog offline"))
    }
}
