//! Collaborator repositories
//!
//! The planner reads foods and profiles and writes finished plans through
//! these traits. In-memory implementations back the batch job and tests.

use anyhow::Result;
use async_trait::async_trait;
use meal_planner_shared::{FoodItem, NutritionProfile, WeeklyMealPlan};
use uuid::Uuid;

pub mod food_catalog;
pub mod meal_plan;
pub mod profile;

pub use food_catalog::InMemoryFoodCatalog;
pub use meal_plan::InMemoryMealPlanWriter;
pub use profile::InMemoryProfileStore;

/// Read access to the food catalog
#[async_trait]
pub trait FoodCatalog: Send + Sync {
    /// Foods whose category matches the Mediterranean taxonomy,
    /// verified first then by name, at most `limit`
    async fn fetch_mediterranean_foods(&self, limit: usize) -> Result<Vec<FoodItem>>;

    async fn fetch_food_by_id(&self, id: Uuid) -> Result<Option<FoodItem>>;

    /// Foods in exactly `category` with calories per 100 g within
    /// `[min_calories, max_calories]`, excluding `exclude_id`
    async fn fetch_similar_foods(
        &self,
        exclude_id: Uuid,
        category: &str,
        min_calories: f64,
        max_calories: f64,
        limit: usize,
    ) -> Result<Vec<FoodItem>>;
}

/// Per-user nutrition profiles
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn fetch_profile(&self, user_id: Uuid) -> Result<Option<NutritionProfile>>;

    async fn save_profile(&self, user_id: Uuid, profile: NutritionProfile) -> Result<()>;
}

/// Sink for generated plans
#[async_trait]
pub trait MealPlanWriter: Send + Sync {
    /// Persist a plan and return its id
    async fn save_weekly_plan(&self, user_id: Uuid, plan: &WeeklyMealPlan) -> Result<Uuid>;
}
