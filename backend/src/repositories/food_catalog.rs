//! In-memory food catalog

use super::FoodCatalog;
use anyhow::{Context, Result};
use async_trait::async_trait;
use meal_planner_shared::{select_mediterranean_foods, validation::validate_food, FoodItem};
use std::path::Path;
use tokio::sync::RwLock;
use tracing::{debug, warn};
use uuid::Uuid;

/// Food catalog held in memory
#[derive(Debug, Default)]
pub struct InMemoryFoodCatalog {
    foods: RwLock<Vec<FoodItem>>,
}

impl InMemoryFoodCatalog {
    pub fn new(foods: Vec<FoodItem>) -> Self {
        Self {
            foods: RwLock::new(foods),
        }
    }

    /// Load a catalog snapshot from a JSON array of foods
    ///
    /// Foods failing validation are dropped with a warning.
    pub async fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read food catalog {}", path.display()))?;
        let foods: Vec<FoodItem> = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid food catalog JSON in {}", path.display()))?;

        let total = foods.len();
        let foods: Vec<FoodItem> = foods
            .into_iter()
            .filter(|food| match validate_food(food) {
                Ok(()) => true,
                Err(e) => {
                    warn!(food = %food.name, error = %e, "Skipping invalid catalog food");
                    false
                }
            })
            .collect();

        debug!(path = %path.display(), loaded = foods.len(), total, "Loaded food catalog");
        Ok(Self::new(foods))
    }

    pub async fn insert(&self, food: FoodItem) {
        self.foods.write().await.push(food);
    }

    pub async fn len(&self) -> usize {
        self.foods.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.foods.read().await.is_empty()
    }
}

#[async_trait]
impl FoodCatalog for InMemoryFoodCatalog {
    async fn fetch_mediterranean_foods(&self, limit: usize) -> Result<Vec<FoodItem>> {
        let foods = self.foods.read().await;
        Ok(select_mediterranean_foods(foods.iter(), limit))
    }

    async fn fetch_food_by_id(&self, id: Uuid) -> Result<Option<FoodItem>> {
        let foods = self.foods.read().await;
        Ok(foods.iter().find(|food| food.id == id).cloned())
    }

    async fn fetch_similar_foods(
        &self,
        exclude_id: Uuid,
        category: &str,
        min_calories: f64,
        max_calories: f64,
        limit: usize,
    ) -> Result<Vec<FoodItem>> {
        let foods = self.foods.read().await;
        Ok(foods
            .iter()
            .filter(|food| {
                food.id != exclude_id
                    && food.category == category
                    && food.calories_per_100g >= min_calories
                    && food.calories_per_100g <= max_calories
            })
            .take(limit)
            .cloned()
            .collect())
    }
}
