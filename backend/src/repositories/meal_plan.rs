//! In-memory meal plan writer

use super::MealPlanWriter;
use anyhow::Result;
use async_trait::async_trait;
use meal_planner_shared::WeeklyMealPlan;
use tokio::sync::RwLock;
use uuid::Uuid;

/// A plan as it was saved
#[derive(Debug, Clone, PartialEq)]
pub struct SavedMealPlan {
    pub id: Uuid,
    pub user_id: Uuid,
    pub plan: WeeklyMealPlan,
}

#[derive(Debug, Default)]
pub struct InMemoryMealPlanWriter {
    plans: RwLock<Vec<SavedMealPlan>>,
}

impl InMemoryMealPlanWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Saved plans for a user, oldest first
    pub async fn plans_for_user(&self, user_id: Uuid) -> Vec<SavedMealPlan> {
        self.plans
            .read()
            .await
            .iter()
            .filter(|saved| saved.user_id == user_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl MealPlanWriter for InMemoryMealPlanWriter {
    async fn save_weekly_plan(&self, user_id: Uuid, plan: &WeeklyMealPlan) -> Result<Uuid> {
        let id = Uuid::new_v4();
        self.plans.write().await.push(SavedMealPlan {
            id,
            user_id,
            plan: plan.clone(),
        });
        Ok(id)
    }
}
