//! Shopping list service

use crate::error::{ServiceError, ServiceResult};
use crate::repositories::FoodCatalog;
use meal_planner_shared::shopping::{generate_from_meal_plan, generate_recurring, ShoppingList};
use meal_planner_shared::{FoodItem, LoggedMeal, WeeklyMealPlan};
use tracing::{error, info, warn};
use uuid::Uuid;

/// Shopping list service
pub struct ShoppingListService;

impl ShoppingListService {
    /// Look up each distinct food once, skipping ids the catalog no longer has
    async fn fetch_foods(
        catalog: &dyn FoodCatalog,
        ids: impl Iterator<Item = Uuid>,
    ) -> ServiceResult<Vec<FoodItem>> {
        let mut seen: Vec<Uuid> = Vec::new();
        let mut foods = Vec::new();

        for id in ids {
            if seen.contains(&id) {
                continue;
            }
            seen.push(id);

            match catalog.fetch_food_by_id(id).await {
                Ok(Some(food)) => foods.push(food),
                Ok(None) => warn!(food_id = %id, "Food missing from catalog, skipping shopping item"),
                Err(e) => {
                    error!(food_id = %id, error = %e, "Error generating shopping list");
                    return Err(ServiceError::CatalogUnavailable(e));
                }
            }
        }

        Ok(foods)
    }

    /// Shopping list for every item in a weekly plan
    pub async fn generate_for_plan(
        catalog: &dyn FoodCatalog,
        plan: &WeeklyMealPlan,
    ) -> ServiceResult<ShoppingList> {
        let ids = plan
            .days
            .iter()
            .flat_map(|day| day.meals.iter())
            .flat_map(|meal| meal.items.iter())
            .map(|item| item.food_id);

        let foods = Self::fetch_foods(catalog, ids).await?;
        let list = generate_from_meal_plan(plan, &foods);

        info!(
            start_date = %plan.start_date,
            items = list.total_items(),
            categories = list.total_categories(),
            "Shopping list generated from meal plan"
        );
        Ok(list)
    }

    /// Shopping list of foods the user logs regularly
    pub async fn generate_recurring_list(
        catalog: &dyn FoodCatalog,
        meals: &[LoggedMeal],
        days: u32,
    ) -> ServiceResult<ShoppingList> {
        let foods = Self::fetch_foods(catalog, meals.iter().filter_map(|m| m.food_id)).await?;
        let list = generate_recurring(meals, &foods, days);

        info!(days, items = list.total_items(), "Recurring shopping list generated");
        Ok(list)
    }
}
