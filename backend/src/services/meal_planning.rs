//! Meal planning service - recommendations, weekly plans and alternatives
//!
//! Each call fetches one catalog snapshot and hands it to the pure planner.

use crate::config::PlanningConfig;
use crate::error::{ServiceError, ServiceResult};
use crate::repositories::FoodCatalog;
use crate::state::AppState;
use chrono::NaiveDate;
use meal_planner_shared::{
    apply_targets, calculate_energy_breakdown, calculate_food_nutrition, daily_targets_from_profile,
    score_foods_for_meal, validation::validate_biometrics, DailyNutritionTarget, DayMealPlan,
    FoodItem, FoodScore, MealPlanMeal, MealPlanner, MealType, NutritionData, NutritionError,
    NutritionProfile, WeeklyMealPlan,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};
use uuid::Uuid;

/// Options for planning a week for a stored user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratePlanRequest {
    pub start_date: NaiveDate,
    /// Derive targets from biometrics when the profile has none stored
    #[serde(default)]
    pub fill_missing_targets: bool,
    /// Persist the plan through the plan writer
    #[serde(default)]
    pub save: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedPlan {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_id: Option<Uuid>,
    pub plan: WeeklyMealPlan,
}

/// Meal planning service
pub struct MealPlanningService;

impl MealPlanningService {
    async fn mediterranean_snapshot(
        catalog: &dyn FoodCatalog,
        settings: &PlanningConfig,
    ) -> ServiceResult<Vec<FoodItem>> {
        let foods = catalog
            .fetch_mediterranean_foods(settings.catalog_limit)
            .await
            .map_err(|e| {
                error!(error = %e, "Error getting Mediterranean foods");
                ServiceError::CatalogUnavailable(e)
            })?;
        debug!(foods = foods.len(), "Fetched catalog snapshot");
        Ok(foods)
    }

    fn planner<'a>(foods: &'a [FoodItem], settings: &PlanningConfig) -> MealPlanner<'a> {
        MealPlanner::new(foods).with_recommendation_limit(settings.recommendation_limit)
    }

    /// Top-scored Mediterranean foods for a meal, skipping `exclude_ids`
    pub async fn generate_meal_recommendations(
        catalog: &dyn FoodCatalog,
        settings: &PlanningConfig,
        meal_type: MealType,
        target: &NutritionData,
        exclude_ids: &[Uuid],
    ) -> ServiceResult<Vec<FoodScore>> {
        let foods = Self::mediterranean_snapshot(catalog, settings).await?;
        Ok(Self::planner(&foods, settings).recommend(meal_type, target, exclude_ids))
    }

    /// Assemble a single meal toward a target
    pub async fn generate_meal_plan(
        catalog: &dyn FoodCatalog,
        settings: &PlanningConfig,
        meal_type: MealType,
        target: &NutritionData,
    ) -> ServiceResult<MealPlanMeal> {
        let foods = Self::mediterranean_snapshot(catalog, settings).await?;
        Ok(Self::planner(&foods, settings).assemble_meal(meal_type, target))
    }

    /// Plan one day's four meals
    pub async fn generate_day_meal_plan(
        catalog: &dyn FoodCatalog,
        settings: &PlanningConfig,
        date: NaiveDate,
        daily: &DailyNutritionTarget,
    ) -> ServiceResult<DayMealPlan> {
        let foods = Self::mediterranean_snapshot(catalog, settings).await?;
        Ok(Self::planner(&foods, settings).generate_day(date, daily))
    }

    /// Plan seven days from the targets stored on a profile
    ///
    /// Fails with `MissingNutritionTargets` before touching the catalog.
    pub async fn generate_weekly_meal_plan(
        catalog: &dyn FoodCatalog,
        settings: &PlanningConfig,
        start_date: NaiveDate,
        profile: &NutritionProfile,
    ) -> ServiceResult<WeeklyMealPlan> {
        daily_targets_from_profile(profile)?;

        let foods = Self::mediterranean_snapshot(catalog, settings).await?;
        let plan = Self::planner(&foods, settings).generate_week(start_date, profile)?;

        info!(
            start_date = %plan.start_date,
            end_date = %plan.end_date,
            average_calories = plan.average_nutrition.calories,
            average_adherence_score = plan.average_adherence_score,
            "Generated weekly meal plan"
        );
        Ok(plan)
    }

    /// Foods in the same category within the calorie band, scored for the meal
    ///
    /// Candidates are scored against the original food's 100 g nutrition.
    pub async fn get_food_alternatives(
        catalog: &dyn FoodCatalog,
        settings: &PlanningConfig,
        food_id: Uuid,
        meal_type: MealType,
        limit: Option<usize>,
    ) -> ServiceResult<Vec<FoodScore>> {
        let original = catalog
            .fetch_food_by_id(food_id)
            .await
            .map_err(|e| {
                error!(food_id = %food_id, error = %e, "Error getting food alternatives");
                ServiceError::CatalogUnavailable(e)
            })?
            .ok_or(ServiceError::FoodNotFound(food_id))?;

        let calories = original.calories_per_100g;
        let alternatives = catalog
            .fetch_similar_foods(
                food_id,
                &original.category,
                calories * (1.0 - settings.calorie_band),
                calories * (1.0 + settings.calorie_band),
                settings.alternatives_fetch_limit,
            )
            .await
            .map_err(|e| {
                error!(food_id = %food_id, error = %e, "Error getting food alternatives");
                ServiceError::CatalogUnavailable(e)
            })?;

        let target = calculate_food_nutrition(&original, 100.0);
        let mut scored = score_foods_for_meal(&alternatives, meal_type, &target);
        scored.truncate(limit.unwrap_or(settings.alternatives_limit));
        Ok(scored)
    }

    /// Plan a week for a stored user, optionally deriving targets and saving the plan
    pub async fn generate_for_user(
        state: &AppState,
        user_id: Uuid,
        request: &GeneratePlanRequest,
    ) -> ServiceResult<GeneratedPlan> {
        let stored = state
            .profiles()
            .fetch_profile(user_id)
            .await
            .map_err(|e| {
                error!(user_id = %user_id, error = %e, "Failed to load profile");
                ServiceError::Storage(e)
            })?
            .ok_or(ServiceError::ProfileNotFound(user_id))?;

        let profile = match daily_targets_from_profile(&stored) {
            Ok(_) => stored,
            Err(NutritionError::MissingNutritionTargets) if request.fill_missing_targets => {
                validate_biometrics(&stored)?;
                let breakdown = calculate_energy_breakdown(&stored)?;
                debug!(user_id = %user_id, calories = breakdown.targets.calories, "Derived missing targets");
                apply_targets(&stored, &breakdown)
            }
            Err(e) => return Err(e.into()),
        };

        let plan = Self::generate_weekly_meal_plan(
            state.catalog(),
            &state.config().planning,
            request.start_date,
            &profile,
        )
        .await?;

        let plan_id = if request.save {
            let id = state
                .plans()
                .save_weekly_plan(user_id, &plan)
                .await
                .map_err(|e| {
                    error!(user_id = %user_id, error = %e, "Failed to save meal plan");
                    ServiceError::Storage(e)
                })?;
            info!(user_id = %user_id, plan_id = %id, "Meal plan saved");
            Some(id)
        } else {
            None
        };

        Ok(GeneratedPlan { plan_id, plan })
    }
}
