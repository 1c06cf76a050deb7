//! Nutrition service - profile targets

use crate::error::{ServiceError, ServiceResult};
use crate::repositories::ProfileStore;
use meal_planner_shared::{
    apply_targets, calculate_energy_breakdown, calculate_nutrition_targets,
    validation::validate_biometrics, DailyNutritionTarget, NutritionProfile,
};
use tracing::{error, info};
use uuid::Uuid;

/// Nutrition service
pub struct NutritionService;

impl NutritionService {
    /// Validate a profile and compute its daily targets
    pub fn calculate_nutrition_targets(
        profile: &NutritionProfile,
    ) -> ServiceResult<DailyNutritionTarget> {
        validate_biometrics(profile)?;
        Ok(calculate_nutrition_targets(profile)?)
    }

    /// Recompute BMR, TDEE and targets for a stored profile and save them back
    pub async fn refresh_profile_targets(
        profiles: &dyn ProfileStore,
        user_id: Uuid,
    ) -> ServiceResult<DailyNutritionTarget> {
        let profile = profiles
            .fetch_profile(user_id)
            .await
            .map_err(|e| {
                error!(user_id = %user_id, error = %e, "Failed to load profile");
                ServiceError::Storage(e)
            })?
            .ok_or(ServiceError::ProfileNotFound(user_id))?;

        validate_biometrics(&profile)?;
        let breakdown = calculate_energy_breakdown(&profile)?;
        let updated = apply_targets(&profile, &breakdown);

        profiles.save_profile(user_id, updated).await.map_err(|e| {
            error!(user_id = %user_id, error = %e, "Failed to save profile targets");
            ServiceError::Storage(e)
        })?;

        info!(
            user_id = %user_id,
            bmr = breakdown.bmr,
            tdee = breakdown.tdee,
            calories = breakdown.targets.calories,
            "User nutrition targets updated"
        );
        Ok(breakdown.targets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::InMemoryProfileStore;
    use meal_planner_shared::{ActivityLevel, Gender, Goal, NutritionError};

    fn profile() -> NutritionProfile {
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

    #[test]
    fn test_calculate_targets() {
        let targets = NutritionService::calculate_nutrition_targets(&profile()).unwrap();
        assert_eq!(targets.calories, 2556);
        assert_eq!(targets.protein, 128.0);
    }

    #[test]
    fn test_incomplete_profile() {
        let partial = NutritionProfile {
            age: None,
            ..profile()
        };
        let err = NutritionService::calculate_nutrition_targets(&partial).unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Nutrition(NutritionError::IncompleteProfile { .. })
        ));
        assert_eq!(err.code(), "INCOMPLETE_PROFILE");
    }

    #[test]
    fn test_out_of_range_profile() {
        let invalid = NutritionProfile {
            height_cm: Some(90.0),
            ..profile()
        };
        let err = NutritionService::calculate_nutrition_targets(&invalid).unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_refresh_profile_targets() {
        let user_id = Uuid::new_v4();
        let store = InMemoryProfileStore::with_profiles([(user_id, profile())]);

        let targets = NutritionService::refresh_profile_targets(&store, user_id)
            .await
            .unwrap();
        assert_eq!(targets.calories, 2556);

        let saved = store.fetch_profile(user_id).await.unwrap().unwrap();
        assert_eq!(saved.bmr, Some(1649));
        assert_eq!(saved.tdee, Some(2556));
        assert_eq!(saved.target_calories, Some(2556));
        assert_eq!(saved.target_carbs, Some(288.0));
    }

    #[tokio::test]
    async fn test_refresh_unknown_user() {
        let store = InMemoryProfileStore::new();
        let user_id = Uuid::new_v4();
        let err = NutritionService::refresh_profile_targets(&store, user_id)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::ProfileNotFound(id) if id == user_id));
    }
}
