//! Service error handling
//!
//! Unifies pure-engine failures and collaborator failures behind one type
//! with a stable machine-readable code.

use meal_planner_shared::NutritionError;
use thiserror::Error;
use uuid::Uuid;

/// Error returned by the planning services
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    Nutrition(#[from] NutritionError),

    #[error("Food not found: {0}")]
    FoodNotFound(Uuid),

    #[error("Profile not found for user {0}")]
    ProfileNotFound(Uuid),

    #[error("Food catalog unavailable: {0}")]
    CatalogUnavailable(#[source] anyhow::Error),

    #[error("Storage error: {0}")]
    Storage(#[source] anyhow::Error),
}

impl ServiceError {
    /// Stable code for logs and callers
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::Nutrition(NutritionError::IncompleteProfile { .. }) => {
                "INCOMPLETE_PROFILE"
            }
            ServiceError::Nutrition(NutritionError::MissingNutritionTargets) => "MISSING_TARGETS",
            ServiceError::Nutrition(NutritionError::Validation(_)) => "VALIDATION_ERROR",
            ServiceError::FoodNotFound(_) => "FOOD_NOT_FOUND",
            ServiceError::ProfileNotFound(_) => "PROFILE_NOT_FOUND",
            ServiceError::CatalogUnavailable(_) => "CATALOG_UNAVAILABLE",
            ServiceError::Storage(_) => "STORAGE_ERROR",
        }
    }

    /// Whether retrying the same call could succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ServiceError::CatalogUnavailable(_) | ServiceError::Storage(_)
        )
    }
}

/// Result type alias for service calls
pub type ServiceResult<T> = Result<T, ServiceError>;
