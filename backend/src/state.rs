//! Application state management
//!
//! Shared collaborators and configuration handed to the services.
//!
//! # Design Principles
//!
//! 1. **Trait objects**: Collaborators are held as `Arc<dyn Trait>` so stores can be swapped
//! 2. **Cheap cloning**: All fields are Arc'd
//! 3. **Immutable after creation**: State is read-only while planning

use crate::config::AppConfig;
use crate::repositories::{FoodCatalog, MealPlanWriter, ProfileStore};
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn FoodCatalog>,
    pub profiles: Arc<dyn ProfileStore>,
    pub plans: Arc<dyn MealPlanWriter>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(
        catalog: Arc<dyn FoodCatalog>,
        profiles: Arc<dyn ProfileStore>,
        plans: Arc<dyn MealPlanWriter>,
        config: AppConfig,
    ) -> Self {
        Self {
            catalog,
            profiles,
            plans,
            config: Arc::new(config),
        }
    }

    #[inline]
    pub fn catalog(&self) -> &dyn FoodCatalog {
        self.catalog.as_ref()
    }

    #[inline]
    pub fn profiles(&self) -> &dyn ProfileStore {
        self.profiles.as_ref()
    }

    #[inline]
    pub fn plans(&self) -> &dyn MealPlanWriter {
        self.plans.as_ref()
    }

    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}
