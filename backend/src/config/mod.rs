//! Configuration management for the meal planner
//!
//! Configuration is loaded hierarchically:
//! 1. Default values (in code)
//! 2. TOML config files (config/development.toml or config/production.toml)
//! 3. Environment variables (prefix: MP__)

use anyhow::Result;
use meal_planner_shared::CATALOG_LIMIT;
use serde::{Deserialize, Serialize};
use std::env;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub planning: PlanningConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// Limits used by the planning services
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanningConfig {
    /// Foods fetched from the catalog per recommendation call
    pub catalog_limit: usize,
    /// Recommendations returned per meal
    pub recommendation_limit: usize,
    /// Alternatives returned when the caller gives no limit
    pub alternatives_limit: usize,
    /// Similar foods fetched before scoring alternatives
    pub alternatives_fetch_limit: usize,
    /// Relative calorie band for alternatives (0.3 = ±30%)
    pub calorie_band: f64,
}

impl Default for PlanningConfig {
    fn default() -> Self {
        Self {
            catalog_limit: CATALOG_LIMIT,
            recommendation_limit: 20,
            alternatives_limit: 10,
            alternatives_fetch_limit: 50,
            calorie_band: 0.3,
        }
    }
}

/// Food catalog snapshot location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub path: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: "data/foods.json".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from files and environment
    ///
    /// Loading order (later sources override earlier):
    /// 1. Default values
    /// 2. Config file based on RUST_ENV (development.toml or production.toml)
    /// 3. Environment variables with MP__ prefix
    pub fn load() -> Result<Self> {
        let env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
        let config_file = format!("config/{}.toml", env);

        let config = config::Config::builder()
            .add_source(config::Config::try_from(&AppConfig::default())?)
            .add_source(config::File::with_name(&config_file).required(false))
            // e.g., MP__PLANNING__CATALOG_LIMIT=500 sets planning.catalog_limit
            .add_source(config::Environment::with_prefix("MP").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Check if running in production mode
    pub fn is_production() -> bool {
        env::var("RUST_ENV")
            .map(|v| v == "production")
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.planning.catalog_limit, 200);
        assert_eq!(config.planning.recommendation_limit, 20);
        assert_eq!(config.planning.alternatives_limit, 10);
        assert_eq!(config.planning.alternatives_fetch_limit, 50);
        assert!((config.planning.calorie_band - 0.3).abs() < f64::EPSILON);
        assert_eq!(config.catalog.path, "data/foods.json");
    }

    #[test]
    fn test_load_uses_defaults() {
        let config = AppConfig::load().unwrap();
        assert_eq!(config.planning.recommendation_limit, 20);
    }

    #[test]
    fn test_is_production() {
        assert!(!AppConfig::is_production());
    }
}
