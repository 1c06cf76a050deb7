//! Mediterranean Meal Planner batch job
//!
//! Reads a nutrition profile and a food catalog snapshot, plans a week of
//! meals and prints the plan as JSON.
//!
//! Usage:
//! ```bash
//! # Plan a week starting today
//! cargo run --bin meal-planner -- profile.json
//!
//! # Plan from a given Monday with a custom catalog and a shopping list
//! cargo run --bin meal-planner -- profile.json --start 2024-01-15 \
//!     --catalog data/foods.json --shopping-list
//! ```

use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::Parser;
use meal_planner_backend::{
    config::AppConfig,
    repositories::{InMemoryFoodCatalog, InMemoryMealPlanWriter, InMemoryProfileStore},
    services::{GeneratePlanRequest, MealPlanningService, ShoppingListService},
    state::AppState,
};
use meal_planner_shared::NutritionProfile;
use serde::Serialize;
use std::{path::PathBuf, sync::Arc};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

#[derive(Parser)]
#[command(
    name = "meal-planner",
    about = "Mediterranean weekly meal planner",
    long_about = "Generate a seven-day Mediterranean meal plan for a nutrition profile. Targets are derived from biometrics when the profile has none."
)]
struct PlannerArgs {
    /// Path to the nutrition profile JSON
    profile: PathBuf,

    /// First day of the plan (YYYY-MM-DD), defaults to today
    #[arg(long)]
    start: Option<NaiveDate>,

    /// Food catalog JSON override
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Also print a consolidated shopping list
    #[arg(long)]
    shopping_list: bool,
}

#[derive(Serialize)]
struct PlannerOutput<T: Serialize, S: Serialize> {
    plan: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    shopping_list: Option<S>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    init_tracing();

    let args = PlannerArgs::parse();
    let config = AppConfig::load()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        env = if AppConfig::is_production() { "production" } else { "development" },
        "Starting Mediterranean meal planner"
    );

    let catalog_path = args
        .catalog
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.catalog.path));
    let catalog = InMemoryFoodCatalog::from_json_file(&catalog_path).await?;
    info!(path = %catalog_path.display(), foods = catalog.len().await, "Food catalog loaded");

    let raw = tokio::fs::read_to_string(&args.profile).await?;
    let profile: NutritionProfile = serde_json::from_str(&raw)?;

    let user_id = Uuid::new_v4();
    let state = AppState::new(
        Arc::new(catalog),
        Arc::new(InMemoryProfileStore::with_profiles([(user_id, profile)])),
        Arc::new(InMemoryMealPlanWriter::new()),
        config,
    );

    let request = GeneratePlanRequest {
        start_date: args.start.unwrap_or_else(|| Local::now().date_naive()),
        fill_missing_targets: true,
        save: false,
    };
    let generated = MealPlanningService::generate_for_user(&state, user_id, &request).await?;

    let shopping_list = if args.shopping_list {
        Some(ShoppingListService::generate_for_plan(state.catalog(), &generated.plan).await?)
    } else {
        None
    };

    let output = PlannerOutput {
        plan: generated.plan,
        shopping_list,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

/// Initialize tracing/logging
///
/// Logs go to stderr so the JSON plan on stdout stays machine-readable.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if AppConfig::is_production() {
            "meal_planner_backend=info,meal_planner_shared=info".into()
        } else {
            "meal_planner_backend=debug,meal_planner_shared=debug".into()
        }
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if AppConfig::is_production() {
        // JSON logging for production (better for log aggregation)
        subscriber
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        subscriber
            .with(
                tracing_subscriber::fmt::layer()
                    .pretty()
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}
