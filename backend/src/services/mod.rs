//! Business logic services
//!
//! Services fetch what the pure planner needs from the collaborators,
//! run it, and map failures to `ServiceError`.

pub mod meal_planning;
pub mod nutrition;
pub mod shopping;

pub use meal_planning::{GeneratePlanRequest, GeneratedPlan, MealPlanningService};
pub use nutrition::NutritionService;
pub use shopping::ShoppingListService;
