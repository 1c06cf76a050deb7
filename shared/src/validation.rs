//! Input validation functions
//!
//! Range checks come from the `validator` derives on the models; this module
//! turns their errors into messages that use display labels.

use crate::errors::NutritionError;
use crate::models::{FoodItem, NutritionProfile};
use validator::{Validate, ValidationErrors};

// ============================================================================
// User-Friendly Field Labels
// ============================================================================

/// Map technical field names to user-friendly display labels
pub fn get_field_display_label(field_name: &str) -> &str {
    match field_name {
        "age" => "Age",
        "gender" => "Biological Sex",
        "height_cm" => "Height",
        "weight_kg" => "Current Weight",
        "activity_level" => "Activity Level",
        "goal" => "Goal",
        "bmr" => "BMR",
        "tdee" => "TDEE",
        "target_calories" => "Target Calories",
        "target_protein" => "Target Protein",
        "target_carbs" => "Target Carbs",
        "target_fat" => "Target Fat",
        "name" => "Name",
        "category" => "Category",
        "calories_per_100g" => "Calories per 100g",
        "protein_per_100g" => "Protein per 100g",
        "carbs_per_100g" => "Carbs per 100g",
        "fat_per_100g" => "Fat per 100g",
        "fiber_per_100g" => "Fiber per 100g",
        "sugar_per_100g" => "Sugar per 100g",
        "sodium_per_100g" => "Sodium per 100g",
        _ => field_name,
    }
}

/// Convert a list of technical field names to user-friendly labels
pub fn get_missing_fields_labels(fields: &[&str]) -> Vec<String> {
    fields
        .iter()
        .map(|f| get_field_display_label(f).to_string())
        .collect()
}

/// Biometric inputs absent from a profile, as display labels
///
/// Listed in the order the BMR formula consumes them.
pub fn missing_biometric_fields(profile: &NutritionProfile) -> Vec<String> {
    let mut missing = Vec::new();
    if profile.weight_kg.is_none() {
        missing.push("weight_kg");
    }
    if profile.height_cm.is_none() {
        missing.push("height_cm");
    }
    if profile.age.is_none() {
        missing.push("age");
    }
    if profile.gender.is_none() {
        missing.push("gender");
    }
    get_missing_fields_labels(&missing)
}

/// Validation error with field context
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub display_label: String,
}

impl ValidationError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
            display_label: get_field_display_label(field).to_string(),
        }
    }

    /// Format as user-friendly error message
    pub fn user_message(&self) -> String {
        format!("{}: {}", self.display_label, self.message)
    }
}

/// Flatten derive errors into field errors, sorted by field name
pub fn collect_field_errors(errors: &ValidationErrors) -> Vec<ValidationError> {
    let mut collected: Vec<ValidationError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let field: &str = &field;
            errs.iter()
                .map(|err| ValidationError::new(field, &describe(err)))
                .collect::<Vec<_>>()
        })
        .collect();
    collected.sort_by(|a, b| a.field.cmp(&b.field));
    collected
}

fn describe(err: &validator::ValidationError) -> String {
    if let Some(message) = &err.message {
        return message.to_string();
    }
    let bound = |key: &str| err.params.get(key).map(|v| v.to_string());
    match err.code.as_ref() {
        "range" => match (bound("min"), bound("max")) {
            (Some(min), Some(max)) => format!("must be between {} and {}", min, max),
            _ => "is out of range".to_string(),
        },
        "length" => match (bound("min"), bound("max")) {
            (Some(min), Some(max)) => format!("must be {} to {} characters", min, max),
            _ => "has an invalid length".to_string(),
        },
        code => format!("failed {} check", code),
    }
}

fn into_nutrition_error(errors: Vec<ValidationError>) -> NutritionError {
    NutritionError::Validation(
        errors
            .iter()
            .map(ValidationError::user_message)
            .collect::<Vec<_>>()
            .join("; "),
    )
}

fn check_finite(field: &str, value: Option<f64>, errors: &mut Vec<ValidationError>) {
    if let Some(v) = value {
        if !v.is_finite() {
            errors.push(ValidationError::new(field, "must be a valid number"));
        }
    }
}

// ============================================================================
// Profile and Food Validation
// ============================================================================

/// Validate a profile against the accepted biometric and target ranges
pub fn validate_profile(profile: &NutritionProfile) -> Result<(), NutritionError> {
    let mut errors = match profile.validate() {
        Ok(()) => Vec::new(),
        Err(e) => collect_field_errors(&e),
    };
    check_finite("height_cm", profile.height_cm, &mut errors);
    check_finite("weight_kg", profile.weight_kg, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(into_nutrition_error(errors))
    }
}

/// Validate only the inputs the BMR formula reads
///
/// Stored BMR, TDEE and targets are derived values and are never range checked here.
pub fn validate_biometrics(profile: &NutritionProfile) -> Result<(), NutritionError> {
    let inputs = NutritionProfile {
        age: profile.age,
        gender: profile.gender,
        height_cm: profile.height_cm,
        weight_kg: profile.weight_kg,
        activity_level: profile.activity_level,
        goal: profile.goal,
        ..Default::default()
    };
    validate_profile(&inputs)
}

/// Validate a catalog food before it is used for planning
pub fn validate_food(food: &FoodItem) -> Result<(), NutritionError> {
    let mut errors = match food.validate() {
        Ok(()) => Vec::new(),
        Err(e) => collect_field_errors(&e),
    };
    check_finite("calories_per_100g", Some(food.calories_per_100g), &mut errors);
    check_finite("protein_per_100g", Some(food.protein_per_100g), &mut errors);
    check_finite("carbs_per_100g", Some(food.carbs_per_100g), &mut errors);
    check_finite("fat_per_100g", Some(food.fat_per_100g), &mut errors);
    check_finite("fiber_per_100g", food.fiber_per_100g, &mut errors);
    check_finite("sugar_per_100g", food.sugar_per_100g, &mut errors);
    check_finite("sodium_per_100g", food.sodium_per_100g, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(into_nutrition_error(errors))
    }
}
