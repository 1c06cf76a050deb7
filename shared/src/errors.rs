//! Error types for the meal planning engine

use thiserror::Error;

/// Errors raised by the pure nutrition and planning calculations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NutritionError {
    /// Biometric inputs needed for BMR are absent. `missing` holds display labels.
    #[error("Incomplete user profile for nutrition calculation: missing {}", .missing.join(", "))]
    IncompleteProfile { missing: Vec<String> },

    #[error("User profile missing nutrition targets")]
    MissingNutritionTargets,

    #[error("Validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incomplete_profile_message_lists_fields() {
        let err = NutritionError::IncompleteProfile {
            missing: vec!["Age".to_string(), "Current Weight".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Incomplete user profile for nutrition calculation: missing Age, Current Weight"
        );
    }

    #[test]
    fn test_missing_targets_message() {
        assert_eq!(
            NutritionError::MissingNutritionTargets.to_string(),
            "User profile missing nutrition targets"
        );
    }
}
