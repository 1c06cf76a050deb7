//! Mediterranean Meal Planner Backend Library
//!
//! Async boundary around the shared planning engine: collaborator traits,
//! services, configuration and error handling.

pub mod config;
pub mod error;
pub mod repositories;
pub mod services;
pub mod state;
