//! Core domain types and models
//!
//! This module contains the domain entities, identifier newtypes, and the
//! error hierarchy used across the crate.

pub mod audit;
pub mod catalog;
pub mod errors;
pub mod ids;
pub mod meal;
pub mod result;

pub use audit::{OperationLog, OperationLogEntry, OperationStatus};
pub use catalog::{Area, Category};
pub use errors::{LarderError, SourceError};
pub use ids::MealId;
pub use meal::{Ingredient, Meal};
pub use result::Result;
