//! Recipe catalog source adapter
//!
//! Defines the logical query contract against the external recipe catalog
//! and the HTTP implementation of it. The contract is a trait so the
//! orchestrator can be exercised against an in-memory source in tests.

pub mod client;
pub mod models;

use crate::domain::{MealId, Result};
use async_trait::async_trait;
use models::{RawArea, RawCategory, RawIngredientListing, RawMeal, RawMealSummary};

pub use client::MealDbClient;

/// Logical query contract for the recipe catalog
///
/// Transport failures surface as [`crate::domain::SourceError`] rather than
/// being conflated with an empty result, so callers can tell "no meals for
/// this cuisine" apart from "network down". An empty `Vec` always means the
/// catalog answered with no matching records.
#[async_trait]
pub trait RecipeSource: Send + Sync {
    /// Fetch one random meal; `None` when the catalog returns no record
    async fn fetch_random(&self) -> Result<Option<RawMeal>>;

    /// Fetch up to `n` random meals with distinct ids
    ///
    /// Best-effort: draws are capped at a small multiple of `n`, and the
    /// batch may come back short rather than looping forever.
    async fn fetch_random_batch(&self, n: usize) -> Result<Vec<RawMeal>>;

    /// Search full meal records by name
    async fn search_by_name(&self, term: &str) -> Result<Vec<RawMeal>>;

    /// Search full meal records by first letter
    async fn search_by_first_letter(&self, letter: char) -> Result<Vec<RawMeal>>;

    /// Look up one meal by its catalog id; `None` when absent
    async fn lookup_by_id(&self, id: &MealId) -> Result<Option<RawMeal>>;

    /// List all categories
    async fn list_categories(&self) -> Result<Vec<RawCategory>>;

    /// List all areas
    async fn list_areas(&self) -> Result<Vec<RawArea>>;

    /// List the catalog's ingredient index
    async fn list_ingredients(&self) -> Result<Vec<RawIngredientListing>>;

    /// Filter meal summaries by category name
    async fn filter_by_category(&self, name: &str) -> Result<Vec<RawMealSummary>>;

    /// Filter meal summaries by area name
    async fn filter_by_area(&self, name: &str) -> Result<Vec<RawMealSummary>>;

    /// Filter meal summaries by main ingredient
    async fn filter_by_ingredient(&self, name: &str) -> Result<Vec<RawMealSummary>>;
}
