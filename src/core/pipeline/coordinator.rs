//! Pipeline coordinator
//!
//! Sequences Extract → Transform → Load for the three run modes. Extract
//! and Transform failures are recorded per item and skipped; a Load
//! failure is fatal to the run because the writes already committed cannot
//! be rolled back.

use crate::adapters::mealdb::models::RawMeal;
use crate::adapters::mealdb::RecipeSource;
use crate::adapters::storage::RecipeStore;
use crate::core::pipeline::summary::{RunError, RunErrorType, RunMode, RunSummary};
use crate::core::transform;
use crate::domain::{LarderError, MealId, Result};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;

/// Kind of query driving a Search-mode run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    Name,
    Letter,
    Category,
    Area,
    Ingredient,
}

impl FromStr for SearchKind {
    type Err = LarderError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "letter" => Ok(Self::Letter),
            "category" => Ok(Self::Category),
            "area" => Ok(Self::Area),
            "ingredient" => Ok(Self::Ingredient),
            _ => Err(LarderError::Validation(format!(
                "Invalid search kind: {s}. Expected one of: name, letter, category, area, ingredient"
            ))),
        }
    }
}

/// Pipeline coordinator over a recipe source and a recipe store
///
/// One instance corresponds to one logical run at a time; execution is
/// strictly sequential and there is no cancellation mechanism. Runs are
/// re-runnable rather than atomic: the upsert discipline makes repeating a
/// partially-completed run safe.
pub struct Pipeline {
    source: Arc<dyn RecipeSource>,
    store: Arc<dyn RecipeStore>,
}

impl Pipeline {
    /// Create a new pipeline coordinator
    pub fn new(source: Arc<dyn RecipeSource>, store: Arc<dyn RecipeStore>) -> Self {
        Self { source, store }
    }

    /// Full run: refresh categories and areas, then load `count` random
    /// meals with their ingredients
    pub async fn run_full(&self, count: usize) -> Result<RunSummary> {
        let start = Instant::now();
        let mut summary = RunSummary::new(RunMode::Full);

        tracing::info!(count = count, "Starting full pipeline run");

        // Extract
        let raw_meals = self.extract_random_meals(count, &mut summary).await;
        let raw_categories = match self.source.list_categories().await {
            Ok(categories) => categories,
            Err(e) => {
                tracing::error!(error = %e, "Category extraction failed, keeping previous set");
                summary.add_error(RunError::new(RunErrorType::Source, e.to_string()));
                Vec::new()
            }
        };
        let raw_areas = match self.source.list_areas().await {
            Ok(areas) => areas,
            Err(e) => {
                tracing::error!(error = %e, "Area extraction failed, keeping previous set");
                summary.add_error(RunError::new(RunErrorType::Source, e.to_string()));
                Vec::new()
            }
        };

        // Transform
        let categories = transform::to_category_batch(&raw_categories);
        summary.records_skipped += raw_categories.len() - categories.len();
        let areas = transform::to_area_batch(&raw_areas);
        summary.records_skipped += raw_areas.len() - areas.len();

        // Load reference data before meals, so dashboards never observe
        // meals without reference rows on a cold store. An empty set means
        // extraction failed or the catalog was empty; the previous rows are
        // kept rather than truncated away.
        if !categories.is_empty() {
            summary.categories_loaded = self.store.replace_categories(&categories).await.map_err(
                |e| {
                    tracing::error!(error = %e, "Category load failed, aborting run");
                    e
                },
            )?;
        }
        if !areas.is_empty() {
            summary.areas_loaded = self.store.replace_areas(&areas).await.map_err(|e| {
                tracing::error!(error = %e, "Area load failed, aborting run");
                e
            })?;
        }

        self.transform_and_load_meals(raw_meals, &mut summary).await?;

        let summary = summary.with_duration(start.elapsed());
        summary.log_summary();
        Ok(summary)
    }

    /// Incremental run: load `count` random meals, skipping the
    /// reference-data refresh
    pub async fn run_incremental(&self, count: usize) -> Result<RunSummary> {
        let start = Instant::now();
        let mut summary = RunSummary::new(RunMode::Incremental);

        tracing::info!(count = count, "Starting incremental pipeline run");

        let raw_meals = self.extract_random_meals(count, &mut summary).await;
        self.transform_and_load_meals(raw_meals, &mut summary).await?;

        let summary = summary.with_duration(start.elapsed());
        summary.log_summary();
        Ok(summary)
    }

    /// Search run: resolve candidates for the term, fetch full detail per
    /// candidate, then load
    pub async fn run_search(&self, term: &str, kind: SearchKind) -> Result<RunSummary> {
        let start = Instant::now();
        let mut summary = RunSummary::new(RunMode::Search);

        tracing::info!(term = %term, kind = ?kind, "Starting search pipeline run");

        let candidate_ids = self.resolve_candidates(term, kind, &mut summary).await?;

        if candidate_ids.is_empty() {
            tracing::info!(term = %term, kind = ?kind, "No meals found for search");
            let summary = summary.with_duration(start.elapsed());
            summary.log_summary();
            return Ok(summary);
        }

        // Filter endpoints return summaries without ingredients or
        // instructions, so every candidate goes through a full lookup.
        // Lookups are issued serially; each is bounded by the request
        // timeout.
        let mut raw_meals = Vec::with_capacity(candidate_ids.len());
        for id in &candidate_ids {
            match self.source.lookup_by_id(id).await {
                Ok(Some(raw)) => raw_meals.push(raw),
                Ok(None) => {
                    tracing::warn!(meal_id = %id, "Lookup returned no record, skipping");
                    summary.records_skipped += 1;
                }
                Err(e) => {
                    tracing::warn!(meal_id = %id, error = %e, "Lookup failed, skipping");
                    summary.records_skipped += 1;
                    summary.add_error(
                        RunError::new(RunErrorType::Source, e.to_string())
                            .with_context(format!("meal_id={id}")),
                    );
                }
            }
        }

        self.transform_and_load_meals(raw_meals, &mut summary).await?;

        let summary = summary.with_duration(start.elapsed());
        summary.log_summary();
        Ok(summary)
    }

    /// Extract random meals; source failures are recorded and yield an
    /// empty batch
    async fn extract_random_meals(&self, count: usize, summary: &mut RunSummary) -> Vec<RawMeal> {
        match self.source.fetch_random_batch(count).await {
            Ok(meals) => {
                tracing::info!(
                    requested = count,
                    extracted = meals.len(),
                    "Extracted random meals"
                );
                if meals.len() < count {
                    summary.records_skipped += count - meals.len();
                }
                meals
            }
            Err(e) => {
                tracing::error!(error = %e, "Random meal extraction failed");
                summary.add_error(RunError::new(RunErrorType::Source, e.to_string()));
                Vec::new()
            }
        }
    }

    /// Resolve the candidate meal ids for a search term
    async fn resolve_candidates(
        &self,
        term: &str,
        kind: SearchKind,
        summary: &mut RunSummary,
    ) -> Result<Vec<MealId>> {
        let raw_ids: Vec<Option<String>> = match kind {
            SearchKind::Name => match self.source.search_by_name(term).await {
                Ok(meals) => meals.into_iter().map(|m| m.id).collect(),
                Err(e) => {
                    summary.add_error(RunError::new(RunErrorType::Source, e.to_string()));
                    Vec::new()
                }
            },
            SearchKind::Letter => {
                // Letter searches use the first character of the term;
                // rejected before any I/O when the term is empty.
                let letter = term.trim().chars().next().ok_or_else(|| {
                    LarderError::Validation(
                        "Letter search requires a non-empty term".to_string(),
                    )
                })?;
                match self.source.search_by_first_letter(letter).await {
                    Ok(meals) => meals.into_iter().map(|m| m.id).collect(),
                    Err(e) => {
                        summary.add_error(RunError::new(RunErrorType::Source, e.to_string()));
                        Vec::new()
                    }
                }
            }
            SearchKind::Category => match self.source.filter_by_category(term).await {
                Ok(summaries) => summaries.into_iter().map(|s| s.id).collect(),
                Err(e) => {
                    summary.add_error(RunError::new(RunErrorType::Source, e.to_string()));
                    Vec::new()
                }
            },
            SearchKind::Area => match self.source.filter_by_area(term).await {
                Ok(summaries) => summaries.into_iter().map(|s| s.id).collect(),
                Err(e) => {
                    summary.add_error(RunError::new(RunErrorType::Source, e.to_string()));
                    Vec::new()
                }
            },
            SearchKind::Ingredient => match self.source.filter_by_ingredient(term).await {
                Ok(summaries) => summaries.into_iter().map(|s| s.id).collect(),
                Err(e) => {
                    summary.add_error(RunError::new(RunErrorType::Source, e.to_string()));
                    Vec::new()
                }
            },
        };

        let mut ids = Vec::with_capacity(raw_ids.len());
        for raw_id in raw_ids {
            match raw_id.as_deref().map(MealId::new) {
                Some(Ok(id)) => ids.push(id),
                _ => {
                    tracing::warn!("Search candidate without an id, skipping");
                    summary.records_skipped += 1;
                }
            }
        }

        Ok(ids)
    }

    /// Transform a raw meal batch and run the Load phase
    ///
    /// Meals are upserted first; the ingredient sets for exactly those meal
    /// ids are then replaced via the explicit delete-then-insert protocol.
    /// Any store failure aborts the run.
    async fn transform_and_load_meals(
        &self,
        raw_meals: Vec<RawMeal>,
        summary: &mut RunSummary,
    ) -> Result<()> {
        // Transform
        let meals = transform::to_meal_batch(&raw_meals);
        summary.records_skipped += raw_meals.len() - meals.len();
        let ingredients = transform::to_ingredient_batch(&raw_meals);

        tracing::info!(
            meals = meals.len(),
            ingredients = ingredients.len(),
            "Transformed meal batch"
        );

        if meals.is_empty() {
            tracing::info!("No meals to load");
            return Ok(());
        }

        // Load
        let outcome = self.store.upsert_meals(&meals).await.map_err(|e| {
            tracing::error!(error = %e, "Meal load failed, aborting run");
            e
        })?;
        summary.meals_loaded = outcome.total();

        let meal_ids: Vec<MealId> = meals.iter().map(|m| m.id.clone()).collect();
        self.store
            .delete_ingredients_for_meals(&meal_ids)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Ingredient delete failed, aborting run");
                e
            })?;

        if !ingredients.is_empty() {
            summary.ingredients_loaded =
                self.store.insert_ingredients(&ingredients).await.map_err(|e| {
                    tracing::error!(error = %e, "Ingredient load failed, aborting run");
                    e
                })?;
        }

        Ok(())
    }
}
