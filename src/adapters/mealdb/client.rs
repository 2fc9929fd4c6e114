//! HTTP client for the recipe catalog
//!
//! Implements [`RecipeSource`] over the catalog's JSON API with a fixed
//! per-request timeout. There is no retry loop at this level; the
//! orchestrator owns retry/skip policy at the phase level.

use super::models::{
    AreasEnvelope, CategoriesEnvelope, IngredientsEnvelope, MealsEnvelope, RawArea, RawCategory,
    RawIngredientListing, RawMeal, RawMealSummary, SummariesEnvelope,
};
use super::RecipeSource;
use crate::config::SourceConfig;
use crate::domain::{LarderError, MealId, Result, SourceError};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::time::Duration;

/// Draw cap multiplier for the random-batch dedup loop
const RANDOM_ATTEMPT_FACTOR: usize = 3;

/// Recipe catalog client backed by reqwest
pub struct MealDbClient {
    /// Base URL of the catalog API, without a trailing slash
    base_url: String,

    /// HTTP client with the configured request timeout baked in
    client: Client,
}

impl MealDbClient {
    /// Create a new catalog client from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &SourceConfig) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                LarderError::Configuration(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Base URL this client is pointed at
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue a GET and decode the JSON envelope
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let url = format!("{}/{path}", self.base_url);

        tracing::debug!(url = %url, "Querying recipe source");

        let resp = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SourceError::Timeout(e.to_string())
                } else {
                    SourceError::ConnectionFailed(e.to_string())
                }
            })?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            let err = if status.is_server_error() {
                SourceError::ServerError {
                    status: status.as_u16(),
                    message,
                }
            } else {
                SourceError::ClientError {
                    status: status.as_u16(),
                    message,
                }
            };
            return Err(err.into());
        }

        resp.json::<T>()
            .await
            .map_err(|e| SourceError::InvalidResponse(e.to_string()).into())
    }
}

#[async_trait]
impl RecipeSource for MealDbClient {
    async fn fetch_random(&self) -> Result<Option<RawMeal>> {
        let envelope: MealsEnvelope = self.get_json("random.php", &[]).await?;
        Ok(envelope.meals.unwrap_or_default().into_iter().next())
    }

    async fn fetch_random_batch(&self, n: usize) -> Result<Vec<RawMeal>> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut batch = Vec::new();
        let max_attempts = n.saturating_mul(RANDOM_ATTEMPT_FACTOR);
        let mut attempts = 0;

        while batch.len() < n && attempts < max_attempts {
            attempts += 1;
            match self.fetch_random().await {
                Ok(Some(meal)) => match meal.id.clone() {
                    Some(id) => {
                        if seen.insert(id.clone()) {
                            batch.push(meal);
                        } else {
                            tracing::debug!(meal_id = %id, "Duplicate random draw, redrawing");
                        }
                    }
                    None => {
                        tracing::warn!("Random draw returned a record without an id, skipping");
                    }
                },
                Ok(None) => {
                    tracing::debug!("Random draw returned no record");
                }
                Err(e) => {
                    // Best-effort batch: an individual failed draw is logged
                    // and counted against the attempt cap.
                    tracing::warn!(error = %e, "Random draw failed, continuing");
                }
            }
        }

        if batch.len() < n {
            tracing::warn!(
                requested = n,
                delivered = batch.len(),
                attempts = attempts,
                "Random batch under-delivered"
            );
        }

        Ok(batch)
    }

    async fn search_by_name(&self, term: &str) -> Result<Vec<RawMeal>> {
        let envelope: MealsEnvelope = self.get_json("search.php", &[("s", term)]).await?;
        Ok(envelope.meals.unwrap_or_default())
    }

    async fn search_by_first_letter(&self, letter: char) -> Result<Vec<RawMeal>> {
        let letter = letter.to_string();
        let envelope: MealsEnvelope = self
            .get_json("search.php", &[("f", letter.as_str())])
            .await?;
        Ok(envelope.meals.unwrap_or_default())
    }

    async fn lookup_by_id(&self, id: &MealId) -> Result<Option<RawMeal>> {
        let envelope: MealsEnvelope = self.get_json("lookup.php", &[("i", id.as_str())]).await?;
        Ok(envelope.meals.unwrap_or_default().into_iter().next())
    }

    async fn list_categories(&self) -> Result<Vec<RawCategory>> {
        let envelope: CategoriesEnvelope = self.get_json("categories.php", &[]).await?;
        Ok(envelope.categories.unwrap_or_default())
    }

    async fn list_areas(&self) -> Result<Vec<RawArea>> {
        let envelope: AreasEnvelope = self.get_json("list.php", &[("a", "list")]).await?;
        Ok(envelope.meals.unwrap_or_default())
    }

    async fn list_ingredients(&self) -> Result<Vec<RawIngredientListing>> {
        let envelope: IngredientsEnvelope = self.get_json("list.php", &[("i", "list")]).await?;
        Ok(envelope.meals.unwrap_or_default())
    }

    async fn filter_by_category(&self, name: &str) -> Result<Vec<RawMealSummary>> {
        let envelope: SummariesEnvelope = self.get_json("filter.php", &[("c", name)]).await?;
        Ok(envelope.meals.unwrap_or_default())
    }

    async fn filter_by_area(&self, name: &str) -> Result<Vec<RawMealSummary>> {
        let envelope: SummariesEnvelope = self.get_json("filter.php", &[("a", name)]).await?;
        Ok(envelope.meals.unwrap_or_default())
    }

    async fn filter_by_ingredient(&self, name: &str) -> Result<Vec<RawMealSummary>> {
        let envelope: SummariesEnvelope = self.get_json("filter.php", &[("i", name)]).await?;
        Ok(envelope.meals.unwrap_or_default())
    }
}
