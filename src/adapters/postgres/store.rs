//! PostgreSQL recipe store
//!
//! Implements [`RecipeStore`] over the pooled client. Every write appends
//! an operation-log row through the injected [`OperationLogWriter`],
//! success or failure. Each statement is its own unit of work; a failure
//! mid-batch leaves the rows already written in place, and callers rely on
//! re-runnable upserts rather than rollback.

use crate::adapters::postgres::client::PgClient;
use crate::adapters::storage::{OperationLogWriter, RecipeStore, TableName, UpsertOutcome};
use crate::domain::{
    Area, Category, Ingredient, LarderError, Meal, MealId, OperationLog, OperationLogEntry, Result,
};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

/// Write intent for one meal, computed in a single pass over the batch
#[derive(Clone, Copy)]
enum WriteIntent<'a> {
    Insert(&'a Meal),
    Update(&'a Meal),
}

/// Split a schema file into individually executable statements
///
/// Comment-only fragments produced by the split are dropped.
fn schema_statements(sql: &str) -> Vec<String> {
    sql.split(';')
        .map(str::trim)
        .filter(|stmt| {
            stmt.lines()
                .map(str::trim)
                .any(|line| !line.is_empty() && !line.starts_with("--"))
        })
        .map(str::to_string)
        .collect()
}

/// Partition a meal batch into insert and update intents against the set of
/// ids already present in the store
fn partition_intents<'a>(meals: &'a [Meal], existing: &HashSet<String>) -> Vec<WriteIntent<'a>> {
    meals
        .iter()
        .map(|meal| {
            if existing.contains(meal.id.as_str()) {
                WriteIntent::Update(meal)
            } else {
                WriteIntent::Insert(meal)
            }
        })
        .collect()
}

/// PostgreSQL implementation of the persistence contract
pub struct PgRecipeStore {
    client: Arc<PgClient>,
    logs: Arc<dyn OperationLogWriter>,
}

impl PgRecipeStore {
    /// Create a store over an existing client and audit sink
    pub fn new(client: Arc<PgClient>, logs: Arc<dyn OperationLogWriter>) -> Self {
        Self { client, logs }
    }

    /// Get a reference to the underlying client
    pub fn client(&self) -> &Arc<PgClient> {
        &self.client
    }

    /// Append an audit entry; recording problems never fail the parent write
    async fn audit(&self, entry: OperationLogEntry) {
        if let Err(e) = self.logs.record(&entry).await {
            tracing::error!(
                operation = %entry.operation_type,
                error = %e,
                "Failed to append operation log row"
            );
        }
    }

    async fn insert_meal_row(&self, meal: &Meal) -> Result<()> {
        let insert = r#"
            INSERT INTO meals (
                id, meal_name, category, area, instructions, meal_thumb,
                tags, youtube, source, image_source,
                creative_commons_confirmed, date_modified
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        "#;

        self.client
            .execute(
                insert,
                &[
                    &meal.id.as_str(),
                    &meal.meal_name,
                    &meal.category,
                    &meal.area,
                    &meal.instructions,
                    &meal.meal_thumb,
                    &meal.tags,
                    &meal.youtube,
                    &meal.source,
                    &meal.image_source,
                    &meal.creative_commons_confirmed,
                    &meal.date_modified,
                ],
            )
            .await?;
        Ok(())
    }

    async fn update_meal_row(&self, meal: &Meal) -> Result<()> {
        let update = r#"
            UPDATE meals SET
                meal_name = $2,
                category = $3,
                area = $4,
                instructions = $5,
                meal_thumb = $6,
                tags = $7,
                youtube = $8,
                source = $9,
                image_source = $10,
                creative_commons_confirmed = $11,
                date_modified = $12,
                updated_at = CURRENT_TIMESTAMP
            WHERE id = $1
        "#;

        self.client
            .execute(
                update,
                &[
                    &meal.id.as_str(),
                    &meal.meal_name,
                    &meal.category,
                    &meal.area,
                    &meal.instructions,
                    &meal.meal_thumb,
                    &meal.tags,
                    &meal.youtube,
                    &meal.source,
                    &meal.image_source,
                    &meal.creative_commons_confirmed,
                    &meal.date_modified,
                ],
            )
            .await?;
        Ok(())
    }
}

#[async_trait]
impl RecipeStore for PgRecipeStore {
    async fn ensure_schema(&self) -> Result<()> {
        let schema_sql = include_str!("../../../migrations/001_initial_schema.sql");

        for statement in schema_statements(schema_sql) {
            match self.client.execute(&statement, &[]).await {
                Ok(_) => {}
                Err(e) if e.to_string().contains("already exists") => {
                    tracing::debug!(error = %e, "Schema object already exists, continuing");
                }
                Err(e) => {
                    tracing::error!(error = %e, "Schema statement failed");
                    return Err(e);
                }
            }
        }

        tracing::info!("Database schema initialized");
        Ok(())
    }

    async fn upsert_meals(&self, meals: &[Meal]) -> Result<UpsertOutcome> {
        if meals.is_empty() {
            tracing::debug!("Empty meal batch, nothing to upsert");
            return Ok(UpsertOutcome::default());
        }

        let start = Instant::now();

        // Single existing-id lookup for the whole batch
        let ids: Vec<&str> = meals.iter().map(|m| m.id.as_str()).collect();
        let rows = match self
            .client
            .query("SELECT id FROM meals WHERE id = ANY($1)", &[&ids])
            .await
        {
            Ok(rows) => rows,
            Err(e) => {
                self.audit(OperationLogEntry::error(
                    "UPSERT_MEALS",
                    start.elapsed().as_secs_f64(),
                    e.to_string(),
                ))
                .await;
                return Err(e);
            }
        };
        let existing: HashSet<String> = rows.iter().map(|row| row.get(0)).collect();

        let intents = partition_intents(meals, &existing);

        let mut outcome = UpsertOutcome::default();

        let insert_start = Instant::now();
        for intent in &intents {
            if let WriteIntent::Insert(meal) = *intent {
                if let Err(e) = self.insert_meal_row(meal).await {
                    tracing::error!(meal_id = %meal.id, error = %e, "Meal insert failed");
                    self.audit(OperationLogEntry::error(
                        "INSERT_MEALS",
                        insert_start.elapsed().as_secs_f64(),
                        e.to_string(),
                    ))
                    .await;
                    return Err(e);
                }
                outcome.inserted += 1;
            }
        }
        if outcome.inserted > 0 {
            self.audit(OperationLogEntry::success(
                "INSERT_MEALS",
                outcome.inserted as i32,
                insert_start.elapsed().as_secs_f64(),
            ))
            .await;
        }

        let update_start = Instant::now();
        for intent in &intents {
            if let WriteIntent::Update(meal) = *intent {
                if let Err(e) = self.update_meal_row(meal).await {
                    tracing::error!(meal_id = %meal.id, error = %e, "Meal update failed");
                    self.audit(OperationLogEntry::error(
                        "UPDATE_MEALS",
                        update_start.elapsed().as_secs_f64(),
                        e.to_string(),
                    ))
                    .await;
                    return Err(e);
                }
                outcome.updated += 1;
            }
        }
        if outcome.updated > 0 {
            self.audit(OperationLogEntry::success(
                "UPDATE_MEALS",
                outcome.updated as i32,
                update_start.elapsed().as_secs_f64(),
            ))
            .await;
        }

        tracing::info!(
            inserted = outcome.inserted,
            updated = outcome.updated,
            elapsed_secs = format!("{:.2}", start.elapsed().as_secs_f64()),
            "Upserted meal batch"
        );

        Ok(outcome)
    }

    async fn insert_ingredients(&self, ingredients: &[Ingredient]) -> Result<usize> {
        if ingredients.is_empty() {
            tracing::debug!("Empty ingredient batch, nothing to insert");
            return Ok(0);
        }

        let start = Instant::now();
        let insert = r#"
            INSERT INTO ingredients (meal_id, ingredient_name, measurement, ingredient_order)
            VALUES ($1, $2, $3, $4)
        "#;

        for ingredient in ingredients {
            if let Err(e) = self
                .client
                .execute(
                    insert,
                    &[
                        &ingredient.meal_id.as_str(),
                        &ingredient.ingredient_name,
                        &ingredient.measurement,
                        &ingredient.ingredient_order,
                    ],
                )
                .await
            {
                tracing::error!(
                    meal_id = %ingredient.meal_id,
                    error = %e,
                    "Ingredient insert failed"
                );
                self.audit(OperationLogEntry::error(
                    "INSERT_INGREDIENTS",
                    start.elapsed().as_secs_f64(),
                    e.to_string(),
                ))
                .await;
                return Err(e);
            }
        }

        self.audit(OperationLogEntry::success(
            "INSERT_INGREDIENTS",
            ingredients.len() as i32,
            start.elapsed().as_secs_f64(),
        ))
        .await;

        tracing::info!(count = ingredients.len(), "Inserted ingredient batch");
        Ok(ingredients.len())
    }

    async fn delete_ingredients_for_meals(&self, meal_ids: &[MealId]) -> Result<u64> {
        if meal_ids.is_empty() {
            return Ok(0);
        }

        let start = Instant::now();
        let ids: Vec<&str> = meal_ids.iter().map(|id| id.as_str()).collect();

        match self
            .client
            .execute("DELETE FROM ingredients WHERE meal_id = ANY($1)", &[&ids])
            .await
        {
            Ok(deleted) => {
                self.audit(OperationLogEntry::success(
                    "DELETE_INGREDIENTS",
                    deleted as i32,
                    start.elapsed().as_secs_f64(),
                ))
                .await;
                tracing::info!(
                    meals = meal_ids.len(),
                    rows = deleted,
                    "Deleted ingredients for reloaded meals"
                );
                Ok(deleted)
            }
            Err(e) => {
                self.audit(OperationLogEntry::error(
                    "DELETE_INGREDIENTS",
                    start.elapsed().as_secs_f64(),
                    e.to_string(),
                ))
                .await;
                Err(e)
            }
        }
    }

    async fn replace_categories(&self, categories: &[Category]) -> Result<usize> {
        let start = Instant::now();

        if let Err(e) = self.client.execute("DELETE FROM categories", &[]).await {
            self.audit(OperationLogEntry::error(
                "INSERT_CATEGORIES",
                start.elapsed().as_secs_f64(),
                e.to_string(),
            ))
            .await;
            return Err(e);
        }

        let insert = r#"
            INSERT INTO categories (id, category_name, category_thumb, category_description)
            VALUES ($1, $2, $3, $4)
        "#;

        for category in categories {
            if let Err(e) = self
                .client
                .execute(
                    insert,
                    &[
                        &category.id,
                        &category.category_name,
                        &category.category_thumb,
                        &category.category_description,
                    ],
                )
                .await
            {
                tracing::error!(category_id = %category.id, error = %e, "Category insert failed");
                self.audit(OperationLogEntry::error(
                    "INSERT_CATEGORIES",
                    start.elapsed().as_secs_f64(),
                    e.to_string(),
                ))
                .await;
                return Err(e);
            }
        }

        self.audit(OperationLogEntry::success(
            "INSERT_CATEGORIES",
            categories.len() as i32,
            start.elapsed().as_secs_f64(),
        ))
        .await;

        tracing::info!(count = categories.len(), "Replaced category set");
        Ok(categories.len())
    }

    async fn replace_areas(&self, areas: &[Area]) -> Result<usize> {
        let start = Instant::now();

        if let Err(e) = self.client.execute("DELETE FROM areas", &[]).await {
            self.audit(OperationLogEntry::error(
                "INSERT_AREAS",
                start.elapsed().as_secs_f64(),
                e.to_string(),
            ))
            .await;
            return Err(e);
        }

        for area in areas {
            if let Err(e) = self
                .client
                .execute(
                    "INSERT INTO areas (area_name) VALUES ($1)",
                    &[&area.area_name],
                )
                .await
            {
                tracing::error!(area = %area.area_name, error = %e, "Area insert failed");
                self.audit(OperationLogEntry::error(
                    "INSERT_AREAS",
                    start.elapsed().as_secs_f64(),
                    e.to_string(),
                ))
                .await;
                return Err(e);
            }
        }

        self.audit(OperationLogEntry::success(
            "INSERT_AREAS",
            areas.len() as i32,
            start.elapsed().as_secs_f64(),
        ))
        .await;

        tracing::info!(count = areas.len(), "Replaced area set");
        Ok(areas.len())
    }

    async fn table_count(&self, table: TableName) -> Result<i64> {
        let query = format!("SELECT COUNT(*) FROM {}", table.as_str());
        let rows = self.client.query(&query, &[]).await?;
        let row = rows
            .first()
            .ok_or_else(|| LarderError::Database("COUNT returned no rows".to_string()))?;
        Ok(row.get(0))
    }

    async fn recent_logs(&self, limit: i64) -> Result<Vec<OperationLog>> {
        let query = r#"
            SELECT id, operation_type, status, records_processed,
                   execution_time, error_message, created_at
            FROM etl_logs
            ORDER BY created_at DESC
            LIMIT $1
        "#;

        let rows = self.client.query(query, &[&limit]).await?;

        Ok(rows
            .iter()
            .map(|row| OperationLog {
                id: row.get("id"),
                operation_type: row.get("operation_type"),
                status: row.get("status"),
                records_processed: row.get("records_processed"),
                execution_time: row.get("execution_time"),
                error_message: row.get("error_message"),
                created_at: row.get("created_at"),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn meal(id: &str) -> Meal {
        Meal {
            id: MealId::from_str(id).unwrap(),
            meal_name: Some(format!("Meal {id}")),
            category: None,
            area: None,
            instructions: None,
            meal_thumb: None,
            tags: None,
            youtube: None,
            source: None,
            image_source: None,
            creative_commons_confirmed: None,
            date_modified: None,
        }
    }

    #[test]
    fn test_schema_statements_split_and_filter() {
        let sql = "-- leading comment\nCREATE TABLE a (id TEXT);\n\n-- trailing\nCREATE INDEX idx ON a(id);\n";
        let statements = schema_statements(sql);
        assert_eq!(statements.len(), 2);
        assert!(statements[0].contains("CREATE TABLE a"));
        assert!(statements[1].contains("CREATE INDEX idx"));
    }

    #[test]
    fn test_schema_statements_drop_comment_only_fragments() {
        let sql = "CREATE TABLE a (id TEXT);\n-- just a comment\n";
        let statements = schema_statements(sql);
        assert_eq!(statements.len(), 1);
    }

    #[test]
    fn test_partition_intents_single_pass() {
        let meals = vec![meal("1"), meal("2"), meal("3")];
        let existing: HashSet<String> = ["2".to_string()].into_iter().collect();

        let intents = partition_intents(&meals, &existing);
        assert_eq!(intents.len(), 3);
        assert!(matches!(intents[0], WriteIntent::Insert(m) if m.id.as_str() == "1"));
        assert!(matches!(intents[1], WriteIntent::Update(m) if m.id.as_str() == "2"));
        assert!(matches!(intents[2], WriteIntent::Insert(m) if m.id.as_str() == "3"));
    }

    #[test]
    fn test_partition_intents_all_new() {
        let meals = vec![meal("10"), meal("11")];
        let existing = HashSet::new();

        let intents = partition_intents(&meals, &existing);
        assert!(intents
            .iter()
            .all(|i| matches!(i, WriteIntent::Insert(_))));
    }
}
