//! Storage abstraction traits
//!
//! This module defines the persistence seam the orchestrator runs against.
//! The production implementation lives in [`crate::adapters::postgres`];
//! tests use in-memory implementations.

use crate::domain::{
    Area, Category, Ingredient, Meal, MealId, OperationLog, OperationLogEntry, Result,
};
use async_trait::async_trait;
use std::fmt;
use std::str::FromStr;

/// Tables managed by the pipeline
///
/// `table_count` accepts only known tables, so a table name can never be
/// spliced into SQL from free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableName {
    Meals,
    Ingredients,
    Categories,
    Areas,
    EtlLogs,
}

impl TableName {
    /// SQL identifier for this table
    pub fn as_str(&self) -> &'static str {
        match self {
            TableName::Meals => "meals",
            TableName::Ingredients => "ingredients",
            TableName::Categories => "categories",
            TableName::Areas => "areas",
            TableName::EtlLogs => "etl_logs",
        }
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TableName {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "meals" => Ok(TableName::Meals),
            "ingredients" => Ok(TableName::Ingredients),
            "categories" => Ok(TableName::Categories),
            "areas" => Ok(TableName::Areas),
            "etl_logs" => Ok(TableName::EtlLogs),
            _ => Err(format!("Unknown table: {s}")),
        }
    }
}

/// Outcome of a two-phase meal upsert
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpsertOutcome {
    /// Rows appended because their id was absent from the store
    pub inserted: usize,

    /// Rows updated in place because their id was already present
    pub updated: usize,
}

impl UpsertOutcome {
    /// Total rows written
    pub fn total(&self) -> usize {
        self.inserted + self.updated
    }
}

/// Persistence contract for the recipe store
///
/// The store is the only component that performs writes. Every write
/// appends an ETL operation-log row through the [`OperationLogWriter`]
/// handed to the implementation, on success and on failure alike. A write
/// failure is returned to the caller after the audit row is appended;
/// partial writes committed before the failure are not rolled back.
#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// Run idempotent schema setup
    async fn ensure_schema(&self) -> Result<()>;

    /// Upsert meals keyed by catalog id
    ///
    /// Partitions the batch into insert and update intents using a single
    /// existing-id lookup, then executes the two groups as batched writes.
    async fn upsert_meals(&self, meals: &[Meal]) -> Result<UpsertOutcome>;

    /// Append ingredient rows
    ///
    /// Callers must have already deleted the previous ingredient set for
    /// the affected meals; see [`RecipeStore::delete_ingredients_for_meals`].
    async fn insert_ingredients(&self, ingredients: &[Ingredient]) -> Result<usize>;

    /// Delete all ingredient rows owned by the given meals
    ///
    /// First half of the explicit two-call replacement protocol: delete by
    /// meal ids here, then insert the fresh batch. The orchestrator
    /// sequences the two calls; there is no hidden cascade.
    async fn delete_ingredients_for_meals(&self, meal_ids: &[MealId]) -> Result<u64>;

    /// Replace the full category set (truncate then insert)
    async fn replace_categories(&self, categories: &[Category]) -> Result<usize>;

    /// Replace the full area set (truncate then insert)
    async fn replace_areas(&self, areas: &[Area]) -> Result<usize>;

    /// Count rows in a managed table
    async fn table_count(&self, table: TableName) -> Result<i64>;

    /// Read the most recent operation-log rows, newest first
    async fn recent_logs(&self, limit: i64) -> Result<Vec<OperationLog>>;
}

/// Append-only sink for ETL operation-log entries
///
/// Passed into the store as an explicit dependency so audit contents are
/// deterministically testable. Implementations must never fail the parent
/// write: recording problems are logged and swallowed by the caller.
#[async_trait]
pub trait OperationLogWriter: Send + Sync {
    /// Append one audit entry
    async fn record(&self, entry: &OperationLogEntry) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_name_round_trip() {
        for table in [
            TableName::Meals,
            TableName::Ingredients,
            TableName::Categories,
            TableName::Areas,
            TableName::EtlLogs,
        ] {
            assert_eq!(TableName::from_str(table.as_str()).unwrap(), table);
        }
    }

    #[test]
    fn test_table_name_rejects_unknown() {
        assert!(TableName::from_str("users; DROP TABLE meals").is_err());
    }

    #[test]
    fn test_upsert_outcome_total() {
        let outcome = UpsertOutcome {
            inserted: 3,
            updated: 2,
        };
        assert_eq!(outcome.total(), 5);
    }
}
