//! Run command implementation
//!
//! Executes a full, incremental, or search pipeline pass and prints the
//! run summary.

use crate::adapters::mealdb::MealDbClient;
use crate::adapters::storage::{RecipeStore, TableName};
use crate::cli::commands::connect_store;
use crate::config::load_config;
use crate::core::pipeline::{Pipeline, RunSummary, SearchKind};
use clap::{Args, Subcommand};
use std::str::FromStr;
use std::sync::Arc;

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Pipeline mode
    #[command(subcommand)]
    pub mode: RunCommand,
}

/// Pipeline run modes
#[derive(Subcommand, Debug)]
pub enum RunCommand {
    /// Refresh categories and areas, then load random meals
    Full {
        /// Number of random meals to load (defaults to pipeline.batch_size)
        #[arg(long)]
        count: Option<usize>,
    },

    /// Load random meals without refreshing reference data
    Incremental {
        /// Number of random meals to load (defaults to pipeline.batch_size)
        #[arg(long)]
        count: Option<usize>,
    },

    /// Search the catalog and load the matching meals
    Search {
        /// Search term
        term: String,

        /// Search kind: name, letter, category, area, ingredient
        #[arg(long, default_value = "name")]
        kind: String,
    },
}

impl RunArgs {
    /// Execute the run command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Failed to load configuration: {e}");
                return Ok(2);
            }
        };

        // Reject a bad search kind before touching the network or the store
        let parsed_search = match &self.mode {
            RunCommand::Search { term, kind } => match SearchKind::from_str(kind) {
                Ok(parsed) => Some((term.clone(), parsed)),
                Err(e) => {
                    eprintln!("{e}");
                    return Ok(2);
                }
            },
            _ => None,
        };

        let (pg_client, store) = match connect_store(&config).await {
            Ok(pair) => pair,
            Err(e) => {
                eprintln!("Failed to connect to database: {e}");
                return Ok(2);
            }
        };

        // Schema setup is idempotent, so a run works against a cold store
        if let Err(e) = store.ensure_schema().await {
            eprintln!("Schema setup failed: {e}");
            pg_client.close();
            return Ok(2);
        }

        let source = match MealDbClient::new(&config.source) {
            Ok(client) => Arc::new(client),
            Err(e) => {
                eprintln!("Failed to create source client: {e}");
                pg_client.close();
                return Ok(2);
            }
        };

        let pipeline = Pipeline::new(source, store.clone());

        let result = match &self.mode {
            RunCommand::Full { count } => {
                pipeline
                    .run_full(count.unwrap_or(config.pipeline.batch_size))
                    .await
            }
            RunCommand::Incremental { count } => {
                pipeline
                    .run_incremental(count.unwrap_or(config.pipeline.batch_size))
                    .await
            }
            RunCommand::Search { .. } => {
                let (term, kind) = parsed_search.expect("search arguments parsed above");
                pipeline.run_search(&term, kind).await
            }
        };

        let exit_code = match result {
            Ok(summary) => {
                print_summary(&summary, store.as_ref()).await;
                if summary.errors.is_empty() {
                    0
                } else {
                    1
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Pipeline run failed");
                eprintln!("Pipeline run failed: {e}");
                2
            }
        };

        pg_client.close();
        Ok(exit_code)
    }
}

/// Print the per-run summary and current table totals
async fn print_summary(summary: &RunSummary, store: &dyn RecipeStore) {
    println!();
    println!("{}", "=".repeat(50));
    println!("PIPELINE RUN SUMMARY ({})", summary.mode);
    println!("{}", "=".repeat(50));
    println!("Meals loaded:       {}", summary.meals_loaded);
    println!("Ingredients loaded: {}", summary.ingredients_loaded);
    println!("Categories loaded:  {}", summary.categories_loaded);
    println!("Areas loaded:       {}", summary.areas_loaded);
    println!("Records skipped:    {}", summary.records_skipped);
    println!("Errors recorded:    {}", summary.errors.len());
    println!("Duration:           {:.2}s", summary.duration.as_secs_f64());

    println!("{}", "-".repeat(50));
    for table in [
        TableName::Meals,
        TableName::Ingredients,
        TableName::Categories,
        TableName::Areas,
    ] {
        match store.table_count(table).await {
            Ok(count) => println!("Total {:<12} {count}", format!("{table}:")),
            Err(e) => println!("Total {:<12} unavailable ({e})", format!("{table}:")),
        }
    }
    println!("{}", "=".repeat(50));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_command_search_defaults_to_name_kind() {
        let args = RunArgs {
            mode: RunCommand::Search {
                term: "Arrabiata".to_string(),
                kind: "name".to_string(),
            },
        };

        if let RunCommand::Search { kind, .. } = &args.mode {
            assert!(SearchKind::from_str(kind).is_ok());
        } else {
            panic!("expected search mode");
        }
    }
}
