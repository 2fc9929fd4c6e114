//! Init command implementation
//!
//! Runs the idempotent database schema setup.

use crate::adapters::storage::RecipeStore;
use crate::cli::commands::connect_store;
use crate::config::load_config;
use clap::Args;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Failed to load configuration: {e}");
                return Ok(2);
            }
        };

        let (pg_client, store) = match connect_store(&config).await {
            Ok(pair) => pair,
            Err(e) => {
                eprintln!("Failed to connect to database: {e}");
                return Ok(2);
            }
        };

        let exit_code = match store.ensure_schema().await {
            Ok(()) => {
                println!(
                    "Schema initialized on {}",
                    pg_client.connection_string_safe()
                );
                0
            }
            Err(e) => {
                eprintln!("Schema setup failed: {e}");
                2
            }
        };

        pg_client.close();
        Ok(exit_code)
    }
}
