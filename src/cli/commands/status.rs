//! Status command implementation
//!
//! Displays table counts and the most recent ETL operation logs.

use crate::adapters::storage::{RecipeStore, TableName};
use crate::cli::commands::connect_store;
use crate::config::load_config;
use clap::Args;

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Number of recent operation logs to show
    #[arg(long, default_value_t = 10)]
    pub limit: i64,
}

impl StatusArgs {
    /// Execute the status command
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

        println!("Store: {}", pg_client.connection_string_safe());
        println!();
        println!("Table counts:");
        for table in [
            TableName::Meals,
            TableName::Ingredients,
            TableName::Categories,
            TableName::Areas,
            TableName::EtlLogs,
        ] {
            match store.table_count(table).await {
                Ok(count) => println!("  {:<12} {count}", format!("{table}:")),
                Err(e) => {
                    eprintln!("Failed to count {table}: {e}");
                    pg_client.close();
                    return Ok(2);
                }
            }
        }

        println!();
        match store.recent_logs(self.limit).await {
            Ok(logs) if logs.is_empty() => {
                println!("No ETL operations recorded yet.");
                println!("Run 'larder run full' to load data.");
            }
            Ok(logs) => {
                println!("Recent operations (newest first):");
                println!(
                    "{:<22} {:<9} {:>8} {:>10}  {}",
                    "Operation", "Status", "Records", "Seconds", "When"
                );
                println!("{}", "-".repeat(80));
                for log in logs {
                    println!(
                        "{:<22} {:<9} {:>8} {:>10.2}  {}",
                        log.operation_type,
                        log.status,
                        log.records_processed,
                        log.execution_time,
                        log.created_at.format("%Y-%m-%d %H:%M:%S")
                    );
                    if let Some(message) = log.error_message {
                        println!("    error: {message}");
                    }
                }
            }
            Err(e) => {
                eprintln!("Failed to read operation logs: {e}");
                pg_client.close();
                return Ok(2);
            }
        }

        pg_client.close();
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_args_default_limit() {
        let args = StatusArgs { limit: 10 };
        assert_eq!(args.limit, 10);
    }
}
