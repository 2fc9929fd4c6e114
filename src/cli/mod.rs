//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Larder using clap.
//! It is a thin wrapper: all pipeline behavior lives in [`crate::core`].

pub mod commands;

use clap::{Parser, Subcommand};

/// Larder - Recipe Catalog ETL
#[derive(Parser, Debug)]
#[command(name = "larder")]
#[command(version, about, long_about = None)]
#[command(author = "Larder Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "larder.toml", env = "LARDER_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "LARDER_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run an ETL pipeline pass
    Run(commands::run::RunArgs),

    /// Initialize the database schema
    Init(commands::init::InitArgs),

    /// Show table counts and recent operation logs
    Status(commands::status::StatusArgs),
}
