// Larder - Recipe Catalog ETL
// Copyright (c) 2025 Larder Contributors
// Licensed under the MIT License

use clap::Parser;
use larder::cli::{Cli, Commands};
use larder::config::LoggingConfig;
use larder::logging::init_logging;
use std::process;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Console-only logging for the CLI; file logging is configured per
    // deployment through larder.toml and used by the library path.
    let log_level = cli.log_level.as_deref().unwrap_or("info");
    let logging_config = LoggingConfig::default();
    if let Err(e) = init_logging(log_level, &logging_config) {
        eprintln!("Failed to initialize logging: {e}");
        process::exit(2);
    }

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Larder - Recipe Catalog ETL"
    );

    let exit_code = match execute_command(&cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            2
        }
    };

    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(cli: &Cli) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Run(args) => args.execute(&cli.config).await,
        Commands::Init(args) => args.execute(&cli.config).await,
        Commands::Status(args) => args.execute(&cli.config).await,
    }
}
