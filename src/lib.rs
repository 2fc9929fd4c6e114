// Larder - Recipe Catalog ETL
// Copyright (c) 2025 Larder Contributors
// Licensed under the MIT License

//! # Larder - Recipe Catalog ETL
//!
//! Larder is a batch ETL job that pulls recipe records from an external
//! recipe catalog service, reshapes each flat, positionally-encoded record
//! into normalized relational entities, and loads them into PostgreSQL
//! with upsert semantics and an append-only operation audit trail.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Extracting** raw records from the catalog's JSON API
//! - **Transforming** flat records into meals, ingredients, categories,
//!   and areas
//! - **Loading** entities into PostgreSQL with update-or-insert semantics
//!   and wholesale ingredient replacement per reloaded meal
//!
//! ## Architecture
//!
//! Larder follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (transformation, pipeline orchestration)
//! - [`adapters`] - External integrations (recipe catalog, PostgreSQL)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use larder::adapters::mealdb::MealDbClient;
//! use larder::adapters::postgres::{PgClient, PgOperationLogWriter, PgRecipeStore};
//! use larder::adapters::storage::RecipeStore;
//! use larder::config::load_config;
//! use larder::core::pipeline::Pipeline;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("larder.toml")?;
//!
//!     let pg_client = Arc::new(PgClient::new(config.database.clone())?);
//!     let logs = Arc::new(PgOperationLogWriter::new(pg_client.clone()));
//!     let store = Arc::new(PgRecipeStore::new(pg_client.clone(), logs));
//!     store.ensure_schema().await?;
//!
//!     let source = Arc::new(MealDbClient::new(&config.source)?);
//!     let pipeline = Pipeline::new(source, store);
//!
//!     let summary = pipeline.run_full(20).await?;
//!     println!("Loaded {} meals", summary.meals_loaded);
//!     Ok(())
//! }
//! ```
//!
//! ## Run modes
//!
//! - **Full** refreshes categories and areas, then upserts a batch of
//!   random meals and replaces their ingredient sets.
//! - **Incremental** skips the reference-data refresh; intended for
//!   frequent small top-ups.
//! - **Search** resolves candidates by name, first letter, category,
//!   area, or ingredient, fetches full detail per candidate, and loads
//!   the result like any other batch.
//!
//! Runs are re-runnable rather than atomic: each store write is its own
//! unit of work, and the upsert discipline makes repeating a partially
//! completed run safe.
//!
//! ## Error Handling
//!
//! Larder uses the [`domain::LarderError`] type for all errors:
//!
//! ```rust,no_run
//! use larder::domain::LarderError;
//!
//! fn example() -> Result<(), LarderError> {
//!     let config = larder::config::load_config("larder.toml")?;
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
