//! Configuration management
//!
//! TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! Larder reads `larder.toml` with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `LARDER_*` environment overrides
//! - Default values for optional settings
//! - Validation on load
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [source]
//! base_url = "https://www.themealdb.com/api/json/v1/1"
//! timeout_seconds = 30
//!
//! [database]
//! connection_string = "${LARDER_DATABASE_URL}"
//!
//! [pipeline]
//! batch_size = 10
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{
    ApplicationConfig, DatabaseConfig, LarderConfig, LoggingConfig, PipelineConfig, SourceConfig,
};
