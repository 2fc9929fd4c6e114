//! PostgreSQL adapter
//!
//! Pooled client, recipe store, and operation-log writer.

pub mod client;
pub mod logs;
pub mod store;

pub use client::PgClient;
pub use logs::PgOperationLogWriter;
pub use store::PgRecipeStore;
