//! Pipeline orchestration
//!
//! The coordinator sequences extraction, transformation, and loading for
//! the three run modes; the summary module reports per-run outcomes.

pub mod coordinator;
pub mod summary;

pub use coordinator::{Pipeline, SearchKind};
pub use summary::{RunError, RunErrorType, RunMode, RunSummary};
