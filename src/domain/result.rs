//! Result type alias
//!
//! Crate-wide result type so call sites don't repeat the error type.

use crate::domain::errors::LarderError;

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, LarderError>;
