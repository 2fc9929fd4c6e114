//! ETL operation audit records
//!
//! One row is appended per persistence action, success or failure. Rows are
//! never updated or deleted; they exist only for observability.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a persistence action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationStatus {
    Success,
    Error,
}

impl OperationStatus {
    /// String form stored in the `status` column
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationStatus::Success => "SUCCESS",
            OperationStatus::Error => "ERROR",
        }
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pending audit entry, produced by the persistence manager before it is
/// appended to the store
#[derive(Debug, Clone, PartialEq)]
pub struct OperationLogEntry {
    /// Table plus action, e.g. `INSERT_MEALS`, `DELETE_INGREDIENTS`
    pub operation_type: String,

    /// Success or error
    pub status: OperationStatus,

    /// Number of records the action touched (zero on failure)
    pub records_processed: i32,

    /// Elapsed wall-clock seconds for the action
    pub execution_time: f64,

    /// Error message when status is `Error`
    pub error_message: Option<String>,
}

impl OperationLogEntry {
    /// Create a success entry
    pub fn success(operation_type: impl Into<String>, records: i32, elapsed_secs: f64) -> Self {
        Self {
            operation_type: operation_type.into(),
            status: OperationStatus::Success,
            records_processed: records,
            execution_time: elapsed_secs,
            error_message: None,
        }
    }

    /// Create an error entry; record count is forced to zero
    pub fn error(
        operation_type: impl Into<String>,
        elapsed_secs: f64,
        message: impl Into<String>,
    ) -> Self {
        Self {
            operation_type: operation_type.into(),
            status: OperationStatus::Error,
            records_processed: 0,
            execution_time: elapsed_secs,
            error_message: Some(message.into()),
        }
    }
}

/// A persisted audit row read back from the store
#[derive(Debug, Clone)]
pub struct OperationLog {
    pub id: i64,
    pub operation_type: String,
    pub status: String,
    pub records_processed: i32,
    pub execution_time: f64,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_as_str() {
        assert_eq!(OperationStatus::Success.as_str(), "SUCCESS");
        assert_eq!(OperationStatus::Error.as_str(), "ERROR");
    }

    #[test]
    fn test_success_entry() {
        let entry = OperationLogEntry::success("INSERT_MEALS", 12, 0.42);
        assert_eq!(entry.status, OperationStatus::Success);
        assert_eq!(entry.records_processed, 12);
        assert!(entry.error_message.is_none());
    }

    #[test]
    fn test_error_entry_zeroes_count() {
        let entry = OperationLogEntry::error("INSERT_MEALS", 0.1, "connection reset");
        assert_eq!(entry.status, OperationStatus::Error);
        assert_eq!(entry.records_processed, 0);
        assert_eq!(entry.error_message.as_deref(), Some("connection reset"));
    }
}
