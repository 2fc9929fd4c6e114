//! Run summary and reporting
//!
//! Structures for tracking and reporting the outcome of a pipeline run.
//! A summary is produced for every run that reaches the end of its phase
//! sequence, regardless of how many individual records were skipped.

use std::fmt;
use std::time::Duration;

/// Entry mode of a pipeline run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Refresh reference data (categories/areas) and meals together
    Full,
    /// Refresh only meals
    Incremental,
    /// Load meals resolved from a user-supplied search
    Search,
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RunMode::Full => "full",
            RunMode::Incremental => "incremental",
            RunMode::Search => "search",
        };
        f.write_str(s)
    }
}

/// Summary of one pipeline run
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Entry mode of the run
    pub mode: RunMode,

    /// Meals written to the store (inserted plus updated)
    pub meals_loaded: usize,

    /// Ingredient rows inserted
    pub ingredients_loaded: usize,

    /// Categories loaded by a reference refresh
    pub categories_loaded: usize,

    /// Areas loaded by a reference refresh
    pub areas_loaded: usize,

    /// Records dropped during Extract or Transform (malformed, absent on
    /// lookup, duplicate)
    pub records_skipped: usize,

    /// Duration of the run
    pub duration: Duration,

    /// Errors recorded during the run
    pub errors: Vec<RunError>,
}

impl RunSummary {
    /// Create a new empty summary for a mode
    pub fn new(mode: RunMode) -> Self {
        Self {
            mode,
            meals_loaded: 0,
            ingredients_loaded: 0,
            categories_loaded: 0,
            areas_loaded: 0,
            records_skipped: 0,
            duration: Duration::from_secs(0),
            errors: Vec::new(),
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Record an error
    pub fn add_error(&mut self, error: RunError) {
        self.errors.push(error);
    }

    /// A run is clean when nothing was skipped and no errors were recorded
    pub fn is_clean(&self) -> bool {
        self.records_skipped == 0 && self.errors.is_empty()
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            mode = %self.mode,
            meals = self.meals_loaded,
            ingredients = self.ingredients_loaded,
            categories = self.categories_loaded,
            areas = self.areas_loaded,
            skipped = self.records_skipped,
            duration_secs = self.duration.as_secs(),
            "Pipeline run completed"
        );

        if !self.errors.is_empty() {
            tracing::warn!(
                error_count = self.errors.len(),
                "Pipeline run completed with errors"
            );
            for error in &self.errors {
                tracing::warn!(
                    error_type = ?error.error_type,
                    message = %error.message,
                    context = error.context.as_deref().unwrap_or(""),
                    "Run error"
                );
            }
        }
    }
}

/// Kind of error recorded in a run summary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunErrorType {
    /// Recipe source unavailable or returned a bad response
    Source,
    /// Record failed transformation
    Transform,
    /// Store write failed
    Storage,
    /// Bad invocation or record contents
    Validation,
}

/// A recorded run error with optional context
#[derive(Debug, Clone)]
pub struct RunError {
    /// Type of error
    pub error_type: RunErrorType,

    /// Error message
    pub message: String,

    /// Optional context (e.g. meal id, search term)
    pub context: Option<String>,
}

impl RunError {
    /// Create a new run error
    pub fn new(error_type: RunErrorType, message: impl Into<String>) -> Self {
        Self {
            error_type,
            message: message.into(),
            context: None,
        }
    }

    /// Add context to the error
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_starts_empty() {
        let summary = RunSummary::new(RunMode::Full);
        assert_eq!(summary.meals_loaded, 0);
        assert_eq!(summary.records_skipped, 0);
        assert!(summary.errors.is_empty());
        assert!(summary.is_clean());
    }

    #[test]
    fn test_summary_with_duration() {
        let summary = RunSummary::new(RunMode::Search).with_duration(Duration::from_secs(7));
        assert_eq!(summary.duration, Duration::from_secs(7));
    }

    #[test]
    fn test_summary_not_clean_after_skip_or_error() {
        let mut summary = RunSummary::new(RunMode::Incremental);
        summary.records_skipped = 1;
        assert!(!summary.is_clean());

        let mut summary = RunSummary::new(RunMode::Incremental);
        summary.add_error(RunError::new(RunErrorType::Source, "catalog down"));
        assert!(!summary.is_clean());
    }

    #[test]
    fn test_run_error_with_context() {
        let error =
            RunError::new(RunErrorType::Storage, "insert failed").with_context("meal_id=52772");
        assert_eq!(error.context.as_deref(), Some("meal_id=52772"));
    }

    #[test]
    fn test_run_mode_display() {
        assert_eq!(RunMode::Full.to_string(), "full");
        assert_eq!(RunMode::Incremental.to_string(), "incremental");
        assert_eq!(RunMode::Search.to_string(), "search");
    }
}
