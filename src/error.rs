//! Error type for fintrack
//!
//! Library code returns `FintrackResult`; the binary and the dashboard wrap
//! it in `anyhow` at the top level.

use thiserror::Error;

/// Errors raised by storage, services, reports and the interfaces
#[derive(Error, Debug)]
pub enum FintrackError {
    /// Unreadable `config.json` or a setting that cannot be used, such as a
    /// bad `date_format`
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data directory and file access
    #[error("I/O error: {0}")]
    Io(String),

    /// Malformed data files
    #[error("JSON error: {0}")]
    Json(String),

    /// Rejected input: non-positive amounts, empty descriptions, a category
    /// that does not fit the transaction type, unparseable CLI values
    #[error("Validation error: {0}")]
    Validation(String),

    /// No transaction or budget matches the given id or prefix
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// A budget already exists for that category and month
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// CSV or JSON import that cannot proceed at all (bad header, invalid
    /// export file); single bad CSV rows are reported, not raised
    #[error("Import error: {0}")]
    Import(String),

    /// Writing an export or report file failed
    #[error("Export error: {0}")]
    Export(String),

    /// Repository lock failures
    #[error("Storage error: {0}")]
    Storage(String),

    /// Dashboard terminal or event stream failures
    #[error("TUI error: {0}")]
    Tui(String),
}

impl FintrackError {
    /// Create a "not found" error for transactions
    pub fn transaction_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Transaction",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for budgets
    pub fn budget_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Budget",
            identifier: identifier.into(),
        }
    }

    /// The only budget uniqueness rule: one budget per category and month
    pub fn budget_exists(category: impl std::fmt::Display, month: impl std::fmt::Display) -> Self {
        Self::Duplicate {
            entity_type: "Budget",
            identifier: format!("{} for {}", category, month),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for FintrackError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for FintrackError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for fintrack operations
pub type FintrackResult<T> = Result<T, FintrackError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FintrackError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = FintrackError::budget_not_found("bud-12345678");
        assert_eq!(err.to_string(), "Budget not found: bud-12345678");
        assert!(err.is_not_found());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_duplicate_error() {
        let err = FintrackError::budget_exists("Food", "Jan 2025");
        assert!(matches!(err, FintrackError::Duplicate { .. }));
        assert_eq!(err.to_string(), "Budget already exists: Food for Jan 2025");
    }

    #[test]
    fn test_event_stream_error_display() {
        let err = FintrackError::Tui("terminal event stream closed".into());
        assert_eq!(err.to_string(), "TUI error: terminal event stream closed");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: FintrackError = io_err.into();
        assert!(matches!(err, FintrackError::Io(_)));
    }
}
