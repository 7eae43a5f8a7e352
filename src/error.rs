//! Custom error types for the expense tracker
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions. Input validation failures have their own
//! type so the form can report exactly which field was rejected.

use thiserror::Error;

/// A rejected form field
///
/// Checks run in field order and stop at the first failure, so at most one
/// of these is reported per submission.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The item name was empty
    #[error("Item name cannot be empty")]
    EmptyItem,

    /// The item count was not made of digits only
    #[error("Number of items must be a whole number, got '{0}'")]
    InvalidItemCount(String),

    /// The cost could not be parsed as a number
    #[error("Cost must be a number, got '{0}'")]
    CostNotANumber(String),

    /// The cost parsed but was zero or negative
    #[error("Cost must be greater than zero, got '{0}'")]
    CostNotPositive(String),
}

impl ValidationError {
    /// Name of the form field this error refers to
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyItem => "Item",
            Self::InvalidItemCount(_) => "Number of Items",
            Self::CostNotANumber(_) | Self::CostNotPositive(_) => "Cost",
        }
    }
}

/// The main error type for expense tracker operations
#[derive(Error, Debug)]
pub enum ExpenseError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// SQLite errors from a month partition
    #[error("Database error: {0}")]
    Database(String),

    /// Rejected form input
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A month argument that could not be parsed
    #[error("Invalid month '{0}': expected YYYY-MM")]
    InvalidMonth(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// TUI errors
    #[error("TUI error: {0}")]
    Tui(String),
}

impl ExpenseError {
    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this error came from the database layer
    pub fn is_database(&self) -> bool {
        matches!(self, Self::Database(_))
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for ExpenseError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ExpenseError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<rusqlite::Error> for ExpenseError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<csv::Error> for ExpenseError {
    fn from(err: csv::Error) -> Self {
        Self::Export(err.to_string())
    }
}

/// Result type alias for expense tracker operations
pub type ExpenseResult<T> = Result<T, ExpenseError>;
