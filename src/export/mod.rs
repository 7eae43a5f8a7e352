//! Export module for the expense tracker
//!
//! Exports one month of expenses:
//! - CSV: spreadsheet-compatible rows
//! - JSON: rows plus export metadata

pub mod csv;
pub mod json;

pub use self::csv::export_expenses_csv;
pub use self::json::{export_expenses_json, MonthExport, EXPORT_SCHEMA_VERSION};

use clap::ValueEnum;

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    /// File extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}
