//! JSON Export functionality

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::Expense;
use crate::storage::Partition;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: u32 = 1;

/// A month's expenses with export metadata
#[derive(Debug, Serialize, Deserialize)]
pub struct MonthExport {
    pub schema_version: u32,
    pub partition: String,
    pub exported_at: DateTime<Utc>,
    pub total: f64,
    pub expenses: Vec<Expense>,
}

impl MonthExport {
    pub fn new(partition: Partition, expenses: Vec<Expense>) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION,
            partition: partition.to_string(),
            exported_at: Utc::now(),
            total: crate::models::total_cost(&expenses),
            expenses,
        }
    }
}

/// Write a pretty-printed JSON export
pub fn export_expenses_json<W: Write>(
    partition: Partition,
    expenses: &[Expense],
    mut writer: W,
) -> ExpenseResult<()> {
    let export = MonthExport::new(partition, expenses.to_vec());
    serde_json::to_writer_pretty(&mut writer, &export)
        .map_err(|e| ExpenseError::Export(format!("Failed to write JSON: {}", e)))?;
    writeln!(writer).map_err(|e| ExpenseError::Export(e.to_string()))?;
    Ok(())
}
