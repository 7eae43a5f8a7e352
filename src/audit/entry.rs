//! Audit entry data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Expense, ExpenseId};
use crate::storage::Partition;

/// Types of operations that can be audited
///
/// Expenses are never edited in place, so there is no update operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Expense was inserted
    Create,
    /// Expense was deleted
    Delete,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Delete => write!(f, "DELETE"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    /// Type of operation performed
    pub operation: Operation,

    /// Partition the expense belongs to (`2024-03` or `expenses.db`)
    pub partition: String,

    /// Id of the affected expense
    pub expense_id: ExpenseId,

    /// The expense as it was after a create or before a delete
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<serde_json::Value>,
}

impl AuditEntry {
    /// Entry for a freshly inserted expense
    pub fn create(partition: Partition, expense: &Expense) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Create,
            partition: partition.to_string(),
            expense_id: expense.id,
            snapshot: serde_json::to_value(expense).ok(),
        }
    }

    /// Entry for a deleted expense; the snapshot is absent when the row was
    /// already gone
    pub fn delete(partition: Partition, expense_id: ExpenseId, before: Option<&Expense>) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Delete,
            partition: partition.to_string(),
            expense_id,
            snapshot: before.and_then(|e| serde_json::to_value(e).ok()),
        }
    }

    /// One-line human-readable form
    pub fn format_human_readable(&self) -> String {
        let item = self
            .snapshot
            .as_ref()
            .and_then(|s| s.get("item"))
            .and_then(|v| v.as_str())
            .map(|name| format!(" \"{}\"", name))
            .unwrap_or_default();

        format!(
            "{} {} expense #{}{} in {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.operation,
            self.expense_id,
            item,
            self.partition
        )
    }
}
