//! Stored expense records

use serde::{Deserialize, Serialize};

/// Store-assigned row id, unique within one month partition
pub type ExpenseId = i64;

/// One row of the `Expenses` table
///
/// Values are whatever the partition holds; the store performs no checks of
/// its own, so rows written by other tools may carry counts or costs the form
/// would have rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub item: String,
    pub number_of_items: i64,
    pub details: String,
    pub cost: f64,
}

/// Sum of the costs of `expenses`
pub fn total_cost(expenses: &[Expense]) -> f64 {
    expenses.iter().map(|e| e.cost).sum()
}
