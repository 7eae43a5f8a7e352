//! Core data models for the expense tracker
//!
//! This module contains the month key that names a partition, the stored
//! expense record, and the validated draft built from form input.

pub mod draft;
pub mod expense;
pub mod month;

pub use draft::{validate_input, Cost, ExpenseDraft, FormInput};
pub use expense::{total_cost, Expense, ExpenseId};
pub use month::MonthKey;
