//! Display formatting for terminal output
//!
//! Table rendering for the non-interactive commands.

pub mod expense;

pub use expense::{format_expense_table, format_partition_list};
