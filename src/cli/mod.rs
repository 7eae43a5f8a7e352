//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the storage layer.

pub mod audit;
pub mod expense;

pub use audit::handle_history;
pub use expense::{
    default_export_path, handle_add, handle_delete, handle_export, handle_list, handle_months,
    CliContext,
};
