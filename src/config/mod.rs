//! Configuration module for the expense tracker
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence
//! - Diagnostic logging setup

pub mod logging;
pub mod paths;
pub mod settings;

pub use paths::ExpensePaths;
pub use settings::{Settings, StorageLayout};
