//! Expense Tracker - month-partitioned personal expense log
//!
//! This library provides the core of the expense tracker: a per-month
//! SQLite store, typed validation of the entry form, a pure controller that
//! turns UI events into store commands, and the terminal front ends (an
//! interactive TUI plus scriptable CLI commands) built on top of it.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration, path management and diagnostic logging
//! - `error`: Custom error types
//! - `models`: Month keys, expense records and validated drafts
//! - `storage`: SQLite partition store
//! - `controller`: Event dispatch and the active partition session
//! - `audit`: Audit logging system
//! - `export`: CSV and JSON export
//! - `display`: CLI table formatting
//! - `cli`: CLI command handlers
//! - `tui`: Interactive terminal interface
//!
//! # Example
//!
//! ```rust,ignore
//! use expenses::config::{paths::ExpensePaths, settings::Settings};
//! use expenses::models::MonthKey;
//! use expenses::storage::Store;
//!
//! let paths = ExpensePaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let store = Store::new(&paths, settings.storage_layout)?;
//! let expenses = store.list_expenses(MonthKey::current())?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod controller;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod storage;
pub mod tui;

pub use error::{ExpenseError, ExpenseResult, ValidationError};
