//! Terminal User Interface module
//!
//! The interactive front end: an entry form above the month's expense table,
//! month navigation, multi-row delete, and popups for rejected input.

pub mod app;
pub mod event;
pub mod handler;
pub mod terminal;

// Views
pub mod views;

// Widgets
pub mod widgets;

// Dialogs
pub mod dialogs;

// Layout
pub mod layout;

pub use app::App;
pub use terminal::run_tui;
