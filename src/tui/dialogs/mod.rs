//! TUI Dialogs module
//!
//! Modal overlays: the help screen and message popups

pub mod help;
pub mod message;
