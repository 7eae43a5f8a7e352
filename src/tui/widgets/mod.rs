//! Reusable TUI widgets

pub mod input;
pub mod toast;

pub use input::TextInput;
pub use toast::{Toast, ToastLevel, Toasts};
