//! TUI Views module
//!
//! The month header, entry form, expense table and status bar, plus toasts
//! and dialogs drawn on top.

pub mod expenses;
pub mod form;
pub mod header;
pub mod status_bar;

use ratatui::Frame;

use super::app::{ActiveDialog, App};
use super::dialogs;
use super::layout::{toast_rect, AppLayout};

/// Render the entire application
pub fn render(frame: &mut Frame, app: &mut App) {
    let layout = AppLayout::new(frame.area());

    header::render(frame, app, layout.header);
    form::render(frame, app, layout.form);
    expenses::render(frame, app, layout.table);
    status_bar::render(frame, app, layout.status_bar);

    if let Some(toast) = app.toasts.current() {
        let area = toast_rect(40, 3, layout.table);
        frame.render_widget(toast, area);
    }

    if app.has_dialog() {
        render_dialog(frame, app);
    }
}

/// Render active dialog
fn render_dialog(frame: &mut Frame, app: &mut App) {
    match &app.active_dialog {
        ActiveDialog::Help => {
            dialogs::help::render(frame, app);
        }
        ActiveDialog::Message { title, message } => {
            dialogs::message::render(frame, title, message);
        }
        ActiveDialog::None => {}
    }
}
