//! Application state for the TUI
//!
//! The App struct holds all state needed for rendering and handling events.
//! Store changes never happen here directly: key presses become
//! [`UiEvent`]s, the controller turns them into commands and the active
//! session runs them.

use std::collections::BTreeSet;

use crate::audit::AuditLogger;
use crate::config::settings::Settings;
use crate::controller::{dispatch, ActiveSession, Applied, ControllerState, Feedback, UiEvent};
use crate::error::ExpenseResult;
use crate::models::{Expense, MonthKey};
use crate::storage::Store;

use super::views::form::ExpenseFormState;
use super::widgets::{Toast, Toasts};

/// Which part of the screen receives keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Item,
    Count,
    Details,
    Cost,
    Table,
}

impl Focus {
    /// Next stop for Tab
    pub fn next(self) -> Self {
        match self {
            Self::Item => Self::Count,
            Self::Count => Self::Details,
            Self::Details => Self::Cost,
            Self::Cost => Self::Table,
            Self::Table => Self::Item,
        }
    }

    /// Next stop for Shift+Tab
    pub fn prev(self) -> Self {
        match self {
            Self::Item => Self::Table,
            Self::Count => Self::Item,
            Self::Details => Self::Count,
            Self::Cost => Self::Details,
            Self::Table => Self::Cost,
        }
    }

    pub fn is_form(self) -> bool {
        self != Self::Table
    }
}

/// Currently active dialog (if any)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ActiveDialog {
    #[default]
    None,
    Help,
    /// Modal message that must be dismissed
    Message { title: String, message: String },
}

/// Main application state
pub struct App<'a> {
    /// The partition store
    pub store: &'a Store,

    /// Application settings
    pub settings: &'a Settings,

    /// Audit log, when enabled
    audit: Option<AuditLogger>,

    /// Controller state carried between events
    pub controller: ControllerState,

    /// Open partition and its rows
    pub session: ActiveSession,

    /// Entry form
    pub form: ExpenseFormState,

    /// Which widget has focus
    pub focus: Focus,

    /// Cursor row in the table
    pub table_index: usize,

    /// Rows marked for deletion
    pub selected_rows: BTreeSet<usize>,

    /// Currently active dialog
    pub active_dialog: ActiveDialog,

    /// Toasts
    pub toasts: Toasts,

    /// Whether the app should quit
    pub should_quit: bool,
}

impl<'a> App<'a> {
    /// Open `month` and build the initial state
    pub fn new(
        store: &'a Store,
        settings: &'a Settings,
        audit: Option<AuditLogger>,
        month: MonthKey,
    ) -> ExpenseResult<Self> {
        let session = ActiveSession::open(store, month)?;
        let controller = ControllerState::new(month, store.is_partitioned())
            .with_visible_ids(session.visible_ids());

        Ok(Self {
            store,
            settings,
            audit,
            controller,
            session,
            form: ExpenseFormState::new(),
            focus: Focus::default(),
            table_index: 0,
            selected_rows: BTreeSet::new(),
            active_dialog: ActiveDialog::None,
            toasts: Toasts::default(),
            should_quit: false,
        })
    }

    /// Rows currently shown
    pub fn rows(&self) -> &[Expense] {
        self.session.rows()
    }

    /// Send one event through the controller and run its commands
    pub fn fire(&mut self, event: UiEvent) {
        let transition = dispatch(&self.controller, &event);

        match transition.feedback {
            Some(Feedback::Popup(ref message)) => self.show_message("Invalid Input", message),
            Some(Feedback::Notice(ref message)) => {
                self.toasts.push(Toast::notice(message.as_str()))
            }
            None => {}
        }

        if transition.commands.is_empty() {
            self.controller = transition.state;
            self.sync_quit();
            return;
        }

        let mut applied = Applied::default();
        let result = self.session.apply(self.store, &transition.commands, &mut applied);
        applied.record_audit(self.audit.as_ref());

        match result {
            Ok(()) => {
                self.controller = transition
                    .state
                    .with_visible_ids(self.session.visible_ids());
                if transition.clear_form {
                    self.form.clear();
                    if self.focus.is_form() {
                        self.set_focus(Focus::Item);
                    }
                }
                self.after_apply(&applied);
            }
            Err(e) => {
                tracing::error!(error = %e, event = ?event.kind(), "store command failed");
                // Follow whatever the session actually reached
                self.controller.current_month = self.session.month();
                self.controller.visible_ids = self.session.visible_ids();
                self.controller.running = transition.state.running;
                self.show_message("Storage Error", &e.to_string());
            }
        }

        self.clamp_cursor();
        self.sync_quit();
    }

    fn after_apply(&mut self, applied: &Applied) {
        if let Some(expense) = applied.inserted.first() {
            self.toasts.push(Toast::saved(format!(
                "Added \"{}\" ({})",
                expense.item,
                self.settings.format_cost(expense.cost)
            )));
        }
        if applied.deleted > 0 {
            self.toasts.push(Toast::saved(format!(
                "Deleted {} expense(s)",
                applied.deleted
            )));
        }
        if applied.deleted > 0 || applied.switched_to.is_some() {
            self.selected_rows.clear();
        }
        if applied.switched_to.is_some() {
            self.table_index = 0;
        }
    }

    fn sync_quit(&mut self) {
        if !self.controller.running {
            self.should_quit = true;
        }
    }

    fn clamp_cursor(&mut self) {
        let len = self.rows().len();
        if self.table_index >= len {
            self.table_index = len.saturating_sub(1);
        }
        self.selected_rows.retain(|&row| row < len);
    }

    /// Submit the form as an add
    pub fn submit_form(&mut self) {
        let input = self.form.to_input();
        self.fire(UiEvent::AddExpense(input));
    }

    /// Delete the selected rows, or the cursor row when nothing is selected
    pub fn delete_selected(&mut self) {
        let selected_rows: Vec<usize> = if self.selected_rows.is_empty() {
            if self.rows().is_empty() {
                Vec::new()
            } else {
                vec![self.table_index]
            }
        } else {
            self.selected_rows.iter().copied().collect()
        };
        self.fire(UiEvent::DeleteExpense { selected_rows });
    }

    pub fn prev_month(&mut self) {
        self.fire(UiEvent::PrevMonth);
    }

    pub fn next_month(&mut self) {
        self.fire(UiEvent::NextMonth);
    }

    pub fn quit(&mut self) {
        self.fire(UiEvent::Exit);
    }

    /// Move focus forward
    pub fn focus_next(&mut self) {
        self.set_focus(self.focus.next());
    }

    /// Move focus backward
    pub fn focus_prev(&mut self) {
        self.set_focus(self.focus.prev());
    }

    pub fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        self.form.update_focus(focus);
    }

    /// Move table cursor down
    pub fn move_down(&mut self) {
        if self.table_index + 1 < self.rows().len() {
            self.table_index += 1;
        }
    }

    /// Move table cursor up
    pub fn move_up(&mut self) {
        self.table_index = self.table_index.saturating_sub(1);
    }

    /// Mark or unmark the cursor row
    pub fn toggle_selection(&mut self) {
        if self.rows().is_empty() {
            return;
        }
        if !self.selected_rows.remove(&self.table_index) {
            self.selected_rows.insert(self.table_index);
        }
    }

    /// Open a message popup
    pub fn show_message(&mut self, title: &str, message: &str) {
        self.active_dialog = ActiveDialog::Message {
            title: title.to_string(),
            message: message.to_string(),
        };
    }

    pub fn open_help(&mut self) {
        self.active_dialog = ActiveDialog::Help;
    }

    pub fn close_dialog(&mut self) {
        self.active_dialog = ActiveDialog::None;
    }

    pub fn has_dialog(&self) -> bool {
        self.active_dialog != ActiveDialog::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::StorageLayout;
    use crate::tui::widgets::ToastLevel;
    use tempfile::TempDir;

    fn march() -> MonthKey {
        MonthKey::new(2024, 3).unwrap()
    }

    fn store(layout: StorageLayout) -> (Store, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = Store::with_data_dir(temp_dir.path(), layout).unwrap();
        (store, temp_dir)
    }

    fn fill_form(app: &mut App, item: &str, count: &str, details: &str, cost: &str) {
        app.form.item.clear();
        app.form.count.clear();
        app.form.details.clear();
        app.form.cost.clear();
        item.chars().for_each(|c| app.form.item.insert(c));
        count.chars().for_each(|c| app.form.count.insert(c));
        details.chars().for_each(|c| app.form.details.insert(c));
        cost.chars().for_each(|c| app.form.cost.insert(c));
    }

    #[test]
    fn test_focus_cycles_through_form_and_table() {
        let mut focus = Focus::Item;
        let mut seen = vec![focus];
        for _ in 0..4 {
            focus = focus.next();
            seen.push(focus);
        }
        assert_eq!(
            seen,
            vec![Focus::Item, Focus::Count, Focus::Details, Focus::Cost, Focus::Table]
        );
        assert_eq!(focus.next(), Focus::Item);
        assert_eq!(Focus::Item.prev(), Focus::Table);
        assert!(!Focus::Table.is_form());
    }

    #[test]
    fn test_submit_adds_row_and_clears_form() {
        let (store, _temp) = store(StorageLayout::Monthly);
        let settings = Settings::default();
        let mut app = App::new(&store, &settings, None, march()).unwrap();

        fill_form(&mut app, "Coffee", "2", "morning", "4.50");
        app.submit_form();

        assert_eq!(app.rows().len(), 1);
        assert_eq!(app.controller.visible_ids, vec![app.rows()[0].id]);
        assert!(app.form.to_input().item.is_empty());
        assert!(!app.has_dialog());
        assert_eq!(app.toasts.current().unwrap().level, ToastLevel::Saved);
    }

    #[test]
    fn test_invalid_submit_shows_popup_and_keeps_form() {
        let (store, _temp) = store(StorageLayout::Monthly);
        let settings = Settings::default();
        let mut app = App::new(&store, &settings, None, march()).unwrap();

        fill_form(&mut app, "Coffee", "2", "", "-5");
        app.submit_form();

        assert!(app.rows().is_empty());
        assert!(matches!(app.active_dialog, ActiveDialog::Message { .. }));
        assert_eq!(app.form.to_input().cost, "-5");
    }

    #[test]
    fn test_delete_uses_cursor_row_without_selection() {
        let (store, _temp) = store(StorageLayout::Monthly);
        let settings = Settings::default();
        let mut app = App::new(&store, &settings, None, march()).unwrap();
        for item in ["A", "B", "C"] {
            fill_form(&mut app, item, "1", "", "1");
            app.submit_form();
        }

        app.set_focus(Focus::Table);
        app.move_down();
        app.delete_selected();

        let items: Vec<_> = app.rows().iter().map(|e| e.item.as_str()).collect();
        assert_eq!(items, vec!["A", "C"]);
    }

    #[test]
    fn test_delete_selected_rows() {
        let (store, _temp) = store(StorageLayout::Monthly);
        let settings = Settings::default();
        let mut app = App::new(&store, &settings, None, march()).unwrap();
        for item in ["A", "B", "C"] {
            fill_form(&mut app, item, "1", "", "1");
            app.submit_form();
        }

        app.toggle_selection();
        app.move_down();
        app.move_down();
        app.toggle_selection();
        app.delete_selected();

        let items: Vec<_> = app.rows().iter().map(|e| e.item.as_str()).collect();
        assert_eq!(items, vec!["B"]);
        assert!(app.selected_rows.is_empty());
        assert_eq!(app.table_index, 0);
    }

    #[test]
    fn test_delete_on_empty_table_is_noop() {
        let (store, _temp) = store(StorageLayout::Monthly);
        let settings = Settings::default();
        let mut app = App::new(&store, &settings, None, march()).unwrap();

        app.delete_selected();
        assert!(!app.has_dialog());
        assert!(app.toasts.is_empty());
    }

    #[test]
    fn test_month_navigation_switches_partition() {
        let (store, _temp) = store(StorageLayout::Monthly);
        let settings = Settings::default();
        let mut app = App::new(&store, &settings, None, march()).unwrap();
        fill_form(&mut app, "Coffee", "1", "", "3");
        app.submit_form();

        app.next_month();
        assert_eq!(app.controller.current_month, MonthKey::new(2024, 4).unwrap());
        assert_eq!(app.session.month(), MonthKey::new(2024, 4).unwrap());
        assert!(app.rows().is_empty());

        app.prev_month();
        assert_eq!(app.rows().len(), 1);
    }

    #[test]
    fn test_single_layout_ignores_navigation() {
        let (store, _temp) = store(StorageLayout::Single);
        let settings = Settings::default();
        let mut app = App::new(&store, &settings, None, march()).unwrap();

        app.next_month();
        assert_eq!(app.controller.current_month, march());
        assert_eq!(app.toasts.current().unwrap().level, ToastLevel::Notice);
    }

    #[test]
    fn test_quit_closes_session() {
        let (store, _temp) = store(StorageLayout::Monthly);
        let settings = Settings::default();
        let mut app = App::new(&store, &settings, None, march()).unwrap();

        app.quit();
        assert!(app.should_quit);
        assert!(!app.session.is_open());
    }
}
