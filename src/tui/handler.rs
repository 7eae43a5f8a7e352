//! Event handler for the TUI
//!
//! Routes keyboard events to the form, the table or the open dialog.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Focus};
use super::event::Event;

/// Handle an incoming event
pub fn handle_event(app: &mut App, event: Event) {
    match event {
        Event::Key(key) => handle_key_event(app, key),
        Event::Tick | Event::Resize(_, _) => {}
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // Any key closes a dialog
    if app.has_dialog() {
        app.close_dialog();
        return;
    }

    if handle_global_key(app, key) {
        return;
    }

    if app.focus == Focus::Table {
        handle_table_key(app, key);
    } else {
        handle_form_key(app, key);
    }
}

/// Keys that mean the same thing everywhere; returns whether one matched
fn handle_global_key(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),
        KeyCode::Esc => app.quit(),
        KeyCode::F(1) => app.open_help(),
        KeyCode::Tab => app.focus_next(),
        KeyCode::BackTab => app.focus_prev(),
        KeyCode::PageUp => app.prev_month(),
        KeyCode::PageDown => app.next_month(),
        _ => return false,
    }
    true
}

fn handle_table_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.move_down(),
        KeyCode::Char('k') | KeyCode::Up => app.move_up(),
        KeyCode::Char(' ') => app.toggle_selection(),
        KeyCode::Char('d') | KeyCode::Delete => app.delete_selected(),
        KeyCode::Char('<') => app.prev_month(),
        KeyCode::Char('>') => app.next_month(),
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('?') => app.open_help(),
        _ => {}
    }
}

fn handle_form_key(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Enter {
        app.submit_form();
        return;
    }

    let focus = app.focus;
    let Some(input) = app.form.input_mut(focus) else {
        return;
    };

    match key.code {
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => input.insert(c),
        KeyCode::Backspace => input.backspace(),
        KeyCode::Delete => input.delete(),
        KeyCode::Left => input.move_left(),
        KeyCode::Right => input.move_right(),
        KeyCode::Home => input.move_start(),
        KeyCode::End => input.move_end(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::{Settings, StorageLayout};
    use crate::models::MonthKey;
    use crate::storage::Store;
    use crate::tui::app::ActiveDialog;
    use tempfile::TempDir;

    fn press(app: &mut App, code: KeyCode) {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn setup() -> (Store, Settings, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = Store::with_data_dir(temp_dir.path(), StorageLayout::Monthly).unwrap();
        (store, Settings::default(), temp_dir)
    }

    fn add_by_keys(app: &mut App, item: &str, count: &str, details: &str, cost: &str) {
        app.set_focus(Focus::Item);
        type_text(app, item);
        press(app, KeyCode::Tab);
        type_text(app, count);
        press(app, KeyCode::Tab);
        type_text(app, details);
        press(app, KeyCode::Tab);
        type_text(app, cost);
        press(app, KeyCode::Enter);
    }

    #[test]
    fn test_typing_and_enter_adds_expense() {
        let (store, settings, _temp) = setup();
        let mut app = App::new(&store, &settings, None, MonthKey::new(2024, 3).unwrap()).unwrap();

        add_by_keys(&mut app, "Coffee", "2", "morning", "4.50");

        assert_eq!(app.rows().len(), 1);
        assert_eq!(app.rows()[0].item, "Coffee");
        assert_eq!(app.rows()[0].details, "morning");
        assert_eq!(app.rows()[0].cost, 4.5);
    }

    #[test]
    fn test_q_types_in_form_but_quits_from_table() {
        let (store, settings, _temp) = setup();
        let mut app = App::new(&store, &settings, None, MonthKey::new(2024, 3).unwrap()).unwrap();

        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit);
        assert_eq!(app.form.item.value(), "q");

        app.set_focus(Focus::Table);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_any_key_dismisses_popup() {
        let (store, settings, _temp) = setup();
        let mut app = App::new(&store, &settings, None, MonthKey::new(2024, 3).unwrap()).unwrap();

        add_by_keys(&mut app, "", "1", "", "1");
        assert!(matches!(app.active_dialog, ActiveDialog::Message { .. }));

        press(&mut app, KeyCode::Char('x'));
        assert!(!app.has_dialog());
        assert!(app.form.item.value().is_empty());
    }

    #[test]
    fn test_navigation_keys() {
        let (store, settings, _temp) = setup();
        let mut app = App::new(&store, &settings, None, MonthKey::new(2024, 3).unwrap()).unwrap();

        press(&mut app, KeyCode::PageUp);
        press(&mut app, KeyCode::PageUp);
        press(&mut app, KeyCode::PageUp);
        assert_eq!(app.controller.current_month, MonthKey::new(2023, 12).unwrap());

        app.set_focus(Focus::Table);
        press(&mut app, KeyCode::Char('>'));
        assert_eq!(app.controller.current_month, MonthKey::new(2024, 1).unwrap());
    }

    #[test]
    fn test_space_and_d_delete_selection() {
        let (store, settings, _temp) = setup();
        let mut app = App::new(&store, &settings, None, MonthKey::new(2024, 3).unwrap()).unwrap();
        for item in ["A", "B", "C"] {
            add_by_keys(&mut app, item, "1", "", "1");
        }

        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.focus, Focus::Table);
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Char('d'));

        let items: Vec<_> = app.rows().iter().map(|e| e.item.as_str()).collect();
        assert_eq!(items, vec!["C"]);
    }

    #[test]
    fn test_ctrl_c_quits_from_form() {
        let (store, settings, _temp) = setup();
        let mut app = App::new(&store, &settings, None, MonthKey::new(2024, 3).unwrap()).unwrap();

        handle_key_event(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(app.should_quit);
        assert!(app.form.item.value().is_empty());
    }
}
