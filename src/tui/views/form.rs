//! Expense entry form
//!
//! Four text fields above the table. Nothing is validated while typing; the
//! raw text goes to the controller on submit.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders},
    Frame,
};

use crate::models::FormInput;
use crate::tui::app::{App, Focus};
use crate::tui::widgets::TextInput;

/// State of the entry form
#[derive(Debug, Clone)]
pub struct ExpenseFormState {
    pub item: TextInput,
    pub count: TextInput,
    pub details: TextInput,
    pub cost: TextInput,
}

impl Default for ExpenseFormState {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpenseFormState {
    pub fn new() -> Self {
        let mut state = Self {
            item: TextInput::new().label("Item").placeholder("What was bought"),
            count: TextInput::new().label("Number of Items").placeholder("Whole number"),
            details: TextInput::new().label("Note").placeholder("Optional"),
            cost: TextInput::new().label("Cost").placeholder("e.g. 4.50"),
        };
        state.update_focus(Focus::Item);
        state
    }

    /// Mark the field matching `focus` as focused
    pub fn update_focus(&mut self, focus: Focus) {
        self.item.focused = focus == Focus::Item;
        self.count.focused = focus == Focus::Count;
        self.details.focused = focus == Focus::Details;
        self.cost.focused = focus == Focus::Cost;
    }

    /// The input receiving keys under `focus`
    pub fn input_mut(&mut self, focus: Focus) -> Option<&mut TextInput> {
        match focus {
            Focus::Item => Some(&mut self.item),
            Focus::Count => Some(&mut self.count),
            Focus::Details => Some(&mut self.details),
            Focus::Cost => Some(&mut self.cost),
            Focus::Table => None,
        }
    }

    /// Empty every field
    pub fn clear(&mut self) {
        self.item.clear();
        self.count.clear();
        self.details.clear();
        self.cost.clear();
    }

    /// Raw field text for the controller
    pub fn to_input(&self) -> FormInput {
        FormInput::new(
            self.item.value(),
            self.count.value(),
            self.details.value(),
            self.cost.value(),
        )
    }
}

/// Render the form
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let is_focused = app.focus.is_form();
    let border_color = if is_focused { Color::Cyan } else { Color::DarkGray };

    let block = Block::default()
        .title(" New Expense (Enter to add) ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    let form = &app.form;
    for (input, row) in [&form.item, &form.count, &form.details, &form.cost]
        .into_iter()
        .zip(rows.iter())
    {
        frame.render_widget(input.clone(), *row);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_form_focuses_item() {
        let form = ExpenseFormState::new();
        assert!(form.item.focused);
        assert!(!form.cost.focused);
    }

    #[test]
    fn test_table_focus_unfocuses_fields() {
        let mut form = ExpenseFormState::new();
        form.update_focus(Focus::Table);
        assert!(!form.item.focused && !form.count.focused);
        assert!(!form.details.focused && !form.cost.focused);
        assert!(form.input_mut(Focus::Table).is_none());
    }

    #[test]
    fn test_to_input_and_clear() {
        let mut form = ExpenseFormState::new();
        form.item = form.item.clone().content("Coffee");
        form.cost = form.cost.clone().content("4.50");

        let input = form.to_input();
        assert_eq!(input.item, "Coffee");
        assert_eq!(input.cost, "4.50");
        assert!(input.number_of_items.is_empty());

        form.clear();
        assert_eq!(form.to_input(), FormInput::default());
    }
}
