//! Expense table view
//!
//! Shows the active month's rows, ascending by id, with a selection marker
//! column for multi-row delete.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::tui::app::{App, Focus};

/// Render the expense table
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let is_focused = app.focus == Focus::Table;
    let border_color = if is_focused { Color::Cyan } else { Color::DarkGray };

    let block = Block::default()
        .title(format!(" {} expense(s) ", app.rows().len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    if app.rows().is_empty() {
        let text = Paragraph::new("No expenses this month. Fill in the form and press Enter.")
            .block(block)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(text, area);
        return;
    }

    let widths = [
        Constraint::Length(3),  // Selection
        Constraint::Length(6),  // Id
        Constraint::Min(16),    // Item
        Constraint::Length(9),  // Count
        Constraint::Min(16),    // Note
        Constraint::Length(12), // Cost
    ];

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let header = Row::new(vec![
        Cell::from(""),
        Cell::from("ID").style(bold),
        Cell::from("Item").style(bold),
        Cell::from("No. Items").style(bold),
        Cell::from("Note").style(bold),
        Cell::from("Cost").style(bold),
    ])
    .style(Style::default().fg(Color::Yellow))
    .height(1);

    let rows: Vec<Row> = app
        .rows()
        .iter()
        .enumerate()
        .map(|(index, expense)| {
            let marker = if app.selected_rows.contains(&index) {
                "[x]"
            } else {
                "[ ]"
            };
            let row_style = if app.selected_rows.contains(&index) {
                Style::default().fg(Color::Red)
            } else {
                Style::default()
            };

            Row::new(vec![
                Cell::from(marker),
                Cell::from(expense.id.to_string()),
                Cell::from(truncate_string(&expense.item, 30)),
                Cell::from(expense.number_of_items.to_string()),
                Cell::from(truncate_string(&expense.details, 30)),
                Cell::from(format!("{:>10}", app.settings.format_cost(expense.cost))),
            ])
            .style(row_style)
        })
        .collect();

    let highlight = if is_focused {
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .highlight_style(highlight)
        .highlight_symbol("> ");

    let mut state = TableState::default();
    state.select(Some(app.table_index));

    frame.render_stateful_widget(table, area, &mut state);
}

/// Truncate a string to at most `max_len` characters
fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("Coffee", 10), "Coffee");
        assert_eq!(truncate_string("Cappuccino grande", 6), "Cappu…");
        assert_eq!(truncate_string("ééééé", 3), "éé…");
    }
}
