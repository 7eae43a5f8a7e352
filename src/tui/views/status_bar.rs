//! Status bar view
//!
//! Shows the month total, row and selection counts, and key hints

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::app::{App, Focus};

/// Render the status bar
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let mut spans = vec![
        Span::styled(
            format!(" {} expense(s)", app.rows().len()),
            Style::default().fg(Color::White),
        ),
        Span::raw(" │ "),
        Span::styled("Total: ", Style::default().fg(Color::White)),
        Span::styled(
            app.settings.format_cost(app.session.total()),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" │ "),
        Span::styled(
            app.controller.current_month.to_string(),
            Style::default().fg(Color::Cyan),
        ),
    ];

    if !app.selected_rows.is_empty() {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(
            format!("{} selected", app.selected_rows.len()),
            Style::default().fg(Color::Red),
        ));
    }

    let hints = if app.focus == Focus::Table {
        " Space:Select  d:Delete  </>:Month  Tab:Form  q:Quit  ?:Help "
    } else {
        " Enter:Add  Tab:Next field  PgUp/PgDn:Month  Esc:Quit  F1:Help "
    };

    let left_len: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let padding_len = (area.width as usize)
        .saturating_sub(left_len)
        .saturating_sub(hints.len());
    spans.push(Span::raw(" ".repeat(padding_len.max(1))));
    spans.push(Span::styled(hints, Style::default().fg(Color::White)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
