//! Help dialog
//!
//! Shows keyboard shortcuts for the form and the table

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::tui::app::App;
use crate::tui::layout::centered_rect;

/// Render the help dialog
pub fn render(frame: &mut Frame, app: &App) {
    let area = centered_rect(60, 70, frame.area());

    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Help ")
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(help_lines(app))
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

fn help_lines(app: &App) -> Vec<Line<'static>> {
    let mut lines = vec![
        section("Global Keys"),
        Line::from(""),
        key_line("Tab/S-Tab", "Next/previous field"),
        key_line("Esc, Ctrl+C", "Quit"),
        key_line("F1", "Show this help"),
    ];
    if app.controller.partitioned {
        lines.push(key_line("PgUp/PgDn", "Previous/next month"));
    }

    lines.extend([
        Line::from(""),
        section("Form"),
        Line::from(""),
        key_line("Enter", "Add the expense"),
        key_line("←/→ Home/End", "Move cursor"),
        Line::from(""),
        section("Table"),
        Line::from(""),
        key_line("j/k ↑/↓", "Move cursor"),
        key_line("Space", "Select row for deletion"),
        key_line("d, Delete", "Delete selected rows (or cursor row)"),
    ]);
    if app.controller.partitioned {
        lines.push(key_line("< / >", "Previous/next month"));
    }
    lines.extend([
        key_line("q", "Quit"),
        key_line("?", "Show this help"),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to close",
            Style::default().fg(Color::DarkGray),
        )),
    ]);

    lines
}

fn section(title: &'static str) -> Line<'static> {
    Line::from(Span::styled(
        title,
        Style::default()
            .add_modifier(Modifier::BOLD)
            .fg(Color::Yellow),
    ))
}

fn key_line(key: &str, description: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:>14}", key), Style::default().fg(Color::Cyan)),
        Span::raw("  "),
        Span::styled(description.to_string(), Style::default().fg(Color::White)),
    ])
}
