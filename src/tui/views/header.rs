//! Month header

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::tui::app::App;

/// Render the header with the current month and partition file
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let month = app.controller.current_month;

    let title = if app.controller.partitioned {
        format!(" Expenses - {} ", month.label())
    } else {
        " Expenses - All months ".to_string()
    };

    let block = Block::default()
        .title(title)
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let nav = if app.controller.partitioned {
        Span::styled(
            format!("< {}  |  {} >", month.prev().label(), month.next().label()),
            Style::default().fg(Color::DarkGray),
        )
    } else {
        Span::styled("Single file layout", Style::default().fg(Color::DarkGray))
    };

    let line = Line::from(vec![
        Span::styled(
            app.session.partition().file_name(),
            Style::default().fg(Color::White),
        ),
        Span::raw("   "),
        nav,
    ]);

    let paragraph = Paragraph::new(line)
        .block(block)
        .alignment(Alignment::Left);

    frame.render_widget(paragraph, area);
}
