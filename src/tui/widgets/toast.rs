//! Toasts
//!
//! One line in the corner of the table. A toast either confirms a store
//! change or relays a controller notice; neither needs dismissing.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

/// How long a toast stays up
pub const TOAST_TTL: Duration = Duration::from_secs(3);

/// What produced the toast
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    /// A controller notice, nothing was written
    Notice,
    /// An insert or delete reached the store
    Saved,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub level: ToastLevel,
    pub text: String,
    shown_at: Instant,
}

impl Toast {
    pub fn notice(text: impl Into<String>) -> Self {
        Self::at(ToastLevel::Notice, text, Instant::now())
    }

    pub fn saved(text: impl Into<String>) -> Self {
        Self::at(ToastLevel::Saved, text, Instant::now())
    }

    fn at(level: ToastLevel, text: impl Into<String>, shown_at: Instant) -> Self {
        Self {
            level,
            text: text.into(),
            shown_at,
        }
    }
}

/// Pending toasts, oldest first
#[derive(Debug, Default)]
pub struct Toasts {
    queue: VecDeque<Toast>,
}

impl Toasts {
    pub fn push(&mut self, toast: Toast) {
        self.queue.push_back(toast);
    }

    /// The toast on screen
    pub fn current(&self) -> Option<&Toast> {
        self.queue.front()
    }

    /// Drop toasts older than [`TOAST_TTL`] at `now`
    pub fn expire(&mut self, now: Instant) {
        self.queue
            .retain(|t| now.saturating_duration_since(t.shown_at) < TOAST_TTL);
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl Widget for &Toast {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (color, title) = match self.level {
            ToastLevel::Notice => (Color::Blue, " Note "),
            ToastLevel::Saved => (Color::Green, " Saved "),
        };

        Clear.render(area, buf);
        Paragraph::new(self.text.as_str())
            .style(Style::default().fg(Color::White))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color))
                    .title(title),
            )
            .render(area, buf);
    }
}
