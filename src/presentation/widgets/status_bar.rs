use ratatui::{prelude::*, widgets::Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::core::state::TypingState;

const HINTS: &str = "space pause  r restart  c cursor  q quit";

pub struct StatusBarWidget<'a> {
    typing: &'a TypingState,
    message: Option<&'a str>,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(typing: &'a TypingState, message: Option<&'a str>) -> Self {
        Self { typing, message }
    }

    /// Left-hand summary, e.g. `Running · Typing · phrase 2/4 · 37%`.
    pub fn summary(&self) -> String {
        let typing = self.typing;
        let phrase = (typing.phrase_index + 1).min(typing.phrase_count);
        let mut summary = format!(
            "{} · {} · phrase {}/{} · {:.0}%",
            typing.status,
            typing.mode,
            phrase,
            typing.phrase_count,
            typing.progress * 100.0
        );
        if typing.pass > 0 {
            summary.push_str(&format!(" · pass {}", typing.pass + 1));
        }
        if let Some(message) = self.message {
            summary.push_str(" · ");
            summary.push_str(message);
        }
        summary
    }
}

impl Widget for StatusBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [summary_area, hints_area] = Layout::horizontal([
            Constraint::Min(0),
            Constraint::Length(HINTS.width() as u16),
        ])
        .areas(area);

        Paragraph::new(self.summary())
            .style(Style::default().fg(Color::Gray).bg(Color::Black))
            .render(summary_area, buf);
        Paragraph::new(HINTS)
            .style(Style::default().fg(Color::DarkGray).bg(Color::Black))
            .alignment(Alignment::Right)
            .render(hints_area, buf);
    }
}
