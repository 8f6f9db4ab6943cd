//! Home component
//!
//! The headline with the animated line right below it, centered on screen.

use ratatui::{layout::Flex, prelude::*, widgets::Paragraph};

use crate::{
    core::state::AppState,
    presentation::{config::Styles, widgets::typing_line::TypingLine},
};

#[derive(Debug, Clone)]
pub struct HomeComponent {
    styles: Styles,
    cursor_glyph: String,
}

impl HomeComponent {
    pub fn new(styles: Styles, cursor_glyph: impl Into<String>) -> Self {
        Self {
            styles,
            cursor_glyph: cursor_glyph.into(),
        }
    }

    pub fn view(&self, state: &AppState, frame: &mut Frame, area: Rect) {
        let [_, headline_area, line_area, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .areas(area);

        frame.render_widget(
            Paragraph::new(state.headline.as_str())
                .style(self.styles.headline)
                .alignment(Alignment::Center),
            headline_area,
        );

        let typing = &state.typing;
        let mut line = TypingLine::new(&typing.text)
            .text_style(self.styles.text)
            .cursor_style(self.styles.cursor);
        if typing.cursor_enabled {
            line = line.cursor(&self.cursor_glyph, typing.cursor_visible);
        }

        // Centered on the current width, cursor cell included
        let width = (line.width() as u16).min(line_area.width);
        let [centered] = Layout::horizontal([Constraint::Length(width)])
            .flex(Flex::Center)
            .areas(line_area);
        frame.render_widget(line, centered);
    }
}
