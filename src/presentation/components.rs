//! Component collection and management
//!
//! Components are stateless renderers that receive state as parameters.

use ratatui::prelude::*;

use crate::{
    core::state::AppState,
    presentation::{config::Styles, widgets::status_bar::StatusBarWidget},
};

pub mod home;

pub use home::HomeComponent;

/// Collection of all components
pub struct Components {
    pub home: HomeComponent,
}

impl Components {
    pub fn new(styles: Styles, cursor_glyph: impl Into<String>) -> Self {
        Self {
            home: HomeComponent::new(styles, cursor_glyph),
        }
    }

    /// Render all components
    pub fn render(&self, frame: &mut Frame, state: &AppState) {
        let [main_area, status_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());

        self.home.view(state, frame, main_area);

        let status_bar =
            StatusBarWidget::new(&state.typing, state.system.status_message.as_deref());
        frame.render_widget(status_bar, status_area);
    }
}
