pub mod system;
pub mod typing;

pub use system::SystemState;
pub use typing::TypingState;

/// Unified application state
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub headline: String,
    pub typing: TypingState,
    pub system: SystemState,
}

impl AppState {
    pub fn new(headline: impl Into<String>, phrase_count: usize, cursor_enabled: bool) -> Self {
        Self {
            headline: headline.into(),
            typing: TypingState::new(phrase_count, cursor_enabled),
            system: SystemState::default(),
        }
    }
}
