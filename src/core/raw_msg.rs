use crossterm::event::KeyEvent;
use serde::{Deserialize, Serialize};

use crate::infrastructure::typewriter::PlaybackReport;

/// Raw messages from external sources (terminal, typewriter timers, system)
/// These represent unprocessed external events that need to be translated to domain events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RawMsg {
    // System events
    Tick,
    Render,
    Resize(u16, u16),
    Quit,

    // User input (raw keyboard events)
    Key(KeyEvent),

    // Typewriter output
    Snapshot(String),
    CursorBlink(bool),
    Playback(PlaybackReport),

    // System status
    Error(String),
}

impl RawMsg {
    /// Helper to exclude frequent messages during debugging
    pub fn is_frequent(&self) -> bool {
        matches!(
            self,
            RawMsg::Tick | RawMsg::Render | RawMsg::CursorBlink(_) | RawMsg::Playback(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use color_eyre::Result;
    use crossterm::event::{KeyCode, KeyModifiers};

    use super::*;

    #[test]
    fn test_raw_msg_frequent_detection() {
        assert!(RawMsg::Tick.is_frequent());
        assert!(RawMsg::Render.is_frequent());
        assert!(RawMsg::CursorBlink(true).is_frequent());
        assert!(!RawMsg::Quit.is_frequent());
        assert!(!RawMsg::Snapshot("He".into()).is_frequent());
        assert!(!RawMsg::Key(KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE)).is_frequent());
    }

    #[test]
    fn test_raw_msg_serialization() -> Result<()> {
        let msg = RawMsg::Snapshot("Hey".to_string());
        let serialized = serde_json::to_string(&msg)?;
        let deserialized: RawMsg = serde_json::from_str(&serialized)?;
        assert_eq!(msg, deserialized);

        Ok(())
    }
}
