use serde::{Deserialize, Serialize};

use crate::infrastructure::typewriter::PlaybackReport;

/// Messages specific to TypingState
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypingMsg {
    // Output of the typewriter
    SnapshotChanged(String),
    CursorBlink(bool),
    PlaybackPolled(PlaybackReport),

    // User intent
    TogglePause,
    Restart,
    ToggleCursor,
}

impl TypingMsg {
    pub fn is_frequent(&self) -> bool {
        matches!(self, TypingMsg::CursorBlink(_) | TypingMsg::PlaybackPolled(_))
    }
}
