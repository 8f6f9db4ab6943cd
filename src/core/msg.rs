use serde::{Deserialize, Serialize};

pub mod system;
pub mod typing;

use system::SystemMsg;
use typing::TypingMsg;

/// Domain messages representing application intent
/// These are processed by the update function and represent pure domain events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Msg {
    // System operations (delegated to SystemState)
    System(SystemMsg),

    // Playback operations (delegated to TypingState)
    Typing(TypingMsg),
}

impl Msg {
    /// Helper to exclude frequent messages during debugging. Only playback
    /// output arrives often enough to matter.
    pub fn is_frequent(&self) -> bool {
        match self {
            Msg::System(_) => false,
            Msg::Typing(msg) => msg.is_frequent(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(Msg::System(SystemMsg::Quit), false)]
    #[case(Msg::System(SystemMsg::Resize(80, 24)), false)]
    #[case(Msg::System(SystemMsg::ClearStatusMessage), false)]
    #[case(Msg::Typing(TypingMsg::TogglePause), false)]
    #[case(Msg::Typing(TypingMsg::SnapshotChanged("ab".into())), false)]
    #[case(Msg::Typing(TypingMsg::CursorBlink(false)), true)]
    fn test_msg_frequent_detection(#[case] msg: Msg, #[case] frequent: bool) {
        assert_eq!(msg.is_frequent(), frequent);
    }

    #[test]
    fn test_msg_equality() {
        assert_eq!(Msg::System(SystemMsg::Quit), Msg::System(SystemMsg::Quit));
        assert_ne!(
            Msg::Typing(TypingMsg::Restart),
            Msg::Typing(TypingMsg::TogglePause)
        );
    }
}
