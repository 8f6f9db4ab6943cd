use crate::core::{cmd::Cmd, msg::Msg, state::AppState};

/// Elm-like update function
/// Returns new state and list of commands from current state and message
pub fn update(msg: Msg, mut state: AppState) -> (AppState, Vec<Cmd>) {
    match msg {
        // System messages (delegated to SystemState)
        Msg::System(system_msg) => {
            let commands = state.system.update(system_msg);
            (state, commands)
        }

        // Playback messages (delegated to TypingState)
        Msg::Typing(typing_msg) => {
            let commands = state.typing.update(typing_msg);
            (state, commands)
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        core::{
            cmd::TypewriterCommand,
            msg::{system::SystemMsg, typing::TypingMsg},
        },
        infrastructure::typewriter::Status,
    };

    #[test]
    fn test_update_quit() {
        let (state, cmds) = update(Msg::System(SystemMsg::Quit), AppState::new("", 1, true));
        assert!(state.system.should_quit);
        assert!(cmds.is_empty());
    }

    #[test]
    fn test_update_keeps_unrelated_state() {
        let mut state = AppState::new("Headline", 2, true);
        state.system.status_message = Some("hello".into());

        let (state, _) = update(Msg::Typing(TypingMsg::SnapshotChanged("Hi".into())), state);

        assert_eq!(state.typing.text, "Hi");
        assert_eq!(state.headline, "Headline");
        assert_eq!(state.system.status_message.as_deref(), Some("hello"));
    }

    #[test]
    fn test_update_pause_sequence() {
        let mut state = AppState::new("", 1, true);
        state.typing.status = Status::Running;

        let (state, cmds) = update(Msg::Typing(TypingMsg::TogglePause), state);
        assert_eq!(cmds, vec![Cmd::Typewriter(TypewriterCommand::Pause)]);

        let (state, cmds) = update(Msg::Typing(TypingMsg::TogglePause), state);
        assert_eq!(cmds, vec![Cmd::Typewriter(TypewriterCommand::Resume)]);
        assert_eq!(state.typing.status, Status::Running);
    }
}
