use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::{
    core::{
        msg::{system::SystemMsg, typing::TypingMsg, Msg},
        raw_msg::RawMsg,
        state::AppState,
    },
    infrastructure::typewriter::Status,
};

/// Translates raw external events into domain messages
/// This function is pure and contains no side effects
pub fn translate_raw_to_domain(raw: RawMsg, state: &AppState) -> Vec<Msg> {
    match raw {
        // System events - direct mapping
        RawMsg::Quit => vec![Msg::System(SystemMsg::Quit)],
        RawMsg::Resize(width, height) => vec![Msg::System(SystemMsg::Resize(width, height))],

        // User input - translate based on key bindings
        RawMsg::Key(key) => translate_key_event(key, state),

        // Typewriter output
        RawMsg::Snapshot(text) => vec![Msg::Typing(TypingMsg::SnapshotChanged(text))],
        RawMsg::CursorBlink(visible) => vec![Msg::Typing(TypingMsg::CursorBlink(visible))],
        RawMsg::Playback(report) => vec![Msg::Typing(TypingMsg::PlaybackPolled(report))],

        RawMsg::Error(error) => vec![Msg::System(SystemMsg::ShowError(error))],

        // Ignore frequent system events in domain layer
        RawMsg::Tick | RawMsg::Render => vec![],
    }
}

/// Translates keyboard input to domain events
fn translate_key_event(key: KeyEvent, state: &AppState) -> Vec<Msg> {
    if key.kind != KeyEventKind::Press {
        return vec![];
    }

    match key {
        KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            ..
        } => vec![Msg::System(SystemMsg::Quit)],

        KeyEvent {
            code: KeyCode::Char('q') | KeyCode::Esc,
            ..
        } => vec![Msg::System(SystemMsg::Quit)],

        KeyEvent {
            code: KeyCode::Char(' '),
            ..
        } => {
            let status = match state.typing.status {
                Status::Running => "Paused",
                Status::Paused | Status::Stopped => "Resumed",
                Status::Finished => "Restarted",
                Status::Destroyed => return vec![],
            };
            vec![
                Msg::Typing(TypingMsg::TogglePause),
                Msg::System(SystemMsg::UpdateStatusMessage(status.to_string())),
            ]
        }

        KeyEvent {
            code: KeyCode::Char('r'),
            modifiers: KeyModifiers::NONE,
            ..
        } => vec![
            Msg::Typing(TypingMsg::Restart),
            Msg::System(SystemMsg::ClearStatusMessage),
        ],

        KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::NONE,
            ..
        } => {
            if state.typing.cursor_enabled {
                vec![Msg::Typing(TypingMsg::ToggleCursor)]
            } else {
                vec![Msg::System(SystemMsg::UpdateStatusMessage(
                    "Cursor is disabled".to_string(),
                ))]
            }
        }

        _ => vec![], // No matching keybinding found
    }
}
