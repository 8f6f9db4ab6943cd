use crate::{
    core::{
        cmd::{Cmd, TypewriterCommand},
        msg::typing::TypingMsg,
    },
    domain::sequencer::Mode,
    infrastructure::typewriter::Status,
};

/// What the screen knows about the running typewriter
///
/// `text` and `cursor_visible` are pushed by the typewriter itself; the rest
/// is refreshed by polling on every tick.
#[derive(Debug, Clone, PartialEq)]
pub struct TypingState {
    pub text: String,
    pub cursor_visible: bool,
    pub cursor_enabled: bool,
    pub cursor_paused: bool,
    pub status: Status,
    pub mode: Mode,
    pub phrase_index: usize,
    pub phrase_count: usize,
    pub pass: u64,
    pub progress: f64,
}

impl Default for TypingState {
    fn default() -> Self {
        Self::new(0, true)
    }
}

impl TypingState {
    pub fn new(phrase_count: usize, cursor_enabled: bool) -> Self {
        Self {
            text: String::new(),
            cursor_visible: cursor_enabled,
            cursor_enabled,
            cursor_paused: false,
            status: Status::Stopped,
            mode: Mode::Idle,
            phrase_index: 0,
            phrase_count,
            pass: 0,
            progress: 0.0,
        }
    }

    pub fn is_paused(&self) -> bool {
        self.status == Status::Paused
    }

    /// Typing-specific update function
    /// Returns: Generated commands
    pub fn update(&mut self, msg: TypingMsg) -> Vec<Cmd> {
        match msg {
            TypingMsg::SnapshotChanged(text) => {
                self.text = text;
                vec![Cmd::RequestRender]
            }

            TypingMsg::CursorBlink(visible) => {
                self.cursor_visible = visible;
                vec![Cmd::RequestRender]
            }

            TypingMsg::PlaybackPolled(report) => {
                self.status = report.status;
                self.mode = report.state.mode;
                self.phrase_index = report.state.phrase_index;
                self.phrase_count = report.phrase_count;
                self.pass = report.pass;
                self.progress = report.progress;
                vec![]
            }

            TypingMsg::TogglePause => match self.status {
                Status::Running => {
                    self.status = Status::Paused;
                    vec![Cmd::Typewriter(TypewriterCommand::Pause)]
                }
                Status::Paused | Status::Stopped => {
                    self.status = Status::Running;
                    vec![Cmd::Typewriter(TypewriterCommand::Resume)]
                }
                // A finished run has nothing left to resume
                Status::Finished => self.restart(),
                Status::Destroyed => vec![],
            },

            TypingMsg::Restart => {
                if self.status == Status::Destroyed {
                    return vec![];
                }
                self.restart()
            }

            TypingMsg::ToggleCursor => {
                if !self.cursor_enabled || self.status == Status::Destroyed {
                    return vec![];
                }
                self.cursor_paused = !self.cursor_paused;
                let command = if self.cursor_paused {
                    TypewriterCommand::PauseCursor
                } else {
                    TypewriterCommand::ResumeCursor
                };
                vec![Cmd::Typewriter(command)]
            }
        }
    }

    fn restart(&mut self) -> Vec<Cmd> {
        self.text.clear();
        self.status = Status::Running;
        self.progress = 0.0;
        vec![
            Cmd::Typewriter(TypewriterCommand::Restart),
            Cmd::RequestRender,
        ]
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::{domain::sequencer::PlaybackState, infrastructure::typewriter::PlaybackReport};

    fn running() -> TypingState {
        TypingState {
            status: Status::Running,
            ..TypingState::new(3, true)
        }
    }

    #[test]
    fn test_snapshot_replaces_text() {
        let mut typing = running();
        let cmds = typing.update(TypingMsg::SnapshotChanged("He".into()));
        assert_eq!(typing.text, "He");
        assert_eq!(cmds, vec![Cmd::RequestRender]);
    }

    #[test]
    fn test_polled_report_overwrites_progress() {
        let mut typing = running();
        let cmds = typing.update(TypingMsg::PlaybackPolled(PlaybackReport {
            status: Status::Running,
            state: PlaybackState {
                phrase_index: 2,
                display_len: 4,
                mode: Mode::Deleting,
            },
            phrase_count: 3,
            pass: 1,
            progress: 0.5,
        }));

        assert!(cmds.is_empty());
        assert_eq!(typing.phrase_index, 2);
        assert_eq!(typing.mode, Mode::Deleting);
        assert_eq!(typing.pass, 1);
        assert_eq!(typing.progress, 0.5);
    }

    #[rstest]
    #[case(Status::Running, Status::Paused, TypewriterCommand::Pause)]
    #[case(Status::Paused, Status::Running, TypewriterCommand::Resume)]
    #[case(Status::Stopped, Status::Running, TypewriterCommand::Resume)]
    fn test_toggle_pause(
        #[case] from: Status,
        #[case] to: Status,
        #[case] command: TypewriterCommand,
    ) {
        let mut typing = TypingState {
            status: from,
            ..TypingState::new(1, true)
        };
        let cmds = typing.update(TypingMsg::TogglePause);
        assert_eq!(typing.status, to);
        assert_eq!(cmds, vec![Cmd::Typewriter(command)]);
    }

    #[test]
    fn test_toggle_pause_after_finish_restarts() {
        let mut typing = TypingState {
            status: Status::Finished,
            text: "Hey".into(),
            ..TypingState::new(1, true)
        };
        let cmds = typing.update(TypingMsg::TogglePause);
        assert!(typing.text.is_empty());
        assert_eq!(typing.status, Status::Running);
        assert_eq!(cmds[0], Cmd::Typewriter(TypewriterCommand::Restart));
    }

    #[test]
    fn test_destroyed_ignores_controls() {
        let mut typing = TypingState {
            status: Status::Destroyed,
            ..TypingState::new(1, true)
        };
        assert!(typing.update(TypingMsg::TogglePause).is_empty());
        assert!(typing.update(TypingMsg::Restart).is_empty());
        assert!(typing.update(TypingMsg::ToggleCursor).is_empty());
    }

    #[test]
    fn test_toggle_cursor() {
        let mut typing = running();
        assert_eq!(
            typing.update(TypingMsg::ToggleCursor),
            vec![Cmd::Typewriter(TypewriterCommand::PauseCursor)]
        );
        assert!(typing.cursor_paused);
        assert_eq!(
            typing.update(TypingMsg::ToggleCursor),
            vec![Cmd::Typewriter(TypewriterCommand::ResumeCursor)]
        );
        assert!(!typing.cursor_paused);
    }

    #[test]
    fn test_toggle_cursor_when_disabled() {
        let mut typing = TypingState::new(1, false);
        assert!(typing.update(TypingMsg::ToggleCursor).is_empty());
        assert!(!typing.cursor_paused);
        assert!(!typing.cursor_visible);
    }
}
