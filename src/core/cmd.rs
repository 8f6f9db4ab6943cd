use serde::{Deserialize, Serialize};

/// UI (TUI) specific sub-commands executed by the host/runtime
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TuiCommand {
    // Render is orchestrated by AppRunner; see Cmd::RequestRender
    Resize { width: u16, height: u16 },
}

/// Control calls forwarded to the running typewriter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypewriterCommand {
    Pause,
    Resume,
    Restart,
    PauseCursor,
    ResumeCursor,
}

/// Elm-like command definitions
/// Represents side effects (typewriter control, terminal, logging)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cmd {
    Typewriter(TypewriterCommand),

    // UI-related commands
    Tui(TuiCommand),
    /// Request a render; coalesced by AppRunner
    RequestRender,

    // Logging related
    LogError { message: String },

    // Batch command (execute multiple commands together)
    Batch(Vec<Cmd>),

    // Do nothing (for testing)
    None,
}

impl Cmd {
    /// Combine multiple commands into one
    pub fn batch(mut commands: Vec<Cmd>) -> Cmd {
        match commands.len() {
            0 => Cmd::None,
            1 => commands.pop().unwrap_or(Cmd::None),
            _ => Cmd::Batch(commands),
        }
    }

    /// Get command priority (smaller numbers = higher priority)
    pub fn priority(&self) -> u8 {
        match self {
            // Typewriter control reacts to a key press
            Cmd::Typewriter(..) => 0,
            Cmd::Tui(..) | Cmd::RequestRender => 1,
            Cmd::LogError { .. } => 4,
            Cmd::Batch(cmds) => cmds.iter().map(|cmd| cmd.priority()).min().unwrap_or(255),
            Cmd::None => 255,
        }
    }
}
