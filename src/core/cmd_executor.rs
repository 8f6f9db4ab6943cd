use color_eyre::eyre::Result;
use tokio::sync::mpsc;

use crate::{
    core::cmd::{Cmd, TuiCommand, TypewriterCommand},
    infrastructure::typewriter::Typewriter,
};

/// Command executor that bridges Elm commands to the typewriter and the host TUI
#[derive(Clone)]
pub struct CmdExecutor {
    typewriter: Typewriter,
    tui_sender: Option<mpsc::UnboundedSender<TuiCommand>>,
    render_req_sender: Option<mpsc::UnboundedSender<()>>,
}

impl CmdExecutor {
    pub fn new(typewriter: Typewriter) -> Self {
        Self {
            typewriter,
            tui_sender: None,
            render_req_sender: None,
        }
    }

    /// Inject TUI command sender for executing TuiCommand asynchronously.
    pub fn set_tui_sender(&mut self, sender: mpsc::UnboundedSender<TuiCommand>) {
        self.tui_sender = Some(sender);
    }

    /// Inject render request sender for AppRunner-orchestrated rendering.
    pub fn set_render_request_sender(&mut self, sender: mpsc::UnboundedSender<()>) {
        self.render_req_sender = Some(sender);
    }

    pub fn typewriter(&self) -> &Typewriter {
        &self.typewriter
    }

    pub fn execute_command(&self, cmd: &Cmd) -> Result<()> {
        match cmd {
            Cmd::None => {}

            Cmd::Typewriter(command) => self.execute_typewriter_command(*command)?,

            Cmd::Tui(tui_cmd) => {
                if let Some(sender) = &self.tui_sender {
                    sender.send(tui_cmd.clone())?;
                } else {
                    log::debug!("TUI command ignored: no TUI attached ({tui_cmd:?})");
                }
            }

            Cmd::RequestRender => {
                if let Some(sender) = &self.render_req_sender {
                    // The runner coalesces requests; a closed channel means it is gone
                    let _ = sender.send(());
                }
            }

            Cmd::LogError { message } => {
                log::error!("{message}");
            }

            Cmd::Batch(commands) => self.execute_commands(commands)?,
        }
        Ok(())
    }

    /// Execute commands in priority order
    pub fn execute_commands(&self, commands: &[Cmd]) -> Result<()> {
        let mut ordered: Vec<&Cmd> = commands.iter().collect();
        ordered.sort_by_key(|cmd| cmd.priority());
        for cmd in ordered {
            self.execute_command(cmd)?;
        }
        Ok(())
    }

    fn execute_typewriter_command(&self, command: TypewriterCommand) -> Result<()> {
        log::debug!("typewriter command: {command:?}");
        match command {
            TypewriterCommand::Pause => self.typewriter.pause()?,
            TypewriterCommand::Resume => self.typewriter.resume()?,
            TypewriterCommand::Restart => self.typewriter.restart()?,
            TypewriterCommand::PauseCursor => self.typewriter.pause_cursor()?,
            TypewriterCommand::ResumeCursor => self.typewriter.resume_cursor()?,
        }
        Ok(())
    }
}
