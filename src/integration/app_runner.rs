use std::sync::Arc;

use color_eyre::eyre::Result;
use ratatui::layout::Rect;
use tokio::sync::{mpsc, Mutex};

use crate::{
    core::{cmd::TuiCommand, cmd_executor::CmdExecutor, raw_msg::RawMsg, state::AppState},
    domain::sequencer::Sequencer,
    infrastructure::{
        config::Config,
        surface::ChannelSurface,
        tui::{Event, Frame, TuiLike},
        typewriter::Typewriter,
    },
    integration::elm_integration::ElmRuntime,
    presentation::components::Components,
};

/// Drives the typewriter inside the terminal UI.
///
/// Snapshots and cursor blinks reach the Elm runtime through a
/// [`ChannelSurface`]; terminal events are fed in one at a time and every
/// event is followed by an update cycle and, when requested, a redraw.
pub struct AppRunner {
    runtime: ElmRuntime,
    typewriter: Typewriter,
    tui: Arc<Mutex<dyn TuiLike>>,
    components: Components,
    tui_cmd_rx: mpsc::UnboundedReceiver<TuiCommand>,
    render_req_rx: mpsc::UnboundedReceiver<()>,
}

impl AppRunner {
    pub fn new(config: &Config, tui: Arc<Mutex<dyn TuiLike>>) -> Result<Self> {
        let sequencer = Sequencer::new(
            config.phrases.iter().map(String::as_str),
            config.timing()?,
        )?;
        let state = AppState::new(
            config.headline.as_str(),
            sequencer.phrases().len(),
            config.cursor.enabled,
        );

        let mut runtime = ElmRuntime::new(state);
        let surface = ChannelSurface::new(runtime.raw_sender());
        let typewriter = Typewriter::new(sequencer, surface, config.cursor.clone());

        let (tui_tx, tui_cmd_rx) = mpsc::unbounded_channel();
        let (render_tx, render_req_rx) = mpsc::unbounded_channel();
        let mut executor = CmdExecutor::new(typewriter.clone());
        executor.set_tui_sender(tui_tx);
        executor.set_render_request_sender(render_tx);
        runtime.set_executor(executor);

        Ok(Self {
            runtime,
            typewriter,
            tui,
            components: Components::new(config.styles.clone(), config.cursor.glyph.as_str()),
            tui_cmd_rx,
            render_req_rx,
        })
    }

    pub fn runtime(&self) -> &ElmRuntime {
        &self.runtime
    }

    pub fn typewriter(&self) -> &Typewriter {
        &self.typewriter
    }

    pub fn should_quit(&self) -> bool {
        self.runtime.state().system.should_quit
    }

    /// Enter the terminal, draw an empty frame and start typing; then handle
    /// events until quit or until the event stream ends.
    pub async fn run(&mut self) -> Result<()> {
        self.enter().await?;
        let result = self.event_loop().await;
        self.shutdown().await?;
        result
    }

    pub async fn enter(&mut self) -> Result<()> {
        self.tui.lock().await.enter()?;
        self.typewriter.start()?;
        self.runtime.send_raw_msg(RawMsg::Playback(self.typewriter.report()));
        self.runtime.run_update_cycle()?;
        self.render().await
    }

    async fn event_loop(&mut self) -> Result<()> {
        while !self.should_quit() {
            let event = {
                let mut tui = self.tui.lock().await;
                tui.next().await
            };
            let Some(event) = event else {
                log::info!("event stream ended");
                break;
            };
            self.handle_event(event).await?;
        }
        Ok(())
    }

    /// One turn of the loop: translate the event, run an update cycle, apply
    /// terminal commands and redraw if anything asked for it.
    pub async fn handle_event(&mut self, event: Event) -> Result<()> {
        let mut render = false;
        match event {
            Event::Quit | Event::Closed => self.runtime.send_raw_msg(RawMsg::Quit),
            Event::Tick => {
                self.runtime.send_raw_msg(RawMsg::Tick);
                self.runtime
                    .send_raw_msg(RawMsg::Playback(self.typewriter.report()));
            }
            Event::Render => {
                self.runtime.send_raw_msg(RawMsg::Render);
                render = true;
            }
            Event::Resize(width, height) => {
                self.runtime.send_raw_msg(RawMsg::Resize(width, height));
            }
            Event::Key(key) => self.runtime.send_raw_msg(RawMsg::Key(key)),
            Event::Error => self
                .runtime
                .send_raw_msg(RawMsg::Error("terminal input failed".to_string())),
            Event::Init => {}
        }

        if let Err(e) = self.runtime.run_update_cycle() {
            log::error!("ElmRuntime error: {e}");
            // Surface the failure in the status bar on the next cycle
            self.runtime.send_raw_msg(RawMsg::Error(e.to_string()));
        }

        while let Ok(command) = self.tui_cmd_rx.try_recv() {
            match command {
                TuiCommand::Resize { width, height } => {
                    self.tui
                        .lock()
                        .await
                        .resize(Rect::new(0, 0, width, height))?;
                    render = true;
                }
            }
        }
        while self.render_req_rx.try_recv().is_ok() {
            render = true;
        }

        if render {
            self.render().await?;
        }
        Ok(())
    }

    pub async fn shutdown(&mut self) -> Result<()> {
        self.typewriter.destroy();
        self.tui.lock().await.exit()
    }

    async fn render(&mut self) -> Result<()> {
        let state = self.runtime.state();
        let components = &self.components;
        self.tui
            .lock()
            .await
            .draw(&mut |frame: &mut Frame<'_>| components.render(frame, state))
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use pretty_assertions::assert_eq;
    use tokio::time::{self, Duration};

    use super::*;
    use crate::infrastructure::{config::TypingSettings, tui::test::TestTui, typewriter::Status};

    fn config() -> Config {
        Config {
            headline: "Frontend".into(),
            phrases: vec!["Dev".into()],
            typing: TypingSettings {
                type_speed: 0.01,
                delete_speed: 0.01,
                pause_after_type: 0.1,
                pause_after_delete: 0.1,
                start_delay: 0.0,
                looping: false,
                natural_typing: false,
                ..Default::default()
            },
            ..Config::default()
        }
    }

    fn key(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    #[tokio::test(start_paused = true)]
    async fn test_snapshots_reach_the_screen() -> Result<()> {
        let tui = Arc::new(Mutex::new(TestTui::new(30, 5)?));
        let mut runner = AppRunner::new(&config(), tui.clone())?;

        runner.enter().await?;
        time::sleep(Duration::from_secs(1)).await;
        runner.handle_event(Event::Render).await?;

        assert_eq!(runner.runtime().state().typing.text, "Dev");
        let lines = tui.lock().await.lines();
        assert!(lines.iter().any(|line| line.trim() == "Frontend"));
        assert!(lines
            .iter()
            .any(|line| line.trim() == "Dev|" || line.trim() == "Dev"));
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn test_space_pauses_the_typewriter() -> Result<()> {
        let tui = Arc::new(Mutex::new(TestTui::new(60, 5)?));
        let mut runner = AppRunner::new(&config(), tui.clone())?;

        runner.enter().await?;
        runner.handle_event(key(' ')).await?;

        assert_eq!(runner.typewriter().status(), Status::Paused);
        assert_eq!(
            runner.runtime().state().system.status_message.as_deref(),
            Some("Paused")
        );

        runner.handle_event(Event::Tick).await?;
        assert_eq!(runner.runtime().state().typing.status, Status::Paused);
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_until_quit_key() -> Result<()> {
        let tui = Arc::new(Mutex::new(TestTui::with_events(
            60,
            5,
            [Event::Init, key('c'), Event::Tick, key('q'), key('r')],
        )?));
        let mut runner = AppRunner::new(&config(), tui.clone())?;

        runner.run().await?;

        assert!(runner.should_quit());
        assert!(runner.runtime().state().typing.cursor_paused);
        // Events after quit are never read
        assert!(!tui.lock().await.is_entered());
        assert_eq!(runner.typewriter().status(), Status::Destroyed);
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn test_resize_redraws() -> Result<()> {
        let tui = Arc::new(Mutex::new(TestTui::new(20, 4)?));
        let mut runner = AppRunner::new(&config(), tui.clone())?;
        runner.enter().await?;
        let draws = tui.lock().await.draw_count();

        runner.handle_event(Event::Resize(40, 6)).await?;

        let tui = tui.lock().await;
        assert_eq!(tui.draw_count(), draws + 1);
        assert_eq!(tui.buffer().area, Rect::new(0, 0, 40, 6));
        Ok(())
    }

    #[test]
    fn test_empty_phrases_are_rejected() -> Result<()> {
        let tui = Arc::new(Mutex::new(TestTui::new(20, 4)?));
        let config = Config {
            phrases: vec![],
            ..config()
        };
        assert!(AppRunner::new(&config, tui).is_err());
        Ok(())
    }
}
