use std::io::Write;

use tokio::sync::mpsc;

use crate::core::raw_msg::RawMsg;

/// Anything that can show the typed text.
///
/// The typewriter owns no rendering surface of its own: every snapshot and
/// every cursor blink is handed to a `Surface`.
pub trait Surface: Send + 'static {
    fn render(&mut self, text: &str);

    fn set_cursor_visible(&mut self, _visible: bool) {}
}

impl<F> Surface for F
where
    F: FnMut(&str) + Send + 'static,
{
    fn render(&mut self, text: &str) {
        self(text)
    }
}

/// Forwards snapshots and cursor blinks to the application as raw messages.
#[derive(Debug, Clone)]
pub struct ChannelSurface {
    raw_msg_tx: mpsc::UnboundedSender<RawMsg>,
}

impl ChannelSurface {
    pub fn new(raw_msg_tx: mpsc::UnboundedSender<RawMsg>) -> Self {
        Self { raw_msg_tx }
    }
}

impl Surface for ChannelSurface {
    fn render(&mut self, text: &str) {
        // The receiver is gone only while the application shuts down
        let _ = self.raw_msg_tx.send(RawMsg::Snapshot(text.to_owned()));
    }

    fn set_cursor_visible(&mut self, visible: bool) {
        let _ = self.raw_msg_tx.send(RawMsg::CursorBlink(visible));
    }
}

/// Writes every snapshot as its own line, for running without a terminal UI.
#[derive(Debug)]
pub struct LineSurface<W> {
    out: W,
}

impl<W: Write + Send + 'static> LineSurface<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send + 'static> Surface for LineSurface<W> {
    fn render(&mut self, text: &str) {
        tracing::trace!(snapshot = text);
        if let Err(e) = writeln!(self.out, "{text}").and_then(|()| self.out.flush()) {
            log::warn!("failed to write snapshot: {e}");
        }
    }
}
