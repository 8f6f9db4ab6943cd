use std::sync::Arc;

use color_eyre::eyre::Result;
use tokio::sync::Notify;

use crate::{
    domain::{cursor::CursorConfig, sequencer::Sequencer},
    infrastructure::{config::Config, surface::Surface, typewriter::Typewriter},
};

/// Plays the configured phrases onto `surface` without a terminal UI.
///
/// Returns once the sequence has completed or on Ctrl-C. A looping sequence
/// only ends on Ctrl-C. The last snapshot written is left in place.
pub async fn run_headless(config: &Config, surface: impl Surface) -> Result<()> {
    let done = Arc::new(Notify::new());
    let notifier = Arc::clone(&done);
    let sequencer = Sequencer::new(
        config.phrases.iter().map(String::as_str),
        config.timing()?,
    )?
    .on_complete(move || notifier.notify_one());

    let cursor = CursorConfig {
        enabled: false,
        ..config.cursor.clone()
    };
    let typewriter = Typewriter::new(sequencer, surface, cursor);
    typewriter.start()?;
    tracing::info!(phrases = config.phrases.len(), "headless playback started");

    tokio::select! {
        () = done.notified() => tracing::info!("headless playback finished"),
        signal = tokio::signal::ctrl_c() => {
            signal?;
            tracing::info!("interrupted");
        }
    }

    let report = serde_json::to_string(&typewriter.report())?;
    tracing::info!(%report, "final playback state");
    // Dropping the last handle stops the timers and leaves the text as is
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::infrastructure::config::TypingSettings;

    #[tokio::test(start_paused = true)]
    async fn test_plays_once_to_completion() -> Result<()> {
        let config = Config {
            phrases: vec!["Hi".into(), "Hey".into()],
            typing: TypingSettings {
                type_speed: 0.05,
                delete_speed: 0.05,
                pause_after_type: 0.2,
                pause_after_delete: 0.1,
                start_delay: 0.0,
                looping: false,
                natural_typing: false,
                punctuation_pause: false,
                ..Default::default()
            },
            ..Config::default()
        };
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);

        run_headless(&config, move |text: &str| {
            sink.lock().expect("lock").push(text.to_owned());
        })
        .await?;

        let seen = seen.lock().expect("lock");
        assert_eq!(seen.last().map(String::as_str), Some("Hey"));
        assert!(seen.contains(&"Hi".to_string()));
        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_timing_is_an_error() {
        let config = Config {
            phrases: vec!["Hi".into()],
            typing: TypingSettings {
                type_speed: -1.0,
                ..Default::default()
            },
            ..Config::default()
        };
        assert!(run_headless(&config, |_: &str| {}).await.is_err());
    }
}
