//! Typing sequencer
//!
//! A lazy, clock-free state machine that turns a phrase list into the steps
//! of a typing animation: delays, text snapshots, phrase completions and a
//! final `Finished` marker. The sequencer never sleeps; a driver (see
//! [`crate::infrastructure::typewriter`]) waits out each `Delay` and renders
//! each `Snapshot`.

use std::fmt;
use std::time::Duration;

use rand::{rngs::StdRng, RngCore, SeedableRng};
use serde::{Deserialize, Serialize};
use strum::Display;

use crate::{
    domain::{
        phrase::Phrase,
        timing::{DeleteMode, TimingConfig, PUNCTUATION_PAUSE},
    },
    error::Error,
};

/// Playback mode of a sequencer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display)]
pub enum Mode {
    #[default]
    Idle,
    Typing,
    PausedAfterType,
    Deleting,
    PausedAfterDelete,
    /// Terminal state of a non-looping sequence.
    Done,
}

/// One step of the animation timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Wait before pulling the next step.
    Delay { mode: Mode, duration: Duration },
    /// Text that should now be visible.
    Snapshot { text: String, mode: Mode },
    /// The last character of `phrase` has just been shown.
    PhraseComplete { index: usize, phrase: String },
    /// The sequence ended; no more steps follow.
    Finished,
}

/// Where the sequencer currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlaybackState {
    pub phrase_index: usize,
    /// Visible graphemes of the current phrase.
    pub display_len: usize,
    pub mode: Mode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Start,
    Type,
    TypeEmit,
    Punctuation,
    Complete,
    PauseAfterType,
    DeleteDecision,
    Delete,
    DeleteEmit,
    PauseAfterDelete,
    Advance,
    Finish,
    Exhausted,
}

pub type PhraseHook = Box<dyn FnMut(&str) + Send>;
pub type CompleteHook = Box<dyn FnMut() + Send>;

pub struct Sequencer {
    phrases: Vec<Phrase>,
    config: TimingConfig,
    state: PlaybackState,
    stage: Stage,
    floor: usize,
    pass: u64,
    ops_done: usize,
    ops_total: usize,
    rng: Box<dyn RngCore + Send>,
    on_phrase_complete: Option<PhraseHook>,
    on_complete: Option<CompleteHook>,
}

impl Sequencer {
    /// Creates a sequencer over `phrases`.
    ///
    /// Fails with [`Error::InvalidConfig`] when the list is empty or the
    /// timing configuration is unusable.
    pub fn new<I, P>(phrases: I, config: TimingConfig) -> Result<Self, Error>
    where
        I: IntoIterator<Item = P>,
        P: Into<Phrase>,
    {
        Self::with_rng(phrases, config, StdRng::from_entropy())
    }

    /// Like [`Sequencer::new`] with an explicit random source for jitter.
    pub fn with_rng<I, P, R>(phrases: I, config: TimingConfig, rng: R) -> Result<Self, Error>
    where
        I: IntoIterator<Item = P>,
        P: Into<Phrase>,
        R: RngCore + Send + 'static,
    {
        config.validate()?;
        let phrases = collect_phrases(phrases)?;
        Ok(Self {
            phrases,
            config,
            state: PlaybackState::default(),
            stage: Stage::Start,
            floor: 0,
            pass: 0,
            ops_done: 0,
            ops_total: 0,
            rng: Box::new(rng),
            on_phrase_complete: None,
            on_complete: None,
        })
    }

    /// Types `text` a single time and leaves it on screen.
    pub fn once(text: impl Into<Phrase>, config: TimingConfig) -> Result<Self, Error> {
        let config = TimingConfig {
            looping: false,
            delete_last_phrase: false,
            ..config
        };
        Self::new([text.into()], config)
    }

    /// Registers a hook called right after the last character of each phrase
    /// is emitted, before the pause that follows it.
    pub fn on_phrase_complete(mut self, hook: impl FnMut(&str) + Send + 'static) -> Self {
        self.on_phrase_complete = Some(Box::new(hook));
        self
    }

    /// Registers a hook called once when a non-looping sequence finishes.
    pub fn on_complete(mut self, hook: impl FnMut() + Send + 'static) -> Self {
        self.on_complete = Some(Box::new(hook));
        self
    }

    /// Detaches the registered hooks. The sequencer stops calling them and the
    /// caller becomes responsible for running them on
    /// [`Step::PhraseComplete`] and [`Step::Finished`].
    pub(crate) fn take_hooks(&mut self) -> (Option<PhraseHook>, Option<CompleteHook>) {
        (self.on_phrase_complete.take(), self.on_complete.take())
    }

    pub fn phrases(&self) -> &[Phrase] {
        &self.phrases
    }

    pub fn config(&self) -> &TimingConfig {
        &self.config
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    /// Number of completed passes over the phrase list.
    pub fn pass(&self) -> u64 {
        self.pass
    }

    pub fn is_finished(&self) -> bool {
        self.state.mode == Mode::Done
    }

    /// Text currently visible.
    pub fn snapshot(&self) -> &str {
        self.current().prefix(self.state.display_len)
    }

    /// Fraction of character operations done in the current pass.
    pub fn progress(&self) -> f64 {
        if self.is_finished() {
            return 1.0;
        }
        if self.ops_total == 0 {
            return 0.0;
        }
        (self.ops_done as f64 / self.ops_total as f64).clamp(0.0, 1.0)
    }

    /// Returns to the first phrase with nothing typed.
    pub fn reset(&mut self) {
        self.state = PlaybackState::default();
        self.stage = Stage::Start;
        self.floor = 0;
        self.pass = 0;
        self.ops_done = 0;
        self.ops_total = 0;
    }

    /// Swaps the phrase list and resets playback.
    pub fn replace_phrases<I, P>(&mut self, phrases: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = P>,
        P: Into<Phrase>,
    {
        self.phrases = collect_phrases(phrases)?;
        self.reset();
        Ok(())
    }

    /// Pulls the next step of the timeline, or `None` once finished.
    pub fn next_step(&mut self) -> Option<Step> {
        loop {
            match self.stage {
                Stage::Start => {
                    self.stage = Stage::Type;
                    self.begin_pass();
                    if !self.config.start_delay.is_zero() {
                        return Some(Step::Delay {
                            mode: Mode::Idle,
                            duration: self.config.start_delay,
                        });
                    }
                }
                Stage::Type => {
                    if self.state.display_len < self.current().len() {
                        self.state.mode = Mode::Typing;
                        self.stage = Stage::TypeEmit;
                        let duration = self.config.typing_delay(&mut self.rng);
                        return Some(Step::Delay {
                            mode: Mode::Typing,
                            duration,
                        });
                    }
                    self.stage = Stage::Complete;
                }
                Stage::TypeEmit => {
                    let typed = self.state.display_len;
                    self.state.display_len += 1;
                    self.ops_done += 1;
                    let phrase = self.current();
                    let more_to_type = self.state.display_len < phrase.len();
                    self.stage = if self.config.punctuation_pause
                        && more_to_type
                        && phrase.is_punctuation_at(typed)
                    {
                        Stage::Punctuation
                    } else {
                        Stage::Type
                    };
                    return Some(Step::Snapshot {
                        text: self.snapshot().to_owned(),
                        mode: Mode::Typing,
                    });
                }
                Stage::Punctuation => {
                    self.stage = Stage::Type;
                    return Some(Step::Delay {
                        mode: Mode::Typing,
                        duration: PUNCTUATION_PAUSE,
                    });
                }
                Stage::Complete => {
                    self.state.mode = Mode::PausedAfterType;
                    self.stage = Stage::PauseAfterType;
                    let phrase = self.current().as_str().to_owned();
                    if let Some(hook) = self.on_phrase_complete.as_mut() {
                        hook(&phrase);
                    }
                    return Some(Step::PhraseComplete {
                        index: self.state.phrase_index,
                        phrase,
                    });
                }
                Stage::PauseAfterType => {
                    self.stage = Stage::DeleteDecision;
                    if !self.config.pause_after_type.is_zero() {
                        return Some(Step::Delay {
                            mode: Mode::PausedAfterType,
                            duration: self.config.pause_after_type,
                        });
                    }
                }
                Stage::DeleteDecision => match self.floor_after(self.state.phrase_index) {
                    Some(floor) => {
                        self.floor = floor;
                        self.stage = Stage::Delete;
                    }
                    None => self.stage = Stage::Finish,
                },
                Stage::Delete => {
                    if self.state.display_len > self.floor {
                        self.state.mode = Mode::Deleting;
                        self.stage = Stage::DeleteEmit;
                        let duration = self.config.deleting_delay(&mut self.rng);
                        return Some(Step::Delay {
                            mode: Mode::Deleting,
                            duration,
                        });
                    }
                    self.stage = Stage::PauseAfterDelete;
                }
                Stage::DeleteEmit => {
                    self.state.display_len -= 1;
                    self.ops_done += 1;
                    self.stage = Stage::Delete;
                    return Some(Step::Snapshot {
                        text: self.snapshot().to_owned(),
                        mode: Mode::Deleting,
                    });
                }
                Stage::PauseAfterDelete => {
                    self.state.mode = Mode::PausedAfterDelete;
                    self.stage = Stage::Advance;
                    if !self.config.pause_after_delete.is_zero() {
                        return Some(Step::Delay {
                            mode: Mode::PausedAfterDelete,
                            duration: self.config.pause_after_delete,
                        });
                    }
                }
                Stage::Advance => {
                    let next = self.state.phrase_index + 1;
                    if next < self.phrases.len() {
                        self.state.phrase_index = next;
                        self.stage = Stage::Type;
                    } else if self.config.looping {
                        self.state.phrase_index = 0;
                        self.pass += 1;
                        self.begin_pass();
                        self.stage = Stage::Type;
                    } else {
                        // Only reached when the last phrase was erased on purpose
                        self.state.display_len = 0;
                        self.stage = Stage::Finish;
                    }
                }
                Stage::Finish => {
                    self.state.mode = Mode::Done;
                    self.stage = Stage::Exhausted;
                    if let Some(hook) = self.on_complete.as_mut() {
                        hook();
                    }
                    return Some(Step::Finished);
                }
                Stage::Exhausted => return None,
            }
        }
    }

    fn current(&self) -> &Phrase {
        &self.phrases[self.state.phrase_index]
    }

    /// How far phrase `index` is erased, or `None` when it stays on screen.
    fn floor_after(&self, index: usize) -> Option<usize> {
        let is_last = index + 1 == self.phrases.len();
        if is_last && !self.config.looping {
            return self.config.delete_last_phrase.then_some(0);
        }
        let next = &self.phrases[(index + 1) % self.phrases.len()];
        Some(match self.config.delete_mode {
            DeleteMode::Smart => self.phrases[index].common_prefix_len(next),
            DeleteMode::Full => 0,
        })
    }

    fn begin_pass(&mut self) {
        let mut len = self.state.display_len;
        let mut total = 0;
        for (index, phrase) in self.phrases.iter().enumerate() {
            total += phrase.len().saturating_sub(len);
            len = phrase.len();
            match self.floor_after(index) {
                Some(floor) => {
                    total += len - floor.min(len);
                    len = floor;
                }
                None => break,
            }
        }
        self.ops_done = 0;
        self.ops_total = total;
    }
}

impl Iterator for Sequencer {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        self.next_step()
    }
}

impl fmt::Debug for Sequencer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sequencer")
            .field("phrases", &self.phrases)
            .field("config", &self.config)
            .field("state", &self.state)
            .field("pass", &self.pass)
            .finish_non_exhaustive()
    }
}

fn collect_phrases<I, P>(phrases: I) -> Result<Vec<Phrase>, Error>
where
    I: IntoIterator<Item = P>,
    P: Into<Phrase>,
{
    let phrases: Vec<Phrase> = phrases.into_iter().map(Into::into).collect();
    if phrases.is_empty() {
        return Err(Error::invalid_config("phrase list is empty"));
    }
    Ok(phrases)
}
