use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use strum::Display;
use tokio::{
    runtime::Handle,
    task::{self, JoinHandle},
    time::{self, Instant, MissedTickBehavior},
};
use tracing::{debug, trace, warn};

use crate::{
    domain::{
        cursor::{Cursor, CursorConfig, Message as CursorMessage},
        phrase::Phrase,
        sequencer::{CompleteHook, PhraseHook, PlaybackState, Sequencer, Step},
    },
    error::Error,
    infrastructure::surface::Surface,
};

/// Lifecycle of a [`Typewriter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum Status {
    Stopped,
    Running,
    Paused,
    Finished,
    Destroyed,
}

/// Point-in-time view of a typewriter, polled by the terminal front end.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaybackReport {
    pub status: Status,
    pub state: PlaybackState,
    pub phrase_count: usize,
    pub pass: u64,
    pub progress: f64,
}

/// Drives a [`Sequencer`] on tokio timers and renders into a [`Surface`].
///
/// At most one typing timer and one cursor timer are pending per typewriter.
/// Each timer carries a generation number; `pause`, `restart` and `destroy`
/// bump the generation under the state lock, so a timer that already fired
/// but has not yet acquired the lock can no longer touch the surface.
///
/// Playback state and the surface sit behind separate locks, always taken
/// surface first. Sequencer hooks run with neither lock held, so a hook may
/// call any method of the typewriter. A [`Surface`] may query, pause or
/// resume the typewriter from `render`, but calling `restart`,
/// `replace_phrases` or `destroy` from inside the surface deadlocks.
///
/// Handles are cheap to clone. Background tasks only hold weak references,
/// so dropping the last handle stops everything.
#[derive(Clone)]
pub struct Typewriter {
    shared: Arc<Shared>,
}

struct Shared {
    state: Mutex<Inner>,
    surface: Mutex<Box<dyn Surface>>,
    hooks: Mutex<Hooks>,
}

struct Inner {
    sequencer: Sequencer,
    cursor: Cursor,
    cursor_config: CursorConfig,
    cursor_paused: bool,
    status: Status,
    generation: u64,
    cursor_generation: u64,
    deadline: Option<Instant>,
    remaining: Option<Duration>,
    task: Option<JoinHandle<()>>,
    cursor_task: Option<JoinHandle<()>>,
}

struct Hooks {
    phrase_complete: Option<PhraseHook>,
    complete: Option<CompleteHook>,
}

enum Advance {
    Wait(Duration),
    Completed(String),
    Done,
}

impl Typewriter {
    pub fn new(
        mut sequencer: Sequencer,
        surface: impl Surface,
        cursor_config: CursorConfig,
    ) -> Self {
        let (phrase_complete, complete) = sequencer.take_hooks();
        let mut surface: Box<dyn Surface> = Box::new(surface);
        surface.set_cursor_visible(cursor_config.enabled);
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(Inner {
                    sequencer,
                    cursor: Cursor::new(),
                    cursor_config,
                    cursor_paused: false,
                    status: Status::Stopped,
                    generation: 0,
                    cursor_generation: 0,
                    deadline: None,
                    remaining: None,
                    task: None,
                    cursor_task: None,
                }),
                surface: Mutex::new(surface),
                hooks: Mutex::new(Hooks {
                    phrase_complete,
                    complete,
                }),
            }),
        }
    }

    /// Begins the schedule. Does nothing when already running; continues a
    /// paused schedule.
    pub fn start(&self) -> Result<(), Error> {
        let weak = Arc::downgrade(&self.shared);
        let mut inner = self.lock();
        inner.ensure_alive()?;
        if matches!(inner.status, Status::Running | Status::Finished) {
            return Ok(());
        }
        let runtime = runtime()?;
        inner.play(&runtime, &weak);
        Ok(())
    }

    /// Freezes the schedule at the current snapshot.
    pub fn pause(&self) -> Result<(), Error> {
        let mut inner = self.lock();
        inner.ensure_alive()?;
        if inner.status == Status::Running {
            inner.remaining = inner
                .deadline
                .take()
                .map(|deadline| deadline.saturating_duration_since(Instant::now()));
            inner.cancel_typing();
            inner.status = Status::Paused;
            debug!(remaining = ?inner.remaining, "typewriter paused");
        }
        Ok(())
    }

    /// Continues from the paused snapshot.
    pub fn resume(&self) -> Result<(), Error> {
        self.start()
    }

    pub fn play(&self) -> Result<(), Error> {
        self.resume()
    }

    /// Clears the output and plays from the first phrase again.
    pub fn restart(&self) -> Result<(), Error> {
        let weak = Arc::downgrade(&self.shared);
        let mut surface = self.lock_surface();
        {
            let mut inner = self.lock();
            inner.ensure_alive()?;
            let runtime = runtime()?;
            inner.cancel_typing();
            inner.remaining = None;
            inner.sequencer.reset();
            debug!("typewriter restarted");
            inner.play(&runtime, &weak);
        }
        surface.render("");
        Ok(())
    }

    /// Replaces the phrases and starts over, keeping the running or paused
    /// status.
    pub fn replace_phrases<I, P>(&self, phrases: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = P>,
        P: Into<Phrase>,
    {
        let weak = Arc::downgrade(&self.shared);
        let mut surface = self.lock_surface();
        {
            let mut inner = self.lock();
            inner.ensure_alive()?;
            let replay = matches!(inner.status, Status::Running | Status::Finished);
            let runtime = if replay { Some(runtime()?) } else { None };
            inner.sequencer.replace_phrases(phrases)?;
            inner.cancel_typing();
            inner.remaining = None;
            if let Some(runtime) = runtime {
                inner.play(&runtime, &weak);
            }
        }
        surface.render("");
        Ok(())
    }

    /// Cancels every timer and clears the output. Calling it twice is fine.
    pub fn destroy(&self) {
        let mut surface = self.lock_surface();
        {
            let mut inner = self.lock();
            if inner.status == Status::Destroyed {
                return;
            }
            inner.cancel_typing();
            inner.cancel_cursor();
            inner.status = Status::Destroyed;
        }
        surface.render("");
        surface.set_cursor_visible(false);
        debug!("typewriter destroyed");
    }

    /// Stops blinking; the typing schedule is unaffected.
    pub fn pause_cursor(&self) -> Result<(), Error> {
        let mut inner = self.lock();
        inner.ensure_alive()?;
        inner.cursor_paused = true;
        inner.cancel_cursor();
        Ok(())
    }

    pub fn resume_cursor(&self) -> Result<(), Error> {
        let weak = Arc::downgrade(&self.shared);
        let mut inner = self.lock();
        inner.ensure_alive()?;
        inner.cursor_paused = false;
        if inner.status != Status::Stopped {
            let runtime = runtime()?;
            inner.ensure_cursor(&runtime, &weak);
        }
        Ok(())
    }

    pub fn status(&self) -> Status {
        self.lock().status
    }

    pub fn is_playing(&self) -> bool {
        self.status() == Status::Running
    }

    pub fn state(&self) -> PlaybackState {
        self.lock().sequencer.state()
    }

    pub fn snapshot(&self) -> String {
        self.lock().sequencer.snapshot().to_owned()
    }

    pub fn progress(&self) -> f64 {
        self.lock().sequencer.progress()
    }

    pub fn report(&self) -> PlaybackReport {
        let inner = self.lock();
        PlaybackReport {
            status: inner.status,
            state: inner.sequencer.state(),
            phrase_count: inner.sequencer.phrases().len(),
            pass: inner.sequencer.pass(),
            progress: inner.sequencer.progress(),
        }
    }

    pub fn cursor_visible(&self) -> bool {
        let inner = self.lock();
        inner.cursor_config.enabled && inner.cursor.is_visible()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        lock(&self.shared.state)
    }

    fn lock_surface(&self) -> MutexGuard<'_, Box<dyn Surface>> {
        lock(&self.shared.surface)
    }
}

impl fmt::Debug for Typewriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.lock();
        f.debug_struct("Typewriter")
            .field("status", &inner.status)
            .field("sequencer", &inner.sequencer)
            .finish_non_exhaustive()
    }
}

impl Shared {
    fn phrase_completed(&self, phrase: &str) {
        if let Some(hook) = lock(&self.hooks).phrase_complete.as_mut() {
            hook(phrase);
        }
    }

    fn completed(&self) {
        if let Some(hook) = lock(&self.hooks).complete.as_mut() {
            hook();
        }
    }
}

impl Inner {
    fn ensure_alive(&self) -> Result<(), Error> {
        if self.status == Status::Destroyed {
            return Err(Error::InstanceDestroyed);
        }
        Ok(())
    }

    fn play(&mut self, runtime: &Handle, weak: &Weak<Shared>) {
        self.cancel_typing();
        self.generation += 1;
        let wait = self.remaining.take();
        self.task = Some(runtime.spawn(run_typing(weak.clone(), self.generation, wait)));
        self.status = Status::Running;
        debug!(generation = self.generation, ?wait, "typewriter playing");
        if !self.cursor_paused {
            self.ensure_cursor(runtime, weak);
        }
    }

    fn cancel_typing(&mut self) {
        self.generation += 1;
        self.deadline = None;
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    fn ensure_cursor(&mut self, runtime: &Handle, weak: &Weak<Shared>) {
        if !self.cursor_config.enabled || self.cursor_task.is_some() {
            return;
        }
        let Some(period) = self.cursor_config.blink_period() else {
            warn!(
                interval = ?self.cursor_config.blink_interval,
                "cursor blink interval out of range, not blinking"
            );
            return;
        };
        self.cursor_generation += 1;
        self.cursor_task = Some(runtime.spawn(run_cursor(
            weak.clone(),
            self.cursor_generation,
            period,
        )));
    }

    fn cancel_cursor(&mut self) {
        self.cursor_generation += 1;
        if let Some(task) = self.cursor_task.take() {
            task.abort();
        }
    }

    /// Applies steps until the next timer is needed, collecting the snapshots
    /// to render on the way.
    fn advance(&mut self, snapshots: &mut Vec<String>) -> Advance {
        loop {
            match self.sequencer.next_step() {
                Some(Step::Delay { duration, .. }) => {
                    self.deadline = Instant::now().checked_add(duration);
                    return Advance::Wait(duration);
                }
                Some(Step::Snapshot { text, .. }) => snapshots.push(text),
                Some(Step::PhraseComplete { index, phrase }) => {
                    trace!(index, %phrase, "phrase complete");
                    return Advance::Completed(phrase);
                }
                Some(Step::Finished) | None => {
                    self.deadline = None;
                    self.status = Status::Finished;
                    debug!("typewriter finished");
                    return Advance::Done;
                }
            }
        }
    }

    fn blink(&mut self) -> bool {
        self.cursor.update(CursorMessage::Blink);
        self.cursor.is_visible()
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        if let Some(task) = self.cursor_task.take() {
            task.abort();
        }
    }
}

async fn run_typing(weak: Weak<Shared>, generation: u64, mut wait: Option<Duration>) {
    let mut snapshots = Vec::new();
    loop {
        if let Some(duration) = wait.take() {
            time::sleep(duration).await;
        }
        let Some(shared) = weak.upgrade() else {
            return;
        };
        let next = {
            let mut surface = lock(&shared.surface);
            let next = {
                let mut inner = lock(&shared.state);
                if inner.generation != generation {
                    return;
                }
                inner.advance(&mut snapshots)
            };
            for text in snapshots.drain(..) {
                surface.render(&text);
            }
            next
        };
        match next {
            Advance::Wait(duration) => wait = Some(duration),
            Advance::Completed(phrase) => shared.phrase_completed(&phrase),
            Advance::Done => {
                shared.completed();
                return;
            }
        }
        drop(shared);
        if wait.is_none() {
            task::yield_now().await;
        }
    }
}

async fn run_cursor(weak: Weak<Shared>, generation: u64, period: Duration) {
    let mut interval = time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        interval.tick().await;
        let Some(shared) = weak.upgrade() else {
            return;
        };
        let mut surface = lock(&shared.surface);
        let visible = {
            let mut inner = lock(&shared.state);
            if inner.cursor_generation != generation {
                return;
            }
            inner.blink()
        };
        surface.set_cursor_visible(visible);
    }
}

fn lock<T: ?Sized>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn runtime() -> Result<Handle, Error> {
    Handle::try_current().map_err(|_| Error::NoRuntime)
}
