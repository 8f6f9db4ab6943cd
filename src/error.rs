use thiserror::Error;

/// Errors surfaced by the sequencer and the typewriter driver.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The phrase list or timing configuration cannot be played.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A control method was called after `destroy()`.
    #[error("typewriter has been destroyed")]
    InstanceDestroyed,

    /// Timers can only be scheduled from inside a tokio runtime.
    #[error("no tokio runtime available to schedule timers")]
    NoRuntime,
}

impl Error {
    pub(crate) fn invalid_config(message: impl Into<String>) -> Self {
        Error::InvalidConfig(message.into())
    }
}
