//! # Typist - typing animations for the terminal
//!
//! Types a list of phrases character by character, holds each one, erases it
//! and moves on to the next, with a blinking cursor at the end of the line.
//!
//! ## Architecture Overview
//!
//! - **Domain** (`domain`): the clock-free [`Sequencer`] producing animation steps
//! - **Driver** (`infrastructure::typewriter`): the tokio [`Typewriter`] that
//!   waits out each step and hands snapshots to a [`Surface`]
//! - **Elm core** (`core`): state, messages, `update` and commands for the TUI
//! - **View** (`presentation`): ratatui components rendering the state
//!
//! ## Example Usage
//!
//! ```rust
//! use typist::{Sequencer, Step, TimingConfig};
//!
//! let timing = TimingConfig {
//!     jitter: None,
//!     ..TimingConfig::default()
//! };
//! let sequencer = Sequencer::once("Hi", timing).unwrap();
//!
//! let snapshots: Vec<String> = sequencer
//!     .filter_map(|step| match step {
//!         Step::Snapshot { text, .. } => Some(text),
//!         _ => None,
//!     })
//!     .collect();
//! assert_eq!(snapshots.last().map(String::as_str), Some("Hi"));
//! ```
//!
//! ## Modules
//!
//! - [`domain`] - Phrases, timing, sequencer and cursor blink state
//! - [`infrastructure`] - Typewriter driver, surfaces, TUI, CLI and config
//! - [`core`] - Elm architecture for the terminal front end
//! - [`integration`] - App runner and headless runner
//! - [`presentation`] - Components and widgets

pub mod core;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod integration;
pub mod presentation;
pub mod utils;

// Re-exports for convenience
pub use domain::{
    cursor::CursorConfig,
    phrase::Phrase,
    sequencer::{Mode, PlaybackState, Sequencer, Step},
    timing::{DeleteMode, Jitter, TimingConfig},
};
pub use error::Error;
pub use infrastructure::{
    surface::Surface,
    typewriter::{PlaybackReport, Status, Typewriter},
};

/// Result type used throughout the library
pub type Result<T> = color_eyre::eyre::Result<T>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
