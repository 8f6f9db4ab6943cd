//! Infrastructure layer
//!
//! Everything that touches time, the terminal or the file system:
//! - The timer-driven [`typewriter`] and its output [`surface`]s
//! - TUI foundation
//! - CLI argument processing and configuration loading

pub mod cli;
pub mod config;
pub mod surface;
pub mod tui;
pub mod typewriter;
