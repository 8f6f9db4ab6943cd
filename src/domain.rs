//! Domain logic
//!
//! This module contains the clock-free parts of the animation:
//! - Phrases split into grapheme clusters
//! - Timing configuration and jitter
//! - The typing sequencer state machine
//! - Cursor blink state

pub mod cursor;
pub mod phrase;
pub mod sequencer;
pub mod timing;
