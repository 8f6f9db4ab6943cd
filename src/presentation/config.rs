//! UI configuration
//!
//! This module contains configuration for UI appearance.

pub mod styles;

pub use styles::Styles;
