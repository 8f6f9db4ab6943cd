//! Presentation layer
//!
//! This module contains UI components and widgets:
//! - Stateless components rendering `AppState`
//! - Reusable widgets
//! - Configuration (styles)

pub mod components;
pub mod config;
pub mod widgets;
