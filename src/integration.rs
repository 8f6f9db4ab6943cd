//! Runners that wire the typewriter to an output
//!
//! - [`app_runner`]: the terminal UI event loop
//! - [`elm_integration`]: message queues and the update cycle
//! - [`headless`]: plain line output without a UI

pub mod app_runner;
pub mod elm_integration;
pub mod headless;
