//! Reusable UI widgets

pub mod status_bar;
pub mod typing_line;
