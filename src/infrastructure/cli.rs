use clap::Parser;

use crate::{domain::timing::DeleteMode, utils::version};

#[derive(Parser, Debug)]
#[command(author, version = version(), about)]
pub struct Cli {
    #[arg(
        short,
        long,
        value_name = "FLOAT",
        help = "Tick rate, i.e. number of ticks per second",
        default_value_t = 4.0
    )]
    pub tick_rate: f64,

    #[arg(
        short,
        long,
        value_name = "FLOAT",
        help = "Frame rate, i.e. number of frames per second",
        default_value_t = 30.0
    )]
    pub frame_rate: f64,

    /// Phrases to type, replacing the configured list
    #[arg(value_name = "PHRASES")]
    pub phrases: Vec<String>,

    /// Type the phrases once and stop instead of looping
    #[arg(long)]
    pub once: bool,

    /// How far a phrase is erased before the next one: full or smart
    #[arg(long, value_name = "MODE")]
    pub delete_mode: Option<DeleteMode>,

    /// Seconds per typed character
    #[arg(long, value_name = "SECONDS")]
    pub type_speed: Option<f64>,

    /// Seconds per deleted character
    #[arg(long, value_name = "SECONDS")]
    pub delete_speed: Option<f64>,

    /// Seconds to hold a finished phrase
    #[arg(long, value_name = "SECONDS")]
    pub pause_after_type: Option<f64>,

    /// Seconds to wait after deleting, before the next phrase
    #[arg(long, value_name = "SECONDS")]
    pub pause_after_delete: Option<f64>,

    /// Seconds before the first character
    #[arg(long, value_name = "SECONDS")]
    pub start_delay: Option<f64>,

    /// Type at a perfectly even pace
    #[arg(long)]
    pub no_jitter: bool,

    /// Hide the blinking cursor
    #[arg(long)]
    pub no_cursor: bool,

    /// Print snapshots instead of drawing a terminal UI
    #[arg(long, requires = "once")]
    pub headless: bool,
}
