use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::timing::MAX_DELAY;

pub enum Message {
    Blink,
    Show,
    Hide,
}

/// Cursor appearance and blink period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CursorConfig {
    pub enabled: bool,
    #[serde(rename = "char")]
    pub glyph: String,
    #[serde(with = "secs")]
    pub blink_interval: Duration,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            glyph: "|".to_owned(),
            blink_interval: Duration::from_millis(500),
        }
    }
}

impl CursorConfig {
    /// The blink period, or `None` when it is zero or above [`MAX_DELAY`]
    /// and cannot drive a timer.
    pub fn blink_period(&self) -> Option<Duration> {
        Some(self.blink_interval).filter(|period| !period.is_zero() && *period <= MAX_DELAY)
    }
}

/// Blink state of the cursor glyph.
///
/// Lives independently of the typing schedule: pausing the typing does not
/// stop the blinking.
#[derive(Debug, Clone, PartialEq)]
pub struct Cursor {
    visible: bool,
    toggles: u64,
}

impl Cursor {
    pub fn new() -> Self {
        Self {
            visible: true,
            toggles: 0,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn toggles(&self) -> u64 {
        self.toggles
    }

    pub fn update(&mut self, message: Message) {
        match message {
            Message::Blink => {
                self.visible = !self.visible;
                self.toggles += 1;
            }
            Message::Show => self.visible = true,
            Message::Hide => self.visible = false,
        }
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new()
    }
}

/// Serializes a blink period as fractional seconds.
pub(crate) mod secs {
    use std::time::Duration;

    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    use crate::domain::timing::MAX_DELAY;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(value.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let value = f64::deserialize(deserializer)?;
        let period = Duration::try_from_secs_f64(value).map_err(D::Error::custom)?;
        if period.is_zero() || period > MAX_DELAY {
            return Err(D::Error::custom(format!(
                "blink_interval must be within (0, {}] seconds, got {value}",
                MAX_DELAY.as_secs()
            )));
        }
        Ok(period)
    }
}
