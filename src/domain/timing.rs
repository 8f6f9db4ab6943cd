use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::Error;

/// Extra hold after a punctuation mark while typing.
pub const PUNCTUATION_PAUSE: Duration = Duration::from_millis(150);

/// Lower bound for any jittered duration.
pub const MIN_JITTERED: Duration = Duration::from_millis(1);

/// Longest accepted speed, pause or start delay.
pub const MAX_DELAY: Duration = Duration::from_secs(24 * 60 * 60);

/// How far a phrase is erased before the next one is typed.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum DeleteMode {
    /// Erase everything.
    Full,
    /// Erase down to the prefix shared with the next phrase.
    #[default]
    Smart,
}

/// Symmetric random variation applied to per-character durations.
///
/// Each field is a fraction: `0.3` means ±30 %.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Jitter {
    pub typing: f64,
    pub deleting: f64,
}

impl Default for Jitter {
    fn default() -> Self {
        Self {
            typing: 0.3,
            deleting: 0.2,
        }
    }
}

/// Timing of one sequencer. Immutable once the sequencer is built.
#[derive(Debug, Clone, PartialEq)]
pub struct TimingConfig {
    pub type_speed: Duration,
    pub delete_speed: Duration,
    pub pause_after_type: Duration,
    pub pause_after_delete: Duration,
    pub start_delay: Duration,
    pub looping: bool,
    pub delete_mode: DeleteMode,
    /// `None` types at a perfectly even pace.
    pub jitter: Option<Jitter>,
    pub punctuation_pause: bool,
    /// Erase the last phrase even when not looping.
    pub delete_last_phrase: bool,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            type_speed: Duration::from_millis(80),
            delete_speed: Duration::from_millis(50),
            pause_after_type: Duration::from_millis(1500),
            pause_after_delete: Duration::from_millis(500),
            start_delay: Duration::from_millis(500),
            looping: true,
            delete_mode: DeleteMode::Smart,
            jitter: Some(Jitter::default()),
            punctuation_pause: true,
            delete_last_phrase: false,
        }
    }
}

impl TimingConfig {
    /// Builds a config from durations given in seconds, rejecting negative,
    /// NaN and infinite values as well as anything above [`MAX_DELAY`].
    pub fn from_secs(
        type_speed: f64,
        delete_speed: f64,
        pause_after_type: f64,
        pause_after_delete: f64,
        start_delay: f64,
    ) -> Result<Self, Error> {
        Ok(Self {
            type_speed: secs("type_speed", type_speed)?,
            delete_speed: secs("delete_speed", delete_speed)?,
            pause_after_type: secs("pause_after_type", pause_after_type)?,
            pause_after_delete: secs("pause_after_delete", pause_after_delete)?,
            start_delay: secs("start_delay", start_delay)?,
            ..Self::default()
        })
    }

    pub fn validate(&self) -> Result<(), Error> {
        for (name, duration) in [
            ("type_speed", self.type_speed),
            ("delete_speed", self.delete_speed),
            ("pause_after_type", self.pause_after_type),
            ("pause_after_delete", self.pause_after_delete),
            ("start_delay", self.start_delay),
        ] {
            if duration > MAX_DELAY {
                return Err(Error::invalid_config(format!(
                    "{name} must be at most {}s, got {duration:?}",
                    MAX_DELAY.as_secs()
                )));
            }
        }
        if self.jitter.is_none() {
            if self.type_speed.is_zero() {
                return Err(Error::invalid_config(
                    "type_speed must be positive when jitter is disabled",
                ));
            }
            if self.delete_speed.is_zero() {
                return Err(Error::invalid_config(
                    "delete_speed must be positive when jitter is disabled",
                ));
            }
        }
        if let Some(jitter) = self.jitter {
            for (name, fraction) in [("typing", jitter.typing), ("deleting", jitter.deleting)] {
                if !(0.0..1.0).contains(&fraction) {
                    return Err(Error::invalid_config(format!(
                        "{name} jitter must be within [0, 1), got {fraction}"
                    )));
                }
            }
        }
        Ok(())
    }

    pub(crate) fn typing_delay(&self, rng: &mut impl Rng) -> Duration {
        match self.jitter {
            Some(jitter) => jittered(self.type_speed, jitter.typing, rng),
            None => self.type_speed,
        }
    }

    pub(crate) fn deleting_delay(&self, rng: &mut impl Rng) -> Duration {
        match self.jitter {
            Some(jitter) => jittered(self.delete_speed, jitter.deleting, rng),
            None => self.delete_speed,
        }
    }
}

/// Picks a duration uniformly within `base * (1 ± fraction)`, clamped to
/// [`MIN_JITTERED`]..=[`MAX_DELAY`].
pub fn jittered(base: Duration, fraction: f64, rng: &mut impl Rng) -> Duration {
    let base = base.as_secs_f64();
    let (min, max) = (base * (1.0 - fraction), base * (1.0 + fraction));
    let secs = if max > min { rng.gen_range(min..max) } else { base };
    Duration::try_from_secs_f64(secs)
        .unwrap_or(MAX_DELAY)
        .clamp(MIN_JITTERED, MAX_DELAY)
}

fn secs(name: &str, value: f64) -> Result<Duration, Error> {
    let duration = Duration::try_from_secs_f64(value).map_err(|_| {
        Error::invalid_config(format!("{name} must be a non-negative number, got {value}"))
    })?;
    if duration > MAX_DELAY {
        return Err(Error::invalid_config(format!(
            "{name} must be at most {}s, got {value}",
            MAX_DELAY.as_secs()
        )));
    }
    Ok(duration)
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use pretty_assertions::assert_eq;
    use rand::{rngs::StdRng, SeedableRng};
    use rstest::rstest;

    use super::*;

    #[test]
    fn test_default_matches_source_timing() {
        let config = TimingConfig::default();
        assert_eq!(config.type_speed, Duration::from_millis(80));
        assert_eq!(config.delete_speed, Duration::from_millis(50));
        assert_eq!(config.delete_mode, DeleteMode::Smart);
        assert!(config.looping);
        assert!(config.validate().is_ok());
    }

    #[rstest]
    #[case(-0.1)]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    #[case(1e20)]
    #[case(86_400.5)]
    fn test_from_secs_rejects_bad_values(#[case] value: f64) {
        let result = TimingConfig::from_secs(0.08, value, 1.5, 0.5, 0.5);
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_from_secs_accepts_zero_pauses() {
        let config = TimingConfig::from_secs(0.08, 0.04, 0.0, 0.0, 0.0).expect("valid");
        assert_eq!(config.start_delay, Duration::ZERO);
        assert_eq!(config.pause_after_type, Duration::ZERO);
    }

    #[rstest]
    #[case::type_speed(TimingConfig { type_speed: Duration::from_secs(u64::MAX), ..Default::default() })]
    #[case::pause(TimingConfig { pause_after_type: MAX_DELAY + Duration::from_millis(1), ..Default::default() })]
    #[case::start_delay(TimingConfig { start_delay: Duration::MAX, ..Default::default() })]
    fn test_validate_rejects_oversized_durations(#[case] config: TimingConfig) {
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_max_delay_is_accepted() {
        let config = TimingConfig {
            pause_after_type: MAX_DELAY,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_speed_requires_jitter() {
        let mut config = TimingConfig {
            type_speed: Duration::ZERO,
            jitter: None,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));

        config.jitter = Some(Jitter::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_jitter_fraction_out_of_range() {
        let config = TimingConfig {
            jitter: Some(Jitter {
                typing: 1.5,
                deleting: 0.2,
            }),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_jittered_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let base = Duration::from_millis(100);
        for _ in 0..1000 {
            let d = jittered(base, 0.3, &mut rng);
            assert!(d >= Duration::from_millis(69) && d <= Duration::from_millis(131));
        }
    }

    #[test]
    fn test_jittered_never_zero() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(jittered(Duration::ZERO, 0.3, &mut rng), MIN_JITTERED);
    }

    #[test]
    fn test_jittered_saturates_instead_of_panicking() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(jittered(Duration::MAX, 0.5, &mut rng), MAX_DELAY);
    }

    #[test]
    fn test_delete_mode_parsing() {
        assert_eq!(DeleteMode::from_str("smart"), Ok(DeleteMode::Smart));
        assert_eq!(DeleteMode::from_str("FULL"), Ok(DeleteMode::Full));
        assert!(DeleteMode::from_str("partial").is_err());
        assert_eq!(DeleteMode::Full.to_string(), "full");
    }
}
