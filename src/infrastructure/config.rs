use std::path::{Path, PathBuf};

use config::{ConfigError, FileFormat};
use serde::Deserialize;

use crate::{
    domain::{
        cursor::CursorConfig,
        timing::{DeleteMode, Jitter, TimingConfig},
    },
    error::Error,
    infrastructure::cli::Cli,
    presentation::config::Styles,
    utils,
};

const CONFIG: &str = include_str!("../../.config/config.json5");

const CONFIG_FILES: [(&str, FileFormat); 5] = [
    ("config.json5", FileFormat::Json5),
    ("config.json", FileFormat::Json),
    ("config.yaml", FileFormat::Yaml),
    ("config.toml", FileFormat::Toml),
    ("config.ini", FileFormat::Ini),
];

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub _data_dir: PathBuf,
    #[serde(default)]
    pub _config_dir: PathBuf,
}

/// The `typing` section. Durations are in seconds.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct TypingSettings {
    pub type_speed: f64,
    pub delete_speed: f64,
    pub pause_after_type: f64,
    pub pause_after_delete: f64,
    pub start_delay: f64,
    #[serde(rename = "loop")]
    pub looping: bool,
    pub delete_mode: DeleteMode,
    /// Randomize per-character durations.
    pub natural_typing: bool,
    pub punctuation_pause: bool,
}

impl Default for TypingSettings {
    fn default() -> Self {
        Self {
            type_speed: 0.08,
            delete_speed: 0.05,
            pause_after_type: 1.5,
            pause_after_delete: 0.5,
            start_delay: 0.5,
            looping: true,
            delete_mode: DeleteMode::Smart,
            natural_typing: true,
            punctuation_pause: true,
        }
    }
}

impl TypingSettings {
    pub fn timing(&self) -> Result<TimingConfig, Error> {
        let timing = TimingConfig {
            looping: self.looping,
            delete_mode: self.delete_mode,
            jitter: self.natural_typing.then(Jitter::default),
            punctuation_pause: self.punctuation_pause,
            ..TimingConfig::from_secs(
                self.type_speed,
                self.delete_speed,
                self.pause_after_type,
                self.pause_after_delete,
                self.start_delay,
            )?
        };
        timing.validate()?;
        Ok(timing)
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default, flatten)]
    pub config: AppConfig,
    #[serde(default)]
    pub headline: String,
    #[serde(default)]
    pub phrases: Vec<String>,
    #[serde(default)]
    pub typing: TypingSettings,
    #[serde(default)]
    pub cursor: CursorConfig,
    #[serde(default)]
    pub styles: Styles,
}

impl Config {
    /// Loads the embedded defaults, then any user file in the config directory.
    pub fn new() -> Result<Self, ConfigError> {
        Self::load(&utils::get_config_dir(), &utils::get_data_dir())
    }

    pub fn load(config_dir: &Path, data_dir: &Path) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(CONFIG, FileFormat::Json5))
            .set_default("_data_dir", data_dir.to_string_lossy().into_owned())?
            .set_default("_config_dir", config_dir.to_string_lossy().into_owned())?;

        let mut found_config = false;
        for (file, format) in &CONFIG_FILES {
            let path = config_dir.join(file);
            found_config |= path.exists();
            builder = builder.add_source(config::File::from(path).format(*format).required(false));
        }
        if !found_config {
            log::info!(
                "No configuration file found in {}, using defaults",
                config_dir.display()
            );
        }

        builder.build()?.try_deserialize()
    }

    /// Lets command-line flags win over file values.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if !cli.phrases.is_empty() {
            self.phrases.clone_from(&cli.phrases);
        }
        if cli.once {
            self.typing.looping = false;
        }
        if let Some(delete_mode) = cli.delete_mode {
            self.typing.delete_mode = delete_mode;
        }
        let overrides = [
            (cli.type_speed, &mut self.typing.type_speed),
            (cli.delete_speed, &mut self.typing.delete_speed),
            (cli.pause_after_type, &mut self.typing.pause_after_type),
            (cli.pause_after_delete, &mut self.typing.pause_after_delete),
            (cli.start_delay, &mut self.typing.start_delay),
        ];
        for (value, target) in overrides {
            if let Some(value) = value {
                *target = value;
            }
        }
        if cli.no_jitter {
            self.typing.natural_typing = false;
        }
        if cli.no_cursor {
            self.cursor.enabled = false;
        }
    }

    pub fn timing(&self) -> Result<TimingConfig, Error> {
        self.typing.timing()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::time::Duration;

    use clap::Parser;
    use pretty_assertions::assert_eq;

    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("typist-config-{name}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).expect("create scratch dir");
        dir
    }

    #[test]
    fn test_embedded_defaults_without_user_file() {
        let dir = scratch_dir("defaults");
        let config = Config::load(&dir, &dir).expect("defaults load");

        assert_eq!(config.headline, "Frontend");
        assert_eq!(config.phrases.len(), 4);
        assert_eq!(config.typing.type_speed, 0.08);
        assert_eq!(config.typing.delete_speed, 0.04);
        assert_eq!(config.typing.start_delay, 0.8);
        assert!(config.cursor.enabled);
        assert_eq!(config.cursor.glyph, "|");
        assert_eq!(config.config._config_dir, dir);

        let timing = config.timing().expect("valid timing");
        assert_eq!(timing.pause_after_type, Duration::from_millis(2500));
        assert!(timing.looping);
        assert!(timing.jitter.is_some());
    }

    #[test]
    fn test_user_file_overrides_defaults() {
        let dir = scratch_dir("user");
        fs::write(
            dir.join("config.json5"),
            r#"{ phrases: ["Hi", "Hey"], typing: { loop: false, delete_mode: "full" }, cursor: { char: "_" } }"#,
        )
        .expect("write user config");

        let config = Config::load(&dir, &dir).expect("user config loads");

        assert_eq!(config.phrases, vec!["Hi", "Hey"]);
        assert!(!config.typing.looping);
        assert_eq!(config.typing.delete_mode, DeleteMode::Full);
        // Untouched keys keep their defaults
        assert_eq!(config.typing.type_speed, 0.08);
        assert_eq!(config.cursor.glyph, "_");
        assert!(config.cursor.enabled);
    }

    #[test]
    fn test_cli_overrides_config() {
        let dir = scratch_dir("cli");
        let mut config = Config::load(&dir, &dir).expect("defaults load");
        let cli = Cli::try_parse_from([
            "typist",
            "--once",
            "--no-jitter",
            "--no-cursor",
            "--start-delay",
            "0",
            "OK",
        ])
        .expect("valid args");

        config.apply_cli(&cli);

        assert_eq!(config.phrases, vec!["OK"]);
        assert!(!config.cursor.enabled);
        let timing = config.timing().expect("valid timing");
        assert!(!timing.looping);
        assert_eq!(timing.jitter, None);
        assert_eq!(timing.start_delay, Duration::ZERO);
    }

    #[test]
    fn test_negative_duration_is_rejected() {
        let settings = TypingSettings {
            delete_speed: -1.0,
            ..TypingSettings::default()
        };
        assert!(matches!(settings.timing(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_oversized_cli_pause_is_rejected() {
        let dir = scratch_dir("oversized");
        let mut config = Config::load(&dir, &dir).expect("defaults load");
        let cli = Cli::try_parse_from(["typist", "--pause-after-type", "1e300", "OK"])
            .expect("valid args");

        config.apply_cli(&cli);

        assert!(matches!(config.timing(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_zero_blink_interval_fails_to_load() {
        let dir = scratch_dir("blink");
        fs::write(dir.join("config.json5"), r#"{ cursor: { blink_interval: 0 } }"#)
            .expect("write user config");

        assert!(Config::load(&dir, &dir).is_err());
    }
}
