//! TOML-based application configuration.
//!
//! Stores the feedback cue flags, the ready pre-roll length, and the
//! debug-mode switch at `~/.config/hiit/config.toml`. The engine never
//! reads this file itself; it consumes a [`FeedbackSettings`] snapshot
//! taken at phase entry.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ConfigError;

/// Ready pre-roll length in seconds.
pub const DEFAULT_READY_SECS: u32 = 3;

/// The four independent cue gates consumed by the feedback dispatcher.
///
/// Rest and completion cues share one pair of flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackSettings {
    #[serde(default)]
    pub sound_effort: bool,
    #[serde(default = "default_true")]
    pub haptic_effort: bool,
    #[serde(default)]
    pub sound_rest: bool,
    #[serde(default = "default_true")]
    pub haptic_rest: bool,
}

fn default_true() -> bool {
    true
}

impl Default for FeedbackSettings {
    fn default() -> Self {
        Self {
            sound_effort: false,
            haptic_effort: true,
            sound_rest: false,
            haptic_rest: true,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_ready_secs")]
    pub ready_secs: u32,
    #[serde(default)]
    pub debug_mode: bool,
    #[serde(default)]
    pub feedback: FeedbackSettings,
}

fn default_ready_secs() -> u32 {
    DEFAULT_READY_SECS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ready_secs: DEFAULT_READY_SECS,
            debug_mode: false,
            feedback: FeedbackSettings::default(),
        }
    }
}

impl Config {
    fn path() -> Result<PathBuf, ConfigError> {
        let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(dir.join("hiit").join("config.toml"))
    }

    /// Load from disk; a missing file yields the defaults, written back.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    fn load_from(path: &PathBuf) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path: path.clone(),
                message: e.to_string(),
            }),
            Err(_) => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    fn save_to(&self, path: &PathBuf) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.clone(),
            message,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| save_failed(e.to_string()))?;
        }
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    /// Load from disk, returning defaults on any error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// All known keys with their current values, for `config list`.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ready_secs", self.ready_secs.to_string()),
            ("debug_mode", self.debug_mode.to_string()),
            ("feedback.sound_effort", self.feedback.sound_effort.to_string()),
            ("feedback.haptic_effort", self.feedback.haptic_effort.to_string()),
            ("feedback.sound_rest", self.feedback.sound_rest.to_string()),
            ("feedback.haptic_rest", self.feedback.haptic_rest.to_string()),
        ]
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.entries()
            .into_iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v)
    }

    /// Set a value by key. Unknown keys and unparseable values error; the
    /// caller persists with [`Config::save`].
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = |message: &str| ConfigError::InvalidValue {
            key: key.to_string(),
            message: message.to_string(),
        };
        match key {
            "ready_secs" => {
                self.ready_secs = value.parse().map_err(|_| invalid("expected an integer"))?
            }
            "debug_mode" => {
                self.debug_mode = value.parse().map_err(|_| invalid("expected true or false"))?
            }
            "feedback.sound_effort" => {
                self.feedback.sound_effort =
                    value.parse().map_err(|_| invalid("expected true or false"))?
            }
            "feedback.haptic_effort" => {
                self.feedback.haptic_effort =
                    value.parse().map_err(|_| invalid("expected true or false"))?
            }
            "feedback.sound_rest" => {
                self.feedback.sound_rest =
                    value.parse().map_err(|_| invalid("expected true or false"))?
            }
            "feedback.haptic_rest" => {
                self.feedback.haptic_rest =
                    value.parse().map_err(|_| invalid("expected true or false"))?
            }
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }
}
