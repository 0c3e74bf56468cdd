//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Daily step goal
//! - Steps-to-screen-time conversion rate
//! - Step simulator tuning
//!
//! Configuration is stored at `~/.config/strollscroll/config.toml`.

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::{ConfigError, Result};

/// Daily goal configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalConfig {
    #[serde(default = "default_daily_goal")]
    pub daily_goal: u32,
}

/// Accepted steps-per-minute conversion rates.
pub const STEPS_PER_MINUTE_RANGE: RangeInclusive<u32> = 50..=500;

/// Steps-to-screen-time conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionConfig {
    /// Steps needed to earn one minute of screen time.
    #[serde(default = "default_steps_per_minute")]
    pub steps_per_minute: u32,
}

/// Step simulator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulatorConfig {
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    #[serde(default = "default_min_increment")]
    pub min_increment: u32,
    #[serde(default = "default_max_increment")]
    pub max_increment: u32,
    /// How far past the daily goal the simulated count may run.
    #[serde(default = "default_overshoot")]
    pub overshoot: u32,
    #[serde(default)]
    pub starting_steps: u32,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/strollscroll/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub goal: GoalConfig,
    #[serde(default)]
    pub conversion: ConversionConfig,
    #[serde(default)]
    pub simulator: SimulatorConfig,
}

fn default_daily_goal() -> u32 {
    10_000
}
fn default_steps_per_minute() -> u32 {
    100
}
fn default_interval_ms() -> u64 {
    2_000
}
fn default_min_increment() -> u32 {
    1
}
fn default_max_increment() -> u32 {
    3
}
fn default_overshoot() -> u32 {
    5_000
}

impl Default for GoalConfig {
    fn default() -> Self {
        Self {
            daily_goal: default_daily_goal(),
        }
    }
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            steps_per_minute: default_steps_per_minute(),
        }
    }
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            min_increment: default_min_increment(),
            max_increment: default_max_increment(),
            overshoot: default_overshoot(),
            starting_steps: 0,
        }
    }
}

fn invalid(key: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        message: message.into(),
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(ConfigError::UnknownKey(key.to_string()));
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current
                    .as_object_mut()
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
                let existing = obj
                    .get(part)
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|e| invalid(key, e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        let n = value
                            .parse::<u64>()
                            .map_err(|_| invalid(key, format!("cannot parse '{value}' as number")))?;
                        serde_json::Value::Number(n.into())
                    }
                    serde_json::Value::Object(_) => {
                        return Err(invalid(key, "cannot overwrite a whole section"));
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current
                .get_mut(part)
                .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        }

        Err(ConfigError::UnknownKey(key.to_string()))
    }

    fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk, writing and returning defaults if no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed or
    /// holds out-of-range values, or if the default config cannot be written.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load from an explicit path, writing defaults if the file is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be parsed, fails [`Config::validate`],
    /// or the defaults cannot be written.
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                cfg.validate()?;
                Ok(cfg)
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    /// Persist to an explicit path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key without persisting.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the resulting configuration fails validation. On error `self` is
    /// left unchanged.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json)?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Set a config value by key and persist. Returns error if key is unknown.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed
    /// or validated, or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.apply(key, value)?;
        self.save()
    }

    /// Check value ranges the rest of the crate relies on.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for the first offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.goal.daily_goal == 0 {
            return Err(invalid("goal.daily_goal", "must be greater than zero"));
        }
        if !STEPS_PER_MINUTE_RANGE.contains(&self.conversion.steps_per_minute) {
            return Err(invalid(
                "conversion.steps_per_minute",
                format!(
                    "must be between {} and {}",
                    STEPS_PER_MINUTE_RANGE.start(),
                    STEPS_PER_MINUTE_RANGE.end()
                ),
            ));
        }
        if self.simulator.min_increment > self.simulator.max_increment {
            return Err(invalid(
                "simulator.min_increment",
                "must not exceed simulator.max_increment",
            ));
        }
        Ok(())
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }
}
