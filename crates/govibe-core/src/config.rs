//! TOML-based application configuration.
//!
//! Stores:
//! - Backend base URL and request timeout
//! - Countdown durations and challenge target
//! - Pose-tracking widget settings
//! - The password policy enforced by the account forms
//!
//! Configuration is stored at `~/.config/govibe/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::validation::PasswordPolicy;

/// Overrides the configuration directory.
pub const CONFIG_DIR_ENV: &str = "GOVIBE_CONFIG_DIR";
/// Overrides `api.base_url` for requests; never written to the file.
pub const API_URL_ENV: &str = "GOVIBE_API_URL";

/// Returns `~/.config/govibe[-dev]/` based on GOVIBE_ENV, or the
/// directory named by GOVIBE_CONFIG_DIR.
///
/// # Errors
/// Returns an error if the home directory cannot be determined or if
/// creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os(CONFIG_DIR_ENV) {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?.join(".config");
            let env = std::env::var("GOVIBE_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("govibe-dev")
            } else {
                base_dir.join("govibe")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::SaveFailed {
        path: dir.clone(),
        message: e.to_string(),
    })?;
    Ok(dir)
}

/// Backend connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Countdown lengths, in ticks of `tick_ms` milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountdownConfig {
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    #[serde(default = "default_exercise_duration")]
    pub exercise_duration_secs: u32,
    #[serde(default = "default_challenge_duration")]
    pub challenge_duration_secs: u32,
    #[serde(default = "default_challenge_target")]
    pub challenge_target_repetitions: u32,
}

/// Hosted pose-tracking widget.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoseTrackerConfig {
    #[serde(default = "default_pose_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub token: String,
    #[serde(default = "default_widget_size")]
    pub width: u32,
    #[serde(default = "default_widget_size")]
    pub height: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationConfig {
    #[serde(default)]
    pub password_policy: PasswordPolicy,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/govibe/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub countdown: CountdownConfig,
    #[serde(default)]
    pub pose_tracker: PoseTrackerConfig,
    #[serde(default)]
    pub validation: ValidationConfig,
}

fn default_base_url() -> String {
    "http://localhost:3000".into()
}
fn default_timeout_secs() -> u64 {
    10
}
fn default_tick_ms() -> u64 {
    1000
}
fn default_exercise_duration() -> u32 {
    10
}
fn default_challenge_duration() -> u32 {
    30
}
fn default_challenge_target() -> u32 {
    10
}
fn default_pose_base_url() -> String {
    "https://app.posetracker.com/pose_tracker/tracking".into()
}
fn default_widget_size() -> u32 {
    350
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for CountdownConfig {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
            exercise_duration_secs: default_exercise_duration(),
            challenge_duration_secs: default_challenge_duration(),
            challenge_target_repetitions: default_challenge_target(),
        }
    }
}

impl Default for PoseTrackerConfig {
    fn default() -> Self {
        Self {
            base_url: default_pose_base_url(),
            token: String::new(),
            width: default_widget_size(),
            height: default_widget_size(),
        }
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
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        let n = value
                            .parse::<u64>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?;
                        serde_json::Value::Number(n.into())
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        return Err(invalid("not a leaf key".into()));
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or create the default file.
    ///
    /// The returned value mirrors the file. Environment overrides are only
    /// applied by [`Config::effective_api`], so saving never persists them.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        let cfg = match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str::<Config>(&content).map_err(|e| ConfigError::LoadFailed {
                path: path.clone(),
                message: e.to_string(),
            })?,
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                cfg
            }
        };
        cfg.check()?;
        Ok(cfg)
    }

    /// Backend settings with `GOVIBE_API_URL` applied over `api.base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the override is not a valid URL.
    pub fn effective_api(&self) -> Result<ApiConfig, ConfigError> {
        let mut api = self.api.clone();
        match std::env::var(API_URL_ENV) {
            Ok(url) if !url.is_empty() => {
                url::Url::parse(&url).map_err(|e| ConfigError::InvalidValue {
                    key: API_URL_ENV.into(),
                    message: e.to_string(),
                })?;
                api.base_url = url;
            }
            _ => {}
        }
        Ok(api)
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }

    /// Reject values the rest of the library cannot work with.
    pub fn check(&self) -> Result<(), ConfigError> {
        url::Url::parse(&self.api.base_url).map_err(|e| ConfigError::InvalidValue {
            key: "api.base_url".into(),
            message: e.to_string(),
        })?;
        for (key, value) in [
            ("api.timeout_secs", self.api.timeout_secs),
            ("countdown.tick_ms", self.countdown.tick_ms),
            (
                "countdown.exercise_duration_secs",
                self.countdown.exercise_duration_secs as u64,
            ),
            (
                "countdown.challenge_duration_secs",
                self.countdown.challenge_duration_secs as u64,
            ),
            (
                "countdown.challenge_target_repetitions",
                self.countdown.challenge_target_repetitions as u64,
            ),
        ] {
            if value == 0 {
                return Err(ConfigError::InvalidValue {
                    key: key.into(),
                    message: "must be greater than zero".into(),
                });
            }
        }
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

    /// Set a config value by key without persisting it.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not fit
    /// the field's type.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json =
            serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.check()?;
        *self = updated;
        Ok(())
    }

    /// Set a config value by key and save.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.apply(key, value)?;
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.api.base_url, "http://localhost:3000");
        assert_eq!(parsed.countdown.challenge_target_repetitions, 10);
        assert_eq!(parsed.validation.password_policy, PasswordPolicy::Strict);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let parsed: Config = toml::from_str(
            r#"
            [api]
            base_url = "https://api.govibe.test"
            "#,
        )
        .unwrap();
        assert_eq!(parsed.api.base_url, "https://api.govibe.test");
        assert_eq!(parsed.api.timeout_secs, 10);
        assert_eq!(parsed.pose_tracker.width, 350);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("countdown.tick_ms").as_deref(), Some("1000"));
        assert_eq!(cfg.get("validation.password_policy").as_deref(), Some("strict"));
        assert!(cfg.get("api.missing_key").is_none());
    }

    #[test]
    fn apply_updates_typed_values() {
        let mut cfg = Config::default();
        cfg.apply("countdown.exercise_duration_secs", "30").unwrap();
        cfg.apply("validation.password_policy", "lenient").unwrap();
        cfg.apply("api.base_url", "https://api.example.org").unwrap();
        assert_eq!(cfg.countdown.exercise_duration_secs, 30);
        assert_eq!(cfg.validation.password_policy, PasswordPolicy::Lenient);
        assert_eq!(cfg.api.base_url, "https://api.example.org");
    }

    #[test]
    fn apply_rejects_unknown_key() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.apply("api.nonexistent", "x"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(matches!(cfg.apply("", "x"), Err(ConfigError::UnknownKey(_))));
    }

    #[test]
    fn apply_rejects_bad_values() {
        let mut cfg = Config::default();
        assert!(cfg.apply("countdown.tick_ms", "fast").is_err());
        assert!(cfg.apply("countdown.tick_ms", "0").is_err());
        assert!(cfg.apply("validation.password_policy", "medium").is_err());
        assert!(cfg.apply("api.base_url", "not a url").is_err());
        assert!(cfg.apply("api", "x").is_err());
        assert!(cfg.apply("api.timeout_secs", "0").is_err());
        assert!(cfg.apply("countdown.challenge_target_repetitions", "0").is_err());
        assert_eq!(cfg.countdown.challenge_target_repetitions, 10);
        assert_eq!(cfg.countdown.tick_ms, 1000);
    }
}
