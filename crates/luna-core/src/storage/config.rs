//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Cycle rule day counts (minimum gap, safety limit)
//! - Insight provider settings (remote generation toggle, model, endpoint)
//! - Profile display name
//!
//! Configuration is stored at `~/.config/luna/config.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::error::ConfigError;
use crate::phase::CycleRules;

/// Cycle rule configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleConfig {
    #[serde(default = "default_min_cycle_gap")]
    pub min_cycle_gap_days: u32,
    #[serde(default = "default_safety_period_limit")]
    pub safety_period_limit_days: u32,
    /// Shown next to the phase; not used for inference.
    #[serde(default = "default_cycle_length")]
    pub default_cycle_length: u32,
}

/// Insight provider configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsightsConfig {
    #[serde(default)]
    pub ai_enabled: bool,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Name of the environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Profile configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileConfig {
    #[serde(default = "default_display_name")]
    pub display_name: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/luna/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub cycle: CycleConfig,
    #[serde(default)]
    pub insights: InsightsConfig,
    #[serde(default)]
    pub profile: ProfileConfig,
}

// Default functions
fn default_min_cycle_gap() -> u32 {
    15
}
fn default_safety_period_limit() -> u32 {
    10
}
fn default_cycle_length() -> u32 {
    28
}
fn default_model() -> String {
    "gemini-3-flash-preview".into()
}
fn default_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta".into()
}
fn default_api_key_env() -> String {
    "GEMINI_API_KEY".into()
}
fn default_timeout_secs() -> u64 {
    10
}
fn default_display_name() -> String {
    "dear".into()
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            min_cycle_gap_days: default_min_cycle_gap(),
            safety_period_limit_days: default_safety_period_limit(),
            default_cycle_length: default_cycle_length(),
        }
    }
}

impl Default for InsightsConfig {
    fn default() -> Self {
        Self {
            ai_enabled: false,
            model: default_model(),
            endpoint: default_endpoint(),
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            display_name: default_display_name(),
        }
    }
}

impl CycleConfig {
    pub fn rules(&self) -> CycleRules {
        CycleRules {
            min_cycle_gap_days: i64::from(self.min_cycle_gap_days),
            safety_period_limit_days: i64::from(self.safety_period_limit_days),
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

        let (parents, leaf) = match key.rsplit_once('.') {
            Some((parents, leaf)) => (Some(parents), leaf),
            None => (None, key),
        };
        if leaf.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        for part in parents.into_iter().flat_map(|p| p.split('.')) {
            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        let obj = current.as_object_mut().ok_or_else(unknown)?;
        let existing = obj.get(leaf).ok_or_else(unknown)?;

        let new_value = match existing {
            serde_json::Value::Bool(_) => serde_json::Value::Bool(
                value
                    .parse::<bool>()
                    .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
            ),
            serde_json::Value::Number(_) => serde_json::Value::Number(
                value
                    .parse::<u64>()
                    .map_err(|_| invalid(format!("cannot parse '{value}' as a whole number")))?
                    .into(),
            ),
            serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                return Err(invalid("only leaf values can be set".into()));
            }
            _ => serde_json::Value::String(value.into()),
        };

        obj.insert(leaf.to_string(), new_value);
        Ok(())
    }

    /// Reject values the engine cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cycle.min_cycle_gap_days == 0 {
            return Err(ConfigError::InvalidValue {
                key: "cycle.min_cycle_gap_days".into(),
                message: "must be at least 1".into(),
            });
        }
        if self.cycle.safety_period_limit_days == 0 {
            return Err(ConfigError::InvalidValue {
                key: "cycle.safety_period_limit_days".into(),
                message: "must be at least 1".into(),
            });
        }
        if self.insights.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "insights.timeout_secs".into(),
                message: "must be at least 1".into(),
            });
        }
        Ok(())
    }

    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the data directory, writing defaults if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from an explicit path, writing defaults if absent.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config =
                    toml::from_str(&content).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
                cfg.validate()?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to the data directory.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
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

    /// Set a config value by dot-separated key without saving.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not parse
    /// or fails validation. On error `self` is unchanged.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json =
            serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config =
            serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Set a config value by key and save.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.apply(key, value)?;
        self.save()
    }

    pub fn rules(&self) -> CycleRules {
        self.cycle.rules()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_match_engine_defaults() {
        assert_eq!(Config::default().rules(), CycleRules::default());
    }

    #[test]
    fn missing_file_writes_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg, Config::default());
        assert!(path.exists());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[cycle]\nsafety_period_limit_days = 7\n").unwrap();
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.cycle.safety_period_limit_days, 7);
        assert_eq!(cfg.cycle.min_cycle_gap_days, 15);
        assert!(!cfg.insights.ai_enabled);
    }

    #[test]
    fn unparseable_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[cycle\n").unwrap();
        assert!(matches!(Config::load_from(&path), Err(ConfigError::ParseFailed(_))));
    }

    #[test]
    fn get_by_dotted_key() {
        let cfg = Config::default();
        assert_eq!(cfg.get("cycle.min_cycle_gap_days").as_deref(), Some("15"));
        assert_eq!(cfg.get("insights.model").as_deref(), Some("gemini-3-flash-preview"));
        assert_eq!(cfg.get("insights.nope"), None);
    }

    #[test]
    fn apply_type_checks_values() {
        let mut cfg = Config::default();
        cfg.apply("insights.ai_enabled", "true").unwrap();
        assert!(cfg.insights.ai_enabled);
        cfg.apply("cycle.safety_period_limit_days", "8").unwrap();
        assert_eq!(cfg.rules().safety_period_limit_days, 8);

        assert!(matches!(
            cfg.apply("insights.ai_enabled", "maybe"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(cfg.apply("cycle.bogus", "1"), Err(ConfigError::UnknownKey(_))));
        assert!(matches!(cfg.apply("cycle", "1"), Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn apply_rejects_zero_rules_and_keeps_old_value() {
        let mut cfg = Config::default();
        assert!(cfg.apply("cycle.min_cycle_gap_days", "0").is_err());
        assert_eq!(cfg.cycle.min_cycle_gap_days, 15);
    }

    #[test]
    fn save_and_reload_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let mut cfg = Config::default();
        cfg.apply("profile.display_name", "Yue").unwrap();
        cfg.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap().profile.display_name, "Yue");
    }
}
