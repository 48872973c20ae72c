use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use serde_json::Error as SerdeError;
use tracing::{debug, warn};

const APP_QUALIFIER: &str = "com";
const APP_ORG: &str = "SwiftTrack";
const APP_NAME: &str = "SwiftTrackTracker";

pub const ENV_API_URL: &str = "SWIFTTRACK_API_URL";
pub const ENV_LOOKUP_TIMEOUT: &str = "SWIFTTRACK_LOOKUP_TIMEOUT_SECS";

/// Upper bound on a single lookup before it is reported as an outage.
pub const DEFAULT_LOOKUP_TIMEOUT_SECS: u64 = 15;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Tracking API root; demo shipments are served when unset.
    pub api_base_url: Option<String>,
    pub lookup_timeout_secs: u64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            api_base_url: None,
            lookup_timeout_secs: DEFAULT_LOOKUP_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] SerdeError),
    #[error("invalid lookup timeout {0:?}; expected a positive number of seconds")]
    InvalidTimeout(String),
}

impl TrackerConfig {
    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_secs(self.lookup_timeout_secs)
    }

    /// Config file first, then environment overrides. Problems are logged and
    /// the affected values fall back to defaults.
    pub fn load() -> Self {
        let mut config = match config_file() {
            Some(path) => match Self::from_file(&path) {
                Ok(Some(config)) => {
                    debug!(path = %path.display(), "loaded tracker config");
                    config
                }
                Ok(None) => Self::default(),
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "ignoring unreadable config");
                    Self::default()
                }
            },
            None => Self::default(),
        };

        if let Err(err) = config.apply_env(|key| std::env::var(key).ok()) {
            warn!(error = %err, "ignoring invalid environment override");
        }
        config
    }

    /// `Ok(None)` when the file does not exist.
    pub fn from_file(path: &Path) -> Result<Option<Self>, ConfigError> {
        let data = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        Self::from_json(&data).map(Some)
    }

    pub fn from_json(data: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(data)?;
        if config.lookup_timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout("0".to_string()));
        }
        Ok(config.normalized())
    }

    pub fn apply_env<F>(&mut self, var: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = var(ENV_API_URL) {
            self.api_base_url = Some(url);
        }
        if let Some(raw) = var(ENV_LOOKUP_TIMEOUT) {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => self.lookup_timeout_secs = secs,
                _ => return Err(ConfigError::InvalidTimeout(raw)),
            }
        }
        *self = std::mem::take(self).normalized();
        Ok(())
    }

    fn normalized(mut self) -> Self {
        self.api_base_url = self
            .api_base_url
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());
        self
    }
}

fn config_file() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.config_dir().join("config.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn missing_fields_take_defaults() {
        let config = TrackerConfig::from_json("{}").unwrap();
        assert_eq!(config, TrackerConfig::default());
        assert_eq!(config.lookup_timeout(), Duration::from_secs(15));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = TrackerConfig::from_json(r#"{ "lookup_timeout_secs": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTimeout(_)));
    }

    #[test]
    fn blank_base_url_means_demo_mode() {
        let config = TrackerConfig::from_json(r#"{ "api_base_url": "  " }"#).unwrap();
        assert_eq!(config.api_base_url, None);
    }

    #[test]
    fn environment_overrides_file_values() {
        let mut config = TrackerConfig::from_json(
            r#"{ "api_base_url": "https://file.example", "lookup_timeout_secs": 30 }"#,
        )
        .unwrap();
        config
            .apply_env(env(&[
                (ENV_API_URL, " https://env.example/api "),
                (ENV_LOOKUP_TIMEOUT, "5"),
            ]))
            .unwrap();

        assert_eq!(config.api_base_url.as_deref(), Some("https://env.example/api"));
        assert_eq!(config.lookup_timeout_secs, 5);
    }

    #[test]
    fn invalid_timeout_override_keeps_previous_value() {
        let mut config = TrackerConfig::default();
        let err = config
            .apply_env(env(&[(ENV_LOOKUP_TIMEOUT, "soon")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTimeout(raw) if raw == "soon"));
        assert_eq!(config.lookup_timeout_secs, DEFAULT_LOOKUP_TIMEOUT_SECS);
    }

    #[test]
    fn absent_file_is_not_an_error() {
        let path = std::env::temp_dir().join("swifttrack-missing-config.json");
        assert!(TrackerConfig::from_file(&path).unwrap().is_none());
    }
}
