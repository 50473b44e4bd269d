//! Runtime configuration loaded from environment variables.
//!
//! # Invariants
//! - Every key has a default; a missing key is logged, never fatal.
//! - A present but malformed value is an error, never silently replaced.

use crate::logging::{default_log_level, normalize_level};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::time::Duration;

pub const ENDPOINT_KEY: &str = "RECIPEBOOK_ENDPOINT";
pub const DATA_DIR_KEY: &str = "RECIPEBOOK_DATA_DIR";
pub const LOG_LEVEL_KEY: &str = "RECIPEBOOK_LOG_LEVEL";
pub const TIMEOUT_KEY: &str = "RECIPEBOOK_TIMEOUT_SECS";

const DEFAULT_ENDPOINT: &str = "http://localhost:4000/";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DATABASE_FILE_NAME: &str = "recipebook.sqlite3";
const LOG_DIR_NAME: &str = "logs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Invalid { key: &'static str, value: String, reason: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Invalid { key, value, reason } => {
                write!(f, "invalid {key} value `{value}`: {reason}")
            }
        }
    }
}

impl Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// GraphQL endpoint URL.
    pub endpoint: String,
    /// Absolute directory holding the storage database and logs.
    pub data_dir: PathBuf,
    pub log_level: String,
    pub request_timeout: Duration,
}

impl ClientConfig {
    /// Loads configuration from the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let endpoint = value_or_default(&lookup, ENDPOINT_KEY, DEFAULT_ENDPOINT);
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                key: ENDPOINT_KEY,
                value: endpoint,
                reason: "expected an http(s) URL".to_string(),
            });
        }

        let data_dir = match lookup(DATA_DIR_KEY).map(|value| value.trim().to_string()) {
            Some(value) if !value.is_empty() => {
                let path = PathBuf::from(&value);
                if !path.is_absolute() {
                    return Err(ConfigError::Invalid {
                        key: DATA_DIR_KEY,
                        value,
                        reason: "expected an absolute path".to_string(),
                    });
                }
                path
            }
            _ => {
                let path = std::env::temp_dir().join("recipebook");
                info!(
                    "event=config_default module=config key={DATA_DIR_KEY} value={}",
                    path.display()
                );
                path
            }
        };

        let level_text = value_or_default(&lookup, LOG_LEVEL_KEY, default_log_level());
        let log_level = normalize_level(&level_text)
            .map_err(|err| ConfigError::Invalid {
                key: LOG_LEVEL_KEY,
                value: level_text.clone(),
                reason: err.to_string(),
            })?
            .to_string();

        let timeout_text = value_or_default(&lookup, TIMEOUT_KEY, &DEFAULT_TIMEOUT_SECS.to_string());
        let timeout_secs = timeout_text
            .parse::<u64>()
            .ok()
            .filter(|secs| *secs > 0)
            .ok_or_else(|| ConfigError::Invalid {
                key: TIMEOUT_KEY,
                value: timeout_text.clone(),
                reason: "expected a positive number of seconds".to_string(),
            })?;

        Ok(Self {
            endpoint,
            data_dir,
            log_level,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }

    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(DATABASE_FILE_NAME)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join(LOG_DIR_NAME)
    }
}

fn value_or_default(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: &str,
) -> String {
    match lookup(key).map(|value| value.trim().to_string()) {
        Some(value) if !value.is_empty() => value,
        _ => {
            info!("event=config_default module=config key={key} value={default}");
            default.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ClientConfig, ConfigError, DATA_DIR_KEY, ENDPOINT_KEY, LOG_LEVEL_KEY, TIMEOUT_KEY};
    use std::collections::HashMap;
    use std::time::Duration;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect::<HashMap<_, _>>();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.endpoint, "http://localhost:4000/");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert!(config.data_dir.is_absolute());
        assert!(config.database_path().starts_with(&config.data_dir));
    }

    #[test]
    fn explicit_values_override_defaults() {
        let dir = std::env::temp_dir().join("recipebook-config-test");
        let dir_text = dir.to_str().unwrap().to_string();
        let config = ClientConfig::from_lookup(lookup(&[
            (ENDPOINT_KEY, "https://recipes.example.com/graphql"),
            (DATA_DIR_KEY, dir_text.as_str()),
            (TIMEOUT_KEY, "5"),
        ]))
        .unwrap();

        assert_eq!(config.endpoint, "https://recipes.example.com/graphql");
        assert_eq!(config.log_dir(), dir.join("logs"));
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn malformed_values_are_rejected() {
        let err = ClientConfig::from_lookup(lookup(&[(ENDPOINT_KEY, "localhost:4000")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key, .. } if key == ENDPOINT_KEY));

        let err = ClientConfig::from_lookup(lookup(&[(TIMEOUT_KEY, "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key, .. } if key == TIMEOUT_KEY));

        let err = ClientConfig::from_lookup(lookup(&[(DATA_DIR_KEY, "relative/dir")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key, .. } if key == DATA_DIR_KEY));

        let err = ClientConfig::from_lookup(lookup(&[(LOG_LEVEL_KEY, "verbose")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key, .. } if key == LOG_LEVEL_KEY));
    }

    #[test]
    fn log_level_is_normalized() {
        let config = ClientConfig::from_lookup(lookup(&[(LOG_LEVEL_KEY, " WARNING ")])).unwrap();
        assert_eq!(config.log_level, "warn");
    }
}
