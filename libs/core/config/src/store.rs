use crate::{env_or_default, ConfigError, FromEnv};
use std::path::PathBuf;
use std::time::Duration;

/// Configuration for the JSON file backing the item catalog.
#[derive(Clone, Debug)]
pub struct StoreConfig {
    /// Path to the items JSON file
    pub data_path: PathBuf,
    /// Poll interval used by the filesystem watcher backend
    pub watch_poll_interval: Duration,
}

impl StoreConfig {
    pub fn new(data_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
            watch_poll_interval: Duration::from_secs(2),
        }
    }
}

impl FromEnv for StoreConfig {
    /// Reads from environment variables with sensible defaults:
    /// - DATA_PATH: defaults to "data/items.json"
    /// - WATCH_POLL_INTERVAL_MS: defaults to 2000
    fn from_env() -> Result<Self, ConfigError> {
        let data_path = PathBuf::from(env_or_default("DATA_PATH", "data/items.json"));
        let poll_ms: u64 = env_or_default("WATCH_POLL_INTERVAL_MS", "2000")
            .parse()
            .map_err(|e| ConfigError::ParseError {
                key: "WATCH_POLL_INTERVAL_MS".to_string(),
                details: format!("{}", e),
            })?;

        Ok(Self {
            data_path,
            watch_poll_interval: Duration::from_millis(poll_ms),
        })
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new("data/items.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_config_from_env_with_defaults() {
        temp_env::with_vars(
            [
                ("DATA_PATH", None::<&str>),
                ("WATCH_POLL_INTERVAL_MS", None::<&str>),
            ],
            || {
                let config = StoreConfig::from_env().unwrap();
                assert_eq!(config.data_path, PathBuf::from("data/items.json"));
                assert_eq!(config.watch_poll_interval, Duration::from_secs(2));
            },
        );
    }

    #[test]
    fn test_store_config_from_env_with_custom_values() {
        temp_env::with_vars(
            [
                ("DATA_PATH", Some("/var/lib/catalog/items.json")),
                ("WATCH_POLL_INTERVAL_MS", Some("500")),
            ],
            || {
                let config = StoreConfig::from_env().unwrap();
                assert_eq!(
                    config.data_path,
                    PathBuf::from("/var/lib/catalog/items.json")
                );
                assert_eq!(config.watch_poll_interval, Duration::from_millis(500));
            },
        );
    }

    #[test]
    fn test_store_config_from_env_invalid_interval() {
        temp_env::with_var("WATCH_POLL_INTERVAL_MS", Some("soon"), || {
            let result = StoreConfig::from_env();
            assert!(result.is_err());
            let err = result.unwrap_err();
            assert!(err.to_string().contains("WATCH_POLL_INTERVAL_MS"));
        });
    }
}
