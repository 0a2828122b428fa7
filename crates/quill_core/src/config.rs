//! Process configuration sourced from environment variables.
//!
//! | Variable          | Default                      |
//! |-------------------|------------------------------|
//! | `QUILL_DB_PATH`   | `quill.sqlite3`              |
//! | `QUILL_LOG_LEVEL` | build-mode default level     |
//! | `QUILL_LOG_DIR`   | unset, file logging disabled |
//! | `QUILL_SEED`      | `true`                       |

use crate::logging::{default_log_level, normalize_level};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const ENV_DB_PATH: &str = "QUILL_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "QUILL_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "QUILL_LOG_DIR";
pub const ENV_SEED: &str = "QUILL_SEED";

const DEFAULT_DB_FILE_NAME: &str = "quill.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuillConfig {
    pub db_path: PathBuf,
    pub log_level: &'static str,
    pub log_dir: Option<PathBuf>,
    pub seed_on_boot: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { key, value, reason } => {
                write!(f, "invalid value `{value}` for {key}: {reason}")
            }
        }
    }
}

impl Error for ConfigError {}

impl QuillConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let db_path = lookup(ENV_DB_PATH)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_DB_FILE_NAME), PathBuf::from);

        let log_level = match lookup(ENV_LOG_LEVEL) {
            Some(value) => normalize_level(&value).map_err(|reason| ConfigError::InvalidValue {
                key: ENV_LOG_LEVEL,
                value: value.clone(),
                reason,
            })?,
            None => default_log_level(),
        };

        let log_dir = match lookup(ENV_LOG_DIR) {
            Some(value) if value.trim().is_empty() => None,
            Some(value) => {
                let path = PathBuf::from(value.trim());
                if !path.is_absolute() {
                    return Err(ConfigError::InvalidValue {
                        key: ENV_LOG_DIR,
                        value,
                        reason: "must be an absolute path".to_string(),
                    });
                }
                Some(path)
            }
            None => None,
        };

        let seed_on_boot = match lookup(ENV_SEED) {
            Some(value) => parse_bool(&value).ok_or_else(|| ConfigError::InvalidValue {
                key: ENV_SEED,
                value: value.clone(),
                reason: "expected true|false|1|0".to_string(),
            })?,
            None => true,
        };

        Ok(Self {
            db_path,
            log_level,
            log_dir,
            seed_on_boot,
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, QuillConfig, ENV_LOG_DIR, ENV_LOG_LEVEL, ENV_SEED};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn config_from(pairs: &[(&str, &str)]) -> Result<QuillConfig, ConfigError> {
        let values: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        QuillConfig::from_lookup(|key| values.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = config_from(&[]).expect("empty environment should be valid");
        assert_eq!(config.db_path, PathBuf::from("quill.sqlite3"));
        assert_eq!(config.log_dir, None);
        assert!(config.seed_on_boot);
    }

    #[test]
    fn log_level_is_normalized() {
        let config = config_from(&[(ENV_LOG_LEVEL, " WARNING ")]).expect("level should parse");
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn relative_log_dir_is_rejected() {
        let err = config_from(&[(ENV_LOG_DIR, "logs")]).expect_err("relative dir must fail");
        assert!(matches!(
            err,
            ConfigError::InvalidValue { key: ENV_LOG_DIR, .. }
        ));
    }

    #[test]
    fn seed_flag_accepts_numeric_values() {
        let config = config_from(&[(ENV_SEED, "0")]).expect("seed flag should parse");
        assert!(!config.seed_on_boot);
        assert!(config_from(&[(ENV_SEED, "maybe")]).is_err());
    }
}
