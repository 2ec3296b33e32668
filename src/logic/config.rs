//! Runtime configuration
//!
//! Environment variables with fallback defaults (`.env` is honored by the
//! binary through dotenvy).

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::*;
use crate::logic::policy::PolicyConfig;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid JSON in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct ResponseConfig {
    /// Audit ledger file (JSON Lines)
    pub ledger_path: PathBuf,

    pub policy: PolicyConfig,

    /// Upper bound for a single adapter call
    pub adapter_timeout: Duration,

    /// Actions processed concurrently
    pub max_parallel: usize,

    /// Recorded as executor in results and ledger entries
    pub executor: String,

    /// Run control-plane commands for real instead of only logging them
    pub live_commands: bool,
}

impl Default for ResponseConfig {
    fn default() -> Self {
        Self {
            ledger_path: default_ledger_path(),
            policy: PolicyConfig::default(),
            adapter_timeout: Duration::from_millis(DEFAULT_ADAPTER_TIMEOUT_MS),
            max_parallel: DEFAULT_MAX_PARALLEL,
            executor: DEFAULT_EXECUTOR.to_string(),
            live_commands: false,
        }
    }
}

impl ResponseConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let policy = match lookup(ENV_POLICY_FILE) {
            Some(path) => PolicyConfig::from_file(Path::new(&path))?,
            None => PolicyConfig::default(),
        };

        let config = Self {
            ledger_path: lookup(ENV_LEDGER_PATH)
                .map(PathBuf::from)
                .unwrap_or_else(default_ledger_path),

            policy,

            adapter_timeout: Duration::from_millis(
                parse_or(&lookup, ENV_ADAPTER_TIMEOUT_MS, DEFAULT_ADAPTER_TIMEOUT_MS),
            ),

            max_parallel: parse_or(&lookup, ENV_MAX_PARALLEL, DEFAULT_MAX_PARALLEL).max(1),

            executor: lookup(ENV_EXECUTOR)
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_EXECUTOR.to_string()),

            live_commands: lookup(ENV_LIVE_COMMANDS)
                .map(|s| matches!(s.to_lowercase().as_str(), "true" | "1" | "yes"))
                .unwrap_or(false),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.adapter_timeout.is_zero() {
            return Err(ConfigError::Invalid(format!(
                "{} must be greater than 0",
                ENV_ADAPTER_TIMEOUT_MS
            )));
        }
        self.policy.validate()
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("Ignoring invalid {}={:?}, using default", key, raw);
            default
        }),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_env() {
        let config = ResponseConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.adapter_timeout, Duration::from_millis(5000));
        assert_eq!(config.max_parallel, 1);
        assert_eq!(config.executor, "System");
        assert!(!config.live_commands);
        assert!(config.ledger_path.ends_with("execution_audit.log"));
    }

    #[test]
    fn test_env_overrides() {
        let config = ResponseConfig::from_lookup(lookup_from(&[
            (ENV_LEDGER_PATH, "/tmp/audit.log"),
            (ENV_ADAPTER_TIMEOUT_MS, "250"),
            (ENV_MAX_PARALLEL, "4"),
            (ENV_EXECUTOR, "soc-bot"),
            (ENV_LIVE_COMMANDS, "TRUE"),
        ]))
        .unwrap();

        assert_eq!(config.ledger_path, PathBuf::from("/tmp/audit.log"));
        assert_eq!(config.adapter_timeout, Duration::from_millis(250));
        assert_eq!(config.max_parallel, 4);
        assert_eq!(config.executor, "soc-bot");
        assert!(config.live_commands);
    }

    #[test]
    fn test_invalid_numbers_fall_back() {
        let config = ResponseConfig::from_lookup(lookup_from(&[
            (ENV_MAX_PARALLEL, "lots"),
            (ENV_ADAPTER_TIMEOUT_MS, "-5"),
        ]))
        .unwrap();
        assert_eq!(config.max_parallel, 1);
        assert_eq!(config.adapter_timeout, Duration::from_millis(5000));
    }

    #[test]
    fn test_zero_parallel_means_sequential() {
        let config = ResponseConfig::from_lookup(lookup_from(&[(ENV_MAX_PARALLEL, "0")])).unwrap();
        assert_eq!(config.max_parallel, 1);
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let result = ResponseConfig::from_lookup(lookup_from(&[(ENV_ADAPTER_TIMEOUT_MS, "0")]));
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_policy_file_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("policy.json");
        std::fs::write(&path, r#"{"max_auto_blast_radius": 3}"#).unwrap();

        let config = ResponseConfig::from_lookup(lookup_from(&[(
            ENV_POLICY_FILE,
            path.to_str().unwrap(),
        )]))
        .unwrap();
        assert_eq!(config.policy.max_auto_blast_radius, 3);
    }

    #[test]
    fn test_missing_policy_file_is_an_error() {
        let result = ResponseConfig::from_lookup(lookup_from(&[(
            ENV_POLICY_FILE,
            "/nonexistent/policy.json",
        )]));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
