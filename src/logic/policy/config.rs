//! Policy Configuration
//!
//! Thresholds and blast-radius weights for policy decisions.
//! Can be loaded from a JSON file or set at runtime.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::logic::config::ConfigError;

// ============================================================================
// DEFAULTS
// ============================================================================

pub const DEFAULT_CONTAINMENT_AUTO_THRESHOLD: f64 = 0.6;
pub const DEFAULT_DISRUPTIVE_STAGE_THRESHOLD: f64 = 0.7;
pub const DEFAULT_MAX_AUTO_BLAST_RADIUS: u32 = 10;

pub const DEFAULT_USER_BLAST_RADIUS: u32 = 1;
pub const DEFAULT_HOST_BLAST_RADIUS: u32 = 1;
pub const DEFAULT_SEGMENT_BLAST_RADIUS: u32 = 50;

// ============================================================================
// POLICY CONFIG
// ============================================================================

/// Heuristic count of systems affected per target type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlastRadiusWeights {
    pub user: u32,
    pub host: u32,
    pub network_segment: u32,
}

impl Default for BlastRadiusWeights {
    fn default() -> Self {
        Self {
            user: DEFAULT_USER_BLAST_RADIUS,
            host: DEFAULT_HOST_BLAST_RADIUS,
            network_segment: DEFAULT_SEGMENT_BLAST_RADIUS,
        }
    }
}

/// Policy configuration (can be loaded from config file)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Containment actions auto-execute at or above this confidence
    pub containment_auto_threshold: f64,
    /// Disruptive actions below this confidence are rejected, not staged
    pub disruptive_stage_threshold: f64,
    /// Non-observational actions above this blast radius are always staged
    pub max_auto_blast_radius: u32,
    pub blast_radius: BlastRadiusWeights,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            containment_auto_threshold: DEFAULT_CONTAINMENT_AUTO_THRESHOLD,
            disruptive_stage_threshold: DEFAULT_DISRUPTIVE_STAGE_THRESHOLD,
            max_auto_blast_radius: DEFAULT_MAX_AUTO_BLAST_RADIUS,
            blast_radius: BlastRadiusWeights::default(),
        }
    }
}

impl PolicyConfig {
    /// Tighter preset: higher thresholds, only single-system actions auto-run
    pub fn strict() -> Self {
        Self {
            containment_auto_threshold: 0.8,
            disruptive_stage_threshold: 0.9,
            max_auto_blast_radius: 1,
            blast_radius: BlastRadiusWeights::default(),
        }
    }

    /// Load from a JSON file; missing fields keep their defaults
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let data = std::fs::read(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: PolicyConfig =
            serde_json::from_slice(&data).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("containment_auto_threshold", self.containment_auto_threshold),
            ("disruptive_stage_threshold", self.disruptive_stage_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Invalid(format!(
                    "{} must be within 0.0..=1.0, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PolicyConfig::default();
        assert_eq!(config.containment_auto_threshold, 0.6);
        assert_eq!(config.disruptive_stage_threshold, 0.7);
        assert_eq!(config.max_auto_blast_radius, 10);
        assert_eq!(config.blast_radius.network_segment, 50);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("policy.json");
        std::fs::write(&path, r#"{"containment_auto_threshold": 0.75, "blast_radius": {"host": 3}}"#)
            .unwrap();

        let config = PolicyConfig::from_file(&path).unwrap();
        assert_eq!(config.containment_auto_threshold, 0.75);
        assert_eq!(config.disruptive_stage_threshold, 0.7);
        assert_eq!(config.blast_radius.host, 3);
        assert_eq!(config.blast_radius.network_segment, 50);
    }

    #[test]
    fn test_strict_is_tighter() {
        let strict = PolicyConfig::strict();
        let default = PolicyConfig::default();
        assert!(strict.containment_auto_threshold > default.containment_auto_threshold);
        assert!(strict.max_auto_blast_radius < default.max_auto_blast_radius);
        assert!(strict.validate().is_ok());
    }

    #[test]
    fn test_out_of_range_threshold_rejected() {
        let config = PolicyConfig {
            disruptive_stage_threshold: 1.5,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }
}
