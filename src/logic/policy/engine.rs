//! Policy Engine
//!
//! CHỈ chứa logic quyết định - không có types definitions.
//! Input: action type + confidence + blast radius
//! Output: PolicyDecision
//!
//! Pure and stateless: identical inputs always give identical decisions.

use super::catalog;
use super::config::PolicyConfig;
use super::types::*;

// ============================================================================
// ENGINE
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct PolicyEngine {
    config: PolicyConfig,
}

impl PolicyEngine {
    pub fn new(config: PolicyConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    pub fn classify(&self, action_type: &str) -> ActionCategory {
        catalog::lookup(action_type)
    }

    /// Gate an action. First matching rule wins:
    /// 1. Irreversible → Rejected
    /// 2. Observational → Auto
    /// 3. blast radius over limit → Staged
    /// 4. Containment → Auto at/above threshold, else Staged
    /// 5. Disruptive → Staged at/above threshold, else Rejected (never Auto)
    pub fn decide(&self, action_type: &str, confidence: f64, blast_radius: u32) -> PolicyDecision {
        let category = self.classify(action_type);
        let confidence = sanitize_confidence(confidence);
        let config = &self.config;

        match category {
            ActionCategory::Irreversible => PolicyDecision::new(
                ExecutionMode::Rejected,
                category,
                "Action is classified IRREVERSIBLE - Manual intervention only.",
            ),

            ActionCategory::Observational => PolicyDecision::new(
                ExecutionMode::Auto,
                category,
                "Observational action safe for auto-execution.",
            ),

            _ if blast_radius > config.max_auto_blast_radius => PolicyDecision::new(
                ExecutionMode::Staged,
                category,
                format!(
                    "Blast radius ({}) exceeds auto-execution limit ({}).",
                    blast_radius, config.max_auto_blast_radius
                ),
            ),

            ActionCategory::Containment => {
                let threshold = config.containment_auto_threshold;
                if confidence >= threshold {
                    PolicyDecision::new(
                        ExecutionMode::Auto,
                        category,
                        format!(
                            "Confidence ({:.2}) meets Containment threshold ({}).",
                            confidence, threshold
                        ),
                    )
                } else {
                    PolicyDecision::new(
                        ExecutionMode::Staged,
                        category,
                        format!(
                            "Confidence ({:.2}) below Containment auto-threshold ({}).",
                            confidence, threshold
                        ),
                    )
                }
            }

            ActionCategory::Disruptive => {
                let threshold = config.disruptive_stage_threshold;
                if confidence < threshold {
                    PolicyDecision::new(
                        ExecutionMode::Rejected,
                        category,
                        format!(
                            "Confidence ({:.2}) too low to even stage Disruptive action ({}).",
                            confidence, threshold
                        ),
                    )
                } else {
                    PolicyDecision::new(
                        ExecutionMode::Staged,
                        category,
                        "Disruptive action requires Human-in-the-Loop approval.",
                    )
                }
            }
        }
    }
}

/// NaN or infinite confidence counts as zero; the rest is clamped to 0..=1
fn sanitize_confidence(confidence: f64) -> f64 {
    if confidence.is_finite() {
        confidence.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

// ============================================================================
// FREE FUNCTIONS
// ============================================================================

/// Decision with the default thresholds
pub fn decide(action_type: &str, confidence: f64, blast_radius: u32) -> PolicyDecision {
    PolicyEngine::default().decide(action_type, confidence, blast_radius)
}

/// Decision with custom thresholds
pub fn decide_with_config(
    action_type: &str,
    confidence: f64,
    blast_radius: u32,
    config: &PolicyConfig,
) -> PolicyDecision {
    PolicyEngine::new(config.clone()).decide(action_type, confidence, blast_radius)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observational_always_auto() {
        let result = decide("Enable Process Auditing", 0.0, 100);
        assert_eq!(result.mode, ExecutionMode::Auto);
        assert_eq!(result.category, ActionCategory::Observational);
    }

    #[test]
    fn test_containment_confidence_threshold() {
        assert_eq!(decide("Block Inbound SMB", 0.5, 1).mode, ExecutionMode::Staged);
        assert_eq!(decide("Block Inbound SMB", 0.7, 1).mode, ExecutionMode::Auto);
        // Threshold is inclusive
        assert_eq!(decide("Block Inbound SMB", 0.6, 1).mode, ExecutionMode::Auto);
    }

    #[test]
    fn test_disruptive_is_staged() {
        assert_eq!(decide("Isolate Host", 0.9, 1).mode, ExecutionMode::Staged);
        assert_eq!(decide("Isolate Host", 1.0, 1).mode, ExecutionMode::Staged);
        assert_eq!(decide("Isolate Host", 0.5, 1).mode, ExecutionMode::Rejected);
    }

    #[test]
    fn test_irreversible_is_rejected() {
        let result = decide("Delete Account", 0.99, 1);
        assert_eq!(result.mode, ExecutionMode::Rejected);
        assert!(result.reason.contains("Manual intervention only"));
    }

    #[test]
    fn test_blast_radius_limit() {
        let result = decide("Block Inbound SMB", 0.9, 50);
        assert_eq!(result.mode, ExecutionMode::Staged);
        assert!(result.reason.contains("Blast radius (50)"));
        // Boundary: exactly at the limit is still allowed
        assert_eq!(decide("Block Inbound SMB", 0.9, 10).mode, ExecutionMode::Auto);
    }

    #[test]
    fn test_irreversible_beats_blast_radius() {
        assert_eq!(decide("Wipe Host", 0.9, 50).mode, ExecutionMode::Rejected);
    }

    #[test]
    fn test_reason_names_the_rule_that_fired() {
        let wipe = decide("Wipe Host", 0.9, 50);
        assert!(wipe.reason.contains("IRREVERSIBLE"), "{}", wipe.reason);

        let isolate = decide("Isolate Host", 0.9, 50);
        assert_eq!(isolate.mode, ExecutionMode::Staged);
        assert!(isolate.reason.starts_with("Blast radius (50)"), "{}", isolate.reason);

        for (action, blast) in [("Delete Account", 1), ("Enable Process Auditing", 50), ("Launch Missiles", 1)] {
            let decision = decide(action, 0.5, blast);
            assert!(!decision.reason.contains("Unknown"), "{}: {}", action, decision.reason);
        }
    }

    #[test]
    fn test_unknown_action_fails_safe() {
        let result = decide("Launch Missiles", 0.99, 1);
        assert_eq!(result.category, ActionCategory::Disruptive);
        assert_eq!(result.mode, ExecutionMode::Staged);
    }

    #[test]
    fn test_nan_confidence_treated_as_zero() {
        assert_eq!(decide("Block Inbound SMB", f64::NAN, 1).mode, ExecutionMode::Staged);
        assert_eq!(decide("Isolate Host", f64::NAN, 1).mode, ExecutionMode::Rejected);
    }

    #[test]
    fn test_custom_thresholds() {
        let config = PolicyConfig {
            containment_auto_threshold: 0.8,
            max_auto_blast_radius: 0,
            ..Default::default()
        };
        assert_eq!(
            decide_with_config("Block Inbound SMB", 0.7, 0, &config).mode,
            ExecutionMode::Staged
        );
        assert_eq!(
            decide_with_config("Block Inbound SMB", 0.9, 1, &config).mode,
            ExecutionMode::Staged
        );
    }
}
