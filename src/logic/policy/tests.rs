use proptest::prelude::*;

use super::catalog;
use super::config::PolicyConfig;
use super::engine::{decide, PolicyEngine};
use super::types::{ActionCategory, ExecutionMode};

fn any_action_type() -> impl Strategy<Value = String> {
    prop_oneof![
        proptest::sample::select(catalog::action_types()).prop_map(str::to_string),
        "[A-Za-z ]{0,24}",
    ]
}

fn any_confidence() -> impl Strategy<Value = f64> {
    prop_oneof![
        0.0f64..=1.0,
        Just(f64::NAN),
        Just(f64::INFINITY),
        Just(-1.0),
        Just(2.0),
    ]
}

proptest! {
    #[test]
    fn decisions_are_deterministic(
        action in any_action_type(),
        confidence in any_confidence(),
        radius in 0u32..200,
    ) {
        let engine = PolicyEngine::default();
        prop_assert_eq!(
            engine.decide(&action, confidence, radius),
            engine.decide(&action, confidence, radius)
        );
    }

    #[test]
    fn irreversible_is_never_executed(confidence in any_confidence(), radius in 0u32..200) {
        for action in ["Delete Account", "Wipe Host"] {
            prop_assert_eq!(decide(action, confidence, radius).mode, ExecutionMode::Rejected);
        }
    }

    #[test]
    fn disruptive_is_never_auto(
        action in any_action_type(),
        confidence in any_confidence(),
        radius in 0u32..200,
    ) {
        let decision = decide(&action, confidence, radius);
        if decision.category == ActionCategory::Disruptive {
            prop_assert_ne!(decision.mode, ExecutionMode::Auto);
        }
    }

    #[test]
    fn uncataloged_actions_never_auto(action in "[a-z]{1,16}", confidence in any_confidence()) {
        prop_assume!(!catalog::is_cataloged(&action));
        let decision = decide(&action, confidence, 1);
        prop_assert_eq!(decision.category, ActionCategory::Disruptive);
        prop_assert_ne!(decision.mode, ExecutionMode::Auto);
    }

    #[test]
    fn large_blast_radius_is_never_auto_unless_observational(
        action in any_action_type(),
        confidence in any_confidence(),
        radius in 11u32..10_000,
    ) {
        let decision = decide(&action, confidence, radius);
        if decision.category != ActionCategory::Observational {
            prop_assert_ne!(decision.mode, ExecutionMode::Auto);
        }
    }

    #[test]
    fn observational_is_always_auto(confidence in any_confidence(), radius in 0u32..10_000) {
        prop_assert_eq!(decide("Increase Logging", confidence, radius).mode, ExecutionMode::Auto);
    }
}

// ============================================================================
// SCENARIOS
// ============================================================================

#[test]
fn scenario_observational_low_confidence() {
    let decision = decide("Enable Process Auditing", 0.1, 1);
    assert_eq!(decision.mode, ExecutionMode::Auto);
    assert_eq!(decision.reason, "Observational action safe for auto-execution.");
}

#[test]
fn scenario_containment_high_confidence() {
    let decision = decide("Block Inbound SMB", 0.85, 1);
    assert_eq!(decision.mode, ExecutionMode::Auto);
    assert_eq!(decision.reason, "Confidence (0.85) meets Containment threshold (0.6).");
}

#[test]
fn scenario_disruptive_needs_human() {
    let decision = decide("Isolate Host", 0.95, 1);
    assert_eq!(decision.mode, ExecutionMode::Staged);
    assert_eq!(decision.reason, "Disruptive action requires Human-in-the-Loop approval.");
}

#[test]
fn scenario_segment_wide_containment_is_staged() {
    let config = PolicyConfig::default();
    let decision = decide("Block Inbound SMB", 0.99, config.blast_radius.network_segment);
    assert_eq!(decision.mode, ExecutionMode::Staged);
    assert!(decision.reason.starts_with("Blast radius (50) exceeds auto-execution limit"));
}
