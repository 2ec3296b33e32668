//! Policy Types
//!
//! Core types cho policy decisions.
//! KHÔNG chứa logic - chỉ data structures.

use serde::{Deserialize, Serialize};

// ============================================================================
// ACTION CATEGORY
// ============================================================================

/// Static risk classification of a response action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionCategory {
    /// Only adds visibility (auditing, logging)
    Observational,
    /// Limits spread, easily reverted
    Containment,
    /// Interrupts users or hosts
    Disruptive,
    /// Cannot be undone
    Irreversible,
}

impl ActionCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionCategory::Observational => "Observational",
            ActionCategory::Containment => "Containment",
            ActionCategory::Disruptive => "Disruptive",
            ActionCategory::Irreversible => "Irreversible",
        }
    }
}

impl std::fmt::Display for ActionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// EXECUTION MODE
// ============================================================================

/// How an action may run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// Run immediately
    Auto,
    /// Hold for human approval, dry run only
    Staged,
    /// Never run
    Rejected,
}

impl ExecutionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExecutionMode::Auto => "auto",
            ExecutionMode::Staged => "staged",
            ExecutionMode::Rejected => "rejected",
        }
    }

    pub fn runs_adapter(&self) -> bool {
        matches!(self, ExecutionMode::Auto)
    }
}

impl std::fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// POLICY DECISION
// ============================================================================

/// Decision for a single action. Computed fresh every time, never stored
/// on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyDecision {
    pub mode: ExecutionMode,
    pub category: ActionCategory,
    pub reason: String,
}

impl PolicyDecision {
    pub fn new(mode: ExecutionMode, category: ActionCategory, reason: impl Into<String>) -> Self {
        Self {
            mode,
            category,
            reason: reason.into(),
        }
    }
}
