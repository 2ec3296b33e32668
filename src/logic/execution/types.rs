//! Execution Types
//!
//! Input actions, per-action results and the batch report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::logic::policy::{BlastRadiusWeights, ExecutionMode};
use crate::logic::response::RollbackToken;

// ============================================================================
// INPUT
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetType {
    User,
    Host,
    #[serde(rename = "Network Segment", alias = "NetworkSegment")]
    NetworkSegment,
}

impl TargetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetType::User => "User",
            TargetType::Host => "Host",
            TargetType::NetworkSegment => "Network Segment",
        }
    }

    /// Heuristic number of systems an action on this target touches
    pub fn blast_radius(&self, weights: &BlastRadiusWeights) -> u32 {
        match self {
            TargetType::User => weights.user,
            TargetType::Host => weights.host,
            TargetType::NetworkSegment => weights.network_segment,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    #[serde(rename = "type")]
    pub target_type: TargetType,
    pub identifier: String,
}

impl Target {
    /// "Type:identifier", as written to results and the ledger
    pub fn label(&self) -> String {
        format!("{}:{}", self.target_type.as_str(), self.identifier)
    }
}

/// A recommended action. Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub action_type: String,
    pub target: Target,
    /// Carried through, never interpreted
    #[serde(default)]
    pub justification: serde_json::Map<String, serde_json::Value>,
}

/// Action record that could not be parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedAction {
    pub action_type: String,
    pub target: String,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ActionEntry {
    Valid(Action),
    Malformed(MalformedAction),
}

/// One action with the context of the decision it came from
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedAction {
    pub session_id: String,
    pub confidence: f64,
    pub entry: ActionEntry,
}

// ============================================================================
// RESULTS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStatus {
    Pending,
    Success,
    Failed,
    Blocked,
    RolledBack,
}

impl ExecutionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExecutionStatus::Pending => "pending",
            ExecutionStatus::Success => "success",
            ExecutionStatus::Failed => "failed",
            ExecutionStatus::Blocked => "blocked",
            ExecutionStatus::RolledBack => "rolled_back",
        }
    }
}

impl std::fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub action_id: String,
    pub session_id: String,
    pub target: String,
    pub action_name: String,
    pub execution_mode: ExecutionMode,
    pub final_status: ExecutionStatus,
    pub timestamp: DateTime<Utc>,
    pub executor: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dry_run_output: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rollback_token: Option<RollbackToken>,
    /// Entry hash of the ledger record written for this result
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audit_hash: Option<String>,
}

impl ExecutionResult {
    pub fn pending(
        session_id: &str,
        target: String,
        action_name: &str,
        mode: ExecutionMode,
        executor: &str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            action_id: uuid::Uuid::new_v4().to_string(),
            session_id: session_id.to_string(),
            target,
            action_name: action_name.to_string(),
            execution_mode: mode,
            final_status: ExecutionStatus::Pending,
            timestamp: Utc::now(),
            executor: executor.to_string(),
            message: message.into(),
            dry_run_output: None,
            rollback_token: None,
            audit_hash: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub success: usize,
    pub failed: usize,
    pub pending: usize,
    pub blocked: usize,
    pub total: usize,
}

impl SummaryStats {
    pub fn record(&mut self, status: ExecutionStatus) {
        match status {
            ExecutionStatus::Success => self.success += 1,
            ExecutionStatus::Failed => self.failed += 1,
            ExecutionStatus::Pending => self.pending += 1,
            ExecutionStatus::Blocked => self.blocked += 1,
            ExecutionStatus::RolledBack => {}
        }
        self.total += 1;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionReport {
    pub report_id: String,
    pub generated_at: DateTime<Utc>,
    pub executions: Vec<ExecutionResult>,
    pub summary_stats: SummaryStats,
}

impl ExecutionReport {
    pub fn new(executions: Vec<ExecutionResult>) -> Self {
        let mut summary_stats = SummaryStats::default();
        for result in &executions {
            summary_stats.record(result.final_status);
        }
        Self {
            report_id: uuid::Uuid::new_v4().to_string(),
            generated_at: Utc::now(),
            executions,
            summary_stats,
        }
    }

    pub fn find(&self, action_id: &str) -> Option<&ExecutionResult> {
        self.executions.iter().find(|r| r.action_id == action_id)
    }
}
