//! Response Types
//!
//! Commands, adapter outcomes and rollback tokens.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Free-form adapter parameters, ordered for stable serialization
pub type ActionParams = BTreeMap<String, String>;

/// Message carried by the token of an action that has no inverse
pub const NO_ROLLBACK_DEFINED: &str = "No rollback defined";

// ============================================================================
// CONTROL COMMAND
// ============================================================================

/// A single command for the host's control plane (firewall, IAM, auditpol)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl ControlCommand {
    pub fn new<I, S>(program: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.to_string(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl std::fmt::Display for ControlCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.contains(' ') {
                write!(f, " \"{}\"", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// Forward command and its inverse for one supported action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandPlan {
    pub forward: ControlCommand,
    pub rollback: ControlCommand,
    /// Success message, without the command suffix
    pub summary: String,
}

// ============================================================================
// ADAPTER OUTCOME
// ============================================================================

/// Result of an adapter `execute` call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdapterOutcome {
    pub success: bool,
    pub message: String,
}

impl AdapterOutcome {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

// ============================================================================
// ROLLBACK TOKEN
// ============================================================================

/// Pre-computed inverse of an action, generated before the action runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollbackToken {
    pub token_id: String,
    pub original_action_id: String,
    /// Human-readable form of `command`
    pub rollback_command: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<ControlCommand>,
    #[serde(default)]
    pub parameters: ActionParams,
    pub created_at: DateTime<Utc>,
    pub reversible: bool,
}

impl RollbackToken {
    pub fn new(original_action_id: &str, command: ControlCommand, parameters: ActionParams) -> Self {
        Self {
            token_id: uuid::Uuid::new_v4().to_string(),
            original_action_id: original_action_id.to_string(),
            rollback_command: command.to_string(),
            command: Some(command),
            parameters,
            created_at: Utc::now(),
            reversible: true,
        }
    }

    /// Explicit "nothing to undo" token. Never mistaken for a real inverse.
    pub fn unavailable(original_action_id: &str) -> Self {
        Self {
            token_id: uuid::Uuid::new_v4().to_string(),
            original_action_id: original_action_id.to_string(),
            rollback_command: NO_ROLLBACK_DEFINED.to_string(),
            command: None,
            parameters: ActionParams::new(),
            created_at: Utc::now(),
            reversible: false,
        }
    }

    pub fn is_reversible(&self) -> bool {
        self.reversible && self.command.is_some()
    }
}
