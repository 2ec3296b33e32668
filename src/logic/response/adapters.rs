//! Adapters
//!
//! Closed set of capability executors. Each variant knows which action
//! types it can run and how to undo them; everything else fails cleanly.

use serde::{Deserialize, Serialize};

use super::audit_config;
use super::control_plane::ControlPlane;
use super::identity;
use super::network;
use super::types::{ActionParams, AdapterOutcome, CommandPlan, RollbackToken};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Adapter {
    IdentityAccess,
    NetworkControl,
    AuditConfig,
    /// Fallback for unrouted action types: never succeeds, never reversible
    GenericNoOp,
}

impl Adapter {
    /// Short tag used in log lines
    pub fn label(&self) -> &'static str {
        match self {
            Adapter::IdentityAccess => "IAM",
            Adapter::NetworkControl => "Firewall",
            Adapter::AuditConfig => "Audit",
            Adapter::GenericNoOp => "Generic",
        }
    }

    fn plan(&self, action_type: &str, target: &str) -> Option<CommandPlan> {
        match self {
            Adapter::IdentityAccess => identity::plan(action_type, target),
            Adapter::NetworkControl => network::plan(action_type, target),
            Adapter::AuditConfig => audit_config::plan(action_type),
            Adapter::GenericNoOp => None,
        }
    }

    pub fn supports(&self, action_type: &str) -> bool {
        self.plan(action_type, "").is_some()
    }

    /// Every action an adapter can execute also has an inverse
    pub fn supports_rollback(&self, action_type: &str) -> bool {
        self.supports(action_type)
    }

    /// Run `action_type` against `target` through `control`.
    /// Unsupported actions and control-plane errors come back as failures.
    pub fn execute(
        &self,
        control: &dyn ControlPlane,
        target: &str,
        action_type: &str,
        _params: &ActionParams,
    ) -> AdapterOutcome {
        let Some(plan) = self.plan(action_type, target) else {
            return match self {
                Adapter::GenericNoOp => {
                    AdapterOutcome::failed(format!("No adapter available for action: {}", action_type))
                }
                _ => AdapterOutcome::failed(format!("Unknown {} action: {}", self.label(), action_type)),
            };
        };

        log::info!("[{}] Executing: {}", self.label(), plan.forward);

        match control.issue(&plan.forward) {
            Ok(_) => AdapterOutcome::ok(format!("{} (Command: {})", plan.summary, plan.forward)),
            Err(e) => {
                log::warn!("[{}] {}", self.label(), e);
                AdapterOutcome::failed(format!("{} (Command: {})", e, plan.forward))
            }
        }
    }

    /// Inverse of `action_type` on `target`, or the explicit no-rollback token
    pub fn generate_rollback(
        &self,
        action_id: &str,
        target: &str,
        action_type: &str,
        params: &ActionParams,
    ) -> RollbackToken {
        match self.plan(action_type, target) {
            Some(plan) => {
                let mut parameters = params.clone();
                parameters.insert("target".to_string(), target.to_string());
                parameters.insert("action_type".to_string(), action_type.to_string());
                RollbackToken::new(action_id, plan.rollback, parameters)
            }
            None => RollbackToken::unavailable(action_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::response::control_plane::{ControlPlaneError, LoggingControlPlane};
    use crate::logic::response::types::{ControlCommand, NO_ROLLBACK_DEFINED};

    struct RejectingPlane;

    impl ControlPlane for RejectingPlane {
        fn issue(&self, command: &ControlCommand) -> Result<String, ControlPlaneError> {
            Err(ControlPlaneError::CommandFailed {
                command: command.program.clone(),
                exit_code: 5,
                stderr: "Access is denied.".to_string(),
            })
        }

        fn name(&self) -> &'static str {
            "rejecting"
        }
    }

    const SUPPORTED: &[(Adapter, &str)] = &[
        (Adapter::IdentityAccess, "Disable Account"),
        (Adapter::NetworkControl, "Block Inbound SMB"),
        (Adapter::NetworkControl, "Isolate Host"),
        (Adapter::AuditConfig, "Enable Process Auditing"),
        (Adapter::AuditConfig, "Enable Logon Failure Auditing"),
    ];

    #[test]
    fn test_supported_actions_execute() {
        let params = ActionParams::new();
        for (adapter, action) in SUPPORTED {
            let outcome = adapter.execute(&LoggingControlPlane, "host-7", action, &params);
            assert!(outcome.success, "{} via {:?}", action, adapter);
            assert!(outcome.message.contains("(Command: "));
        }
    }

    #[test]
    fn test_rollback_inverts_forward_command() {
        let params = ActionParams::new();
        for (adapter, action) in SUPPORTED {
            let plan = adapter.plan(action, "host-7").unwrap();
            let token = adapter.generate_rollback("a1", "host-7", action, &params);

            assert!(token.is_reversible());
            assert_eq!(token.command.as_ref(), Some(&plan.rollback));
            assert_ne!(plan.forward, plan.rollback);
            assert_eq!(plan.forward.program, plan.rollback.program);
            assert_eq!(token.parameters.get("target").map(String::as_str), Some("host-7"));
        }
    }

    #[test]
    fn test_unknown_action_fails_without_panic() {
        let params = ActionParams::new();
        let outcome = Adapter::NetworkControl.execute(&LoggingControlPlane, "h", "Wipe Host", &params);
        assert!(!outcome.success);
        assert_eq!(outcome.message, "Unknown Firewall action: Wipe Host");

        let outcome = Adapter::IdentityAccess.execute(&LoggingControlPlane, "u", "Reset Password", &params);
        assert!(!outcome.success);
        assert!(!Adapter::IdentityAccess.supports_rollback("Reset Password"));
    }

    #[test]
    fn test_generic_noop_never_succeeds() {
        let params = ActionParams::new();
        let outcome = Adapter::GenericNoOp.execute(&LoggingControlPlane, "h", "Increase Logging", &params);
        assert!(!outcome.success);

        let token = Adapter::GenericNoOp.generate_rollback("a9", "h", "Increase Logging", &params);
        assert!(!token.is_reversible());
        assert_eq!(token.rollback_command, NO_ROLLBACK_DEFINED);
        assert_eq!(token.original_action_id, "a9");
    }

    #[test]
    fn test_control_plane_failure_is_reported() {
        let params = ActionParams::new();
        let outcome = Adapter::IdentityAccess.execute(&RejectingPlane, "jdoe", "Disable Account", &params);
        assert!(!outcome.success);
        assert!(outcome.message.contains("Access is denied."));
    }
}
