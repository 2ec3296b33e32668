//! Audit policy commands (`auditpol`). Host-wide, the target is not used.

use super::types::{CommandPlan, ControlCommand};

pub const ENABLE_PROCESS_AUDITING: &str = "Enable Process Auditing";
pub const ENABLE_LOGON_FAILURE_AUDITING: &str = "Enable Logon Failure Auditing";

pub const ROUTED: &[&str] = &[ENABLE_PROCESS_AUDITING, ENABLE_LOGON_FAILURE_AUDITING];

pub fn plan(action_type: &str) -> Option<CommandPlan> {
    match action_type {
        ENABLE_PROCESS_AUDITING => Some(CommandPlan {
            forward: auditpol("Process Creation", &["/success:enable", "/failure:enable"]),
            rollback: auditpol("Process Creation", &["/success:disable", "/failure:disable"]),
            summary: "Process Auditing enabled".to_string(),
        }),
        ENABLE_LOGON_FAILURE_AUDITING => Some(CommandPlan {
            forward: auditpol("Logon", &["/failure:enable"]),
            rollback: auditpol("Logon", &["/failure:disable"]),
            summary: "Logon Failure Auditing enabled".to_string(),
        }),
        _ => None,
    }
}

fn auditpol(subcategory: &str, flags: &[&str]) -> ControlCommand {
    let mut args = vec!["/set".to_string(), format!("/subcategory:{}", subcategory)];
    args.extend(flags.iter().map(|f| f.to_string()));
    ControlCommand::new("auditpol", args)
}
