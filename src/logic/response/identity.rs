//! Identity & Access commands (local accounts via `net user`)

use super::types::{CommandPlan, ControlCommand};

pub const DISABLE_ACCOUNT: &str = "Disable Account";
pub const RESET_PASSWORD: &str = "Reset Password";

/// Routed here. Reset Password has no command yet and reports failure.
pub const ROUTED: &[&str] = &[DISABLE_ACCOUNT, RESET_PASSWORD];

pub fn plan(action_type: &str, account: &str) -> Option<CommandPlan> {
    match action_type {
        DISABLE_ACCOUNT => Some(CommandPlan {
            forward: net_user(account, "/active:no"),
            rollback: net_user(account, "/active:yes"),
            summary: format!("Account {} disabled via IAM", account),
        }),
        _ => None,
    }
}

fn net_user(account: &str, flag: &str) -> ControlCommand {
    ControlCommand::new("net", ["user", account, flag])
}
