//! Network Control commands
//!
//! Windows Firewall via `netsh advfirewall`.

use super::types::{CommandPlan, ControlCommand};

pub const BLOCK_INBOUND_SMB: &str = "Block Inbound SMB";
pub const ISOLATE_HOST: &str = "Isolate Host";

pub const ROUTED: &[&str] = &[BLOCK_INBOUND_SMB, ISOLATE_HOST];

const RULE_PREFIX: &str = "BlockSMB-";
const SMB_PORT: u16 = 445;

pub fn plan(action_type: &str, target: &str) -> Option<CommandPlan> {
    match action_type {
        BLOCK_INBOUND_SMB => {
            let rule_name = format!("{}{}", RULE_PREFIX, target);
            Some(CommandPlan {
                forward: create_block_rule(&rule_name, target),
                rollback: delete_rule(&rule_name),
                summary: format!("Inbound SMB blocked for {}", target),
            })
        }
        // Drastic: everything in and out is blocked
        ISOLATE_HOST => Some(CommandPlan {
            forward: set_firewall_policy("blockinbound,blockoutbound"),
            rollback: set_firewall_policy("allowinbound,allowoutbound"),
            summary: format!("Host {} ISOLATED", target),
        }),
        _ => None,
    }
}

// ============================================================================
// FIREWALL HELPERS
// ============================================================================

fn create_block_rule(name: &str, remote_ip: &str) -> ControlCommand {
    ControlCommand::new(
        "netsh",
        [
            "advfirewall".to_string(),
            "firewall".to_string(),
            "add".to_string(),
            "rule".to_string(),
            format!("name={}", name),
            "dir=in".to_string(),
            "action=block".to_string(),
            "protocol=TCP".to_string(),
            format!("localport={}", SMB_PORT),
            format!("remoteip={}", remote_ip),
        ],
    )
}

fn delete_rule(name: &str) -> ControlCommand {
    ControlCommand::new(
        "netsh",
        [
            "advfirewall".to_string(),
            "firewall".to_string(),
            "delete".to_string(),
            "rule".to_string(),
            format!("name={}", name),
        ],
    )
}

fn set_firewall_policy(policy: &str) -> ControlCommand {
    ControlCommand::new(
        "netsh",
        ["advfirewall", "set", "allprofiles", "firewallpolicy", policy],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smb_rule_name_matches_on_both_sides() {
        let plan = plan(BLOCK_INBOUND_SMB, "10.0.0.5").unwrap();
        assert_eq!(
            plan.forward.to_string(),
            "netsh advfirewall firewall add rule name=BlockSMB-10.0.0.5 dir=in action=block protocol=TCP localport=445 remoteip=10.0.0.5"
        );
        assert_eq!(
            plan.rollback.to_string(),
            "netsh advfirewall firewall delete rule name=BlockSMB-10.0.0.5"
        );
    }

    #[test]
    fn test_isolation_inverse() {
        let plan = plan(ISOLATE_HOST, "WS-01").unwrap();
        assert!(plan.forward.args.contains(&"blockinbound,blockoutbound".to_string()));
        assert!(plan.rollback.args.contains(&"allowinbound,allowoutbound".to_string()));
        assert_eq!(plan.summary, "Host WS-01 ISOLATED");
    }
}
