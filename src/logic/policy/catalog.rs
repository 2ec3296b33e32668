//! Action Catalog
//!
//! Static action type → category table. Loaded once, read-only.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::types::ActionCategory;

/// Category assumed for anything not in the catalog
pub const DEFAULT_CATEGORY: ActionCategory = ActionCategory::Disruptive;

static ACTION_CATALOG: Lazy<HashMap<&'static str, ActionCategory>> = Lazy::new(|| {
    HashMap::from([
        // Observational
        ("Enable Process Auditing", ActionCategory::Observational),
        ("Enable Logon Failure Auditing", ActionCategory::Observational),
        ("Monitor User Behavior", ActionCategory::Observational),
        ("Increase Logging", ActionCategory::Observational),
        // Containment
        ("Block Inbound SMB", ActionCategory::Containment),
        ("Rate Limit User", ActionCategory::Containment),
        ("Terminate Process", ActionCategory::Containment),
        // Disruptive
        ("Isolate Host", ActionCategory::Disruptive),
        ("Disable Account", ActionCategory::Disruptive),
        ("Reset Password", ActionCategory::Disruptive),
        // Irreversible
        ("Delete Account", ActionCategory::Irreversible),
        ("Wipe Host", ActionCategory::Irreversible),
    ])
});

/// Category of `action_type`; unknown types fall back to Disruptive so they
/// can never run unattended.
pub fn lookup(action_type: &str) -> ActionCategory {
    ACTION_CATALOG
        .get(action_type)
        .copied()
        .unwrap_or(DEFAULT_CATEGORY)
}

pub fn is_cataloged(action_type: &str) -> bool {
    ACTION_CATALOG.contains_key(action_type)
}

/// All cataloged action types, sorted
pub fn action_types() -> Vec<&'static str> {
    let mut types: Vec<&'static str> = ACTION_CATALOG.keys().copied().collect();
    types.sort_unstable();
    types
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_actions() {
        assert_eq!(lookup("Enable Process Auditing"), ActionCategory::Observational);
        assert_eq!(lookup("Block Inbound SMB"), ActionCategory::Containment);
        assert_eq!(lookup("Isolate Host"), ActionCategory::Disruptive);
        assert_eq!(lookup("Wipe Host"), ActionCategory::Irreversible);
    }

    #[test]
    fn test_unknown_defaults_to_disruptive() {
        assert!(!is_cataloged("Launch Missiles"));
        assert_eq!(lookup("Launch Missiles"), ActionCategory::Disruptive);
        // Lookup is exact, not case-folded
        assert_eq!(lookup("wipe host"), ActionCategory::Disruptive);
    }

    #[test]
    fn test_catalog_size() {
        assert_eq!(action_types().len(), 12);
    }
}
