//! Ledger Content Schemas
//!
//! The three histories that share the chained ledger:
//! - `AuditRecord`: one entry per response action decision/outcome
//! - `TrustEvent`: governance trust ledger (threshold changes, feedback)
//! - `EventRecord`: ingestion event-integrity chain

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::types::{LedgerContent, GENESIS_ID};

// ============================================================================
// EXECUTION AUDIT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub action_id: String,
    pub action_type: String,
    pub target: String,
    pub executor: String,
    pub status: String,
}

impl AuditRecord {
    pub fn new(
        action_id: &str,
        action_type: &str,
        target: &str,
        executor: &str,
        status: &str,
    ) -> Self {
        Self {
            action_id: action_id.to_string(),
            action_type: action_type.to_string(),
            target: target.to_string(),
            executor: executor.to_string(),
            status: status.to_string(),
        }
    }
}

impl LedgerContent for AuditRecord {
    fn genesis() -> Self {
        Self::new(GENESIS_ID, "", "", "System", "")
    }

    fn hash_material(&self) -> String {
        format!(
            "{}{}{}{}{}",
            self.action_id, self.action_type, self.target, self.executor, self.status
        )
    }
}

// ============================================================================
// GOVERNANCE TRUST LEDGER
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrustEvent {
    pub event_type: String,
    #[serde(default)]
    pub payload: serde_json::Value,
    pub actor: String,
}

impl TrustEvent {
    pub fn new(event_type: &str, payload: serde_json::Value, actor: &str) -> Self {
        Self {
            event_type: event_type.to_string(),
            payload,
            actor: actor.to_string(),
        }
    }
}

impl LedgerContent for TrustEvent {
    fn genesis() -> Self {
        Self::new(GENESIS_ID, serde_json::Value::Null, "System")
    }

    fn hash_material(&self) -> String {
        // serde_json maps are key-ordered, so this is canonical
        let payload = serde_json::to_string(&self.payload).unwrap_or_default();
        format!("{}{}{}", self.event_type, payload, self.actor)
    }
}

// ============================================================================
// INGESTION EVENT INTEGRITY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub event_id: String,
    pub event_type: String,
    pub source: String,
    /// SHA-256 of the raw source line
    pub raw_hash: String,
}

impl EventRecord {
    /// Build a record, hashing the raw source line
    pub fn from_raw(event_id: &str, event_type: &str, source: &str, raw: &str) -> Self {
        Self {
            event_id: event_id.to_string(),
            event_type: event_type.to_string(),
            source: source.to_string(),
            raw_hash: hex::encode(Sha256::digest(raw.as_bytes())),
        }
    }

    /// Does `raw` still match what was chained?
    pub fn matches_raw(&self, raw: &str) -> bool {
        self.raw_hash == hex::encode(Sha256::digest(raw.as_bytes()))
    }
}

impl LedgerContent for EventRecord {
    fn genesis() -> Self {
        Self {
            event_id: GENESIS_ID.to_string(),
            event_type: String::new(),
            source: String::new(),
            raw_hash: String::new(),
        }
    }

    fn hash_material(&self) -> String {
        format!(
            "{}{}{}{}",
            self.event_id, self.event_type, self.source, self.raw_hash
        )
    }
}

// ============================================================================
// TESTS
// ============================================================================
