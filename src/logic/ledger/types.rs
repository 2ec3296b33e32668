//! Ledger Types
//!
//! Entry layout, content schema trait, verification report and errors.
//! KHÔNG chứa storage logic.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Previous-hash sentinel of the genesis entry (hex width of SHA-256).
/// Never produced by the digest itself.
pub const GENESIS_HASH: &str =
    "0000000000000000000000000000000000000000000000000000000000000000";

/// Identifier carried by every genesis record
pub const GENESIS_ID: &str = "GENESIS";

// ============================================================================
// CONTENT SCHEMA
// ============================================================================

/// Structured content that can be chained in a [`Ledger`](super::Ledger).
///
/// `hash_material` must be a deterministic function of the stored fields:
/// verification recomputes it from what was read back from the store.
pub trait LedgerContent: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Content of the synthesized first entry
    fn genesis() -> Self;

    /// Field concatenation fed to the digest.
    ///
    /// Fields are joined with no separator, matching the on-disk format
    /// existing ledgers were written with. Shifting characters across a
    /// field boundary (`"AB" + "C"` vs `"A" + "BC"`) yields the same
    /// material, so the chain detects edits to an entry but cannot tell
    /// which of two adjacent fields changed in that case.
    fn hash_material(&self) -> String;
}

// ============================================================================
// ENTRY
// ============================================================================

/// One chained record. Serialized flat, one JSON object per line:
/// `timestamp`, the content fields, `prev_hash`, `entry_hash`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry<C> {
    pub timestamp: String,
    #[serde(flatten)]
    pub content: C,
    pub prev_hash: String,
    pub entry_hash: String,
}

impl<C: LedgerContent> LedgerEntry<C> {
    /// Build an entry and compute its hash
    pub fn seal(prev_hash: &str, timestamp: String, content: C) -> Self {
        let entry_hash = compute_entry_hash(prev_hash, &timestamp, &content.hash_material());
        Self {
            timestamp,
            content,
            prev_hash: prev_hash.to_string(),
            entry_hash,
        }
    }

    /// Hash recomputed from the stored fields
    pub fn recompute_hash(&self) -> String {
        compute_entry_hash(&self.prev_hash, &self.timestamp, &self.content.hash_material())
    }

    pub fn is_intact(&self) -> bool {
        self.recompute_hash() == self.entry_hash
    }
}

/// SHA-256 over `prev_hash ∥ timestamp ∥ material ∥ prev_hash`, hex encoded
pub fn compute_entry_hash(prev_hash: &str, timestamp: &str, material: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(prev_hash.as_bytes());
    hasher.update(timestamp.as_bytes());
    hasher.update(material.as_bytes());
    hasher.update(prev_hash.as_bytes());
    hex::encode(hasher.finalize())
}

// ============================================================================
// VERIFICATION
// ============================================================================

/// Why verification stopped at an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerifyFailure {
    /// Record no longer parses as an entry
    Unreadable,
    /// First record does not carry the genesis sentinel
    BadGenesis,
    /// `prev_hash` differs from the preceding entry's hash
    BrokenLink,
    /// Stored hash differs from the recomputed one
    HashMismatch,
}

impl VerifyFailure {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerifyFailure::Unreadable => "unreadable record",
            VerifyFailure::BadGenesis => "bad genesis record",
            VerifyFailure::BrokenLink => "broken chain link",
            VerifyFailure::HashMismatch => "hash mismatch",
        }
    }
}

/// Result of replaying the chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyReport {
    pub ok: bool,
    pub first_bad_index: Option<usize>,
    pub failure: Option<VerifyFailure>,
    pub entries_checked: usize,
}

impl VerifyReport {
    pub fn intact(entries_checked: usize) -> Self {
        Self {
            ok: true,
            first_bad_index: None,
            failure: None,
            entries_checked,
        }
    }

    pub fn broken(index: usize, failure: VerifyFailure) -> Self {
        Self {
            ok: false,
            first_bad_index: Some(index),
            failure: Some(failure),
            entries_checked: index + 1,
        }
    }
}

impl std::fmt::Display for VerifyReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.first_bad_index, self.failure) {
            (Some(index), Some(failure)) => {
                write!(f, "TAMPERED at entry {} ({})", index, failure.as_str())
            }
            _ => write!(f, "INTACT ({} entries)", self.entries_checked),
        }
    }
}

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("ledger I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ledger serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("ledger database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("ledger record {index} is unreadable, cannot resume chain")]
    Corrupt { index: usize },
}
