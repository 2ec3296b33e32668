//! Ledger Module - Tamper-Evident History
//!
//! Append-only, hash-chained log shared by three histories: the execution
//! audit log, the governance trust ledger and the ingestion event chain.
//!
//! ## Structure
//! - `types`: Entry layout, content trait, verify report, errors
//! - `chain`: `Ledger` (append / verify / entries)
//! - `schemas`: Content schemas (`AuditRecord`, `TrustEvent`, `EventRecord`)
//! - `store`: Storage backends (JSONL file, SQLite, memory)
//!
//! ## Usage
//! ```ignore
//! let ledger = AuditLedger::open(JsonlStore::open("execution_audit.log")?)?;
//! let hash = ledger.log_execution(&id, "Isolate Host", "Host:h1", "System", "blocked")?;
//! assert!(ledger.verify()?.ok);
//! ```

pub mod types;
pub mod chain;
pub mod schemas;
pub mod store;


pub use types::{
    LedgerContent,
    LedgerEntry,
    LedgerError,
    VerifyFailure,
    VerifyReport,
    GENESIS_HASH,
    GENESIS_ID,
};

pub use chain::{Ledger, verify_records};
pub use schemas::{AuditRecord, TrustEvent, EventRecord};
pub use store::{LedgerStore, JsonlStore, SqliteStore, MemoryStore};

/// Execution audit log
pub type AuditLedger<S = JsonlStore> = Ledger<AuditRecord, S>;

/// Governance trust ledger
pub type TrustLedger<S = SqliteStore> = Ledger<TrustEvent, S>;

/// Ingestion event-integrity chain
pub type EventChain<S = JsonlStore> = Ledger<EventRecord, S>;
