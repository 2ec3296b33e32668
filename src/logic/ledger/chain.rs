//! Hash-Chained Ledger
//!
//! Single-writer append log. Every entry embeds the previous entry's hash;
//! the tail is guarded by a mutex so concurrent `append` calls are
//! linearized and can never fork the chain.

use std::marker::PhantomData;

use chrono::{SecondsFormat, Utc};
use parking_lot::Mutex;

use super::schemas::AuditRecord;
use super::store::{JsonlStore, LedgerStore};
use super::types::{
    LedgerContent, LedgerEntry, LedgerError, VerifyFailure, VerifyReport, GENESIS_HASH,
};

// ============================================================================
// LEDGER
// ============================================================================

struct ChainTail<S> {
    store: S,
    tail_hash: String,
    len: usize,
}

pub struct Ledger<C: LedgerContent, S: LedgerStore = JsonlStore> {
    inner: Mutex<ChainTail<S>>,
    _content: PhantomData<fn() -> C>,
}

impl<C: LedgerContent, S: LedgerStore> Ledger<C, S> {
    /// Open a ledger over `store`.
    ///
    /// An empty store gets a genesis entry. A non-empty store resumes from
    /// its last record, which must parse; an unreadable tail is an error
    /// rather than a silent restart of the chain.
    pub fn open(mut store: S) -> Result<Self, LedgerError> {
        let records = store.read_records()?;

        let (tail_hash, len) = match records.last() {
            None => {
                let genesis = LedgerEntry::seal(GENESIS_HASH, now_timestamp(), C::genesis());
                store.append_record(&serde_json::to_string(&genesis)?)?;
                log::info!("Created ledger with genesis entry at {}", store.describe());
                (genesis.entry_hash, 1)
            }
            Some(last) => {
                let index = records.len() - 1;
                let entry: LedgerEntry<C> =
                    serde_json::from_str(last).map_err(|_| LedgerError::Corrupt { index })?;
                log::info!(
                    "Resumed ledger at {} ({} entries)",
                    store.describe(),
                    records.len()
                );
                (entry.entry_hash, records.len())
            }
        };

        Ok(Self {
            inner: Mutex::new(ChainTail {
                store,
                tail_hash,
                len,
            }),
            _content: PhantomData,
        })
    }

    /// Chain `content` onto the tail and persist it. Returns the new entry hash.
    pub fn append(&self, content: C) -> Result<String, LedgerError> {
        let mut tail = self.inner.lock();

        let entry = LedgerEntry::seal(&tail.tail_hash, now_timestamp(), content);
        let record = serde_json::to_string(&entry)?;
        tail.store.append_record(&record)?;

        tail.tail_hash = entry.entry_hash.clone();
        tail.len += 1;
        Ok(entry.entry_hash)
    }

    /// All entries in write order, genesis first
    pub fn entries(&self) -> Result<Vec<LedgerEntry<C>>, LedgerError> {
        let tail = self.inner.lock();
        let records = tail.store.read_records()?;

        records
            .iter()
            .enumerate()
            .map(|(index, raw)| {
                serde_json::from_str(raw).map_err(|_| LedgerError::Corrupt { index })
            })
            .collect()
    }

    /// Replay the stored chain. Store I/O errors propagate; tampering is
    /// reported in the returned [`VerifyReport`].
    pub fn verify(&self) -> Result<VerifyReport, LedgerError> {
        let tail = self.inner.lock();
        let records = tail.store.read_records()?;
        let report = verify_records::<C>(&records);

        if !report.ok {
            log::error!("Ledger {} verification failed: {}", tail.store.describe(), report);
        }
        Ok(report)
    }

    pub fn tail_hash(&self) -> String {
        self.inner.lock().tail_hash.clone()
    }

    /// Entries written so far, genesis included
    pub fn len(&self) -> usize {
        self.inner.lock().len
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn describe(&self) -> String {
        self.inner.lock().store.describe()
    }
}

impl<S: LedgerStore> Ledger<AuditRecord, S> {
    /// Record one execution outcome
    pub fn log_execution(
        &self,
        action_id: &str,
        action_type: &str,
        target: &str,
        executor: &str,
        status: &str,
    ) -> Result<String, LedgerError> {
        self.append(AuditRecord::new(action_id, action_type, target, executor, status))
    }
}

// ============================================================================
// VERIFICATION
// ============================================================================

/// Verify serialized records in write order, stopping at the first bad index.
pub fn verify_records<C: LedgerContent>(records: &[String]) -> VerifyReport {
    let mut prev_hash: Option<String> = None;

    for (index, raw) in records.iter().enumerate() {
        let entry: LedgerEntry<C> = match serde_json::from_str(raw) {
            Ok(entry) => entry,
            Err(_) => return VerifyReport::broken(index, VerifyFailure::Unreadable),
        };

        let expected_prev = prev_hash.as_deref().unwrap_or(GENESIS_HASH);
        if entry.prev_hash != expected_prev {
            let failure = if index == 0 {
                VerifyFailure::BadGenesis
            } else {
                VerifyFailure::BrokenLink
            };
            return VerifyReport::broken(index, failure);
        }

        if !entry.is_intact() {
            return VerifyReport::broken(index, VerifyFailure::HashMismatch);
        }

        prev_hash = Some(entry.entry_hash);
    }

    VerifyReport::intact(records.len())
}

fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}
