//! Execution errors
//!
//! Policy outcomes and adapter failures are results, not errors. Only
//! conditions that stop the batch end up here.

use std::path::PathBuf;

use crate::logic::ledger::LedgerError;

use super::types::ExecutionStatus;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Audit ledger write failed: {0}")]
    Ledger(#[from] LedgerError),
    #[error("Worker task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("Input file not found or unreadable: {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid JSON in response plan: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Response plan must be a JSON array or object of decision records")]
    NotAList,
}

#[derive(Debug, thiserror::Error)]
pub enum RollbackError {
    #[error("Action {action_id} was never attempted (status: {status})")]
    NotExecuted {
        action_id: String,
        status: ExecutionStatus,
    },
    #[error("Action {action_id} has no rollback available")]
    NoRollback { action_id: String },
    #[error("Action {action_id} was already rolled back")]
    AlreadyRolledBack { action_id: String },
    #[error("Rollback of {action_id} failed: {message}")]
    Failed { action_id: String, message: String },
    #[error("Audit ledger error: {0}")]
    Ledger(#[from] LedgerError),
}
