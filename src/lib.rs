//! PredictPath Response - Controlled Response Execution Core
//!
//! Takes recommended response actions, gates them through a safety
//! policy, runs the permitted ones through capability adapters with a
//! rollback token prepared first, and records every outcome in a
//! tamper-evident audit ledger.

pub mod constants;
pub mod logic;

pub use logic::config::{ConfigError, ResponseConfig};
pub use logic::execution::{
    load_plan, parse_plan, render_board, EngineError, EngineSettings, ExecutionEngine,
    ExecutionReport, ExecutionResult, ExecutionStatus, InputError, RollbackError,
};
pub use logic::ledger::{AuditLedger, JsonlStore, VerifyReport};
pub use logic::policy::{ActionCategory, ExecutionMode, PolicyConfig, PolicyDecision, PolicyEngine};
pub use logic::response::{
    AdapterRegistry, ControlPlane, LoggingControlPlane, RollbackToken, ShellControlPlane,
};
