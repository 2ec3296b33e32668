//! Logic Module - Business Logic & Engines
//!
//! Chứa các engines xử lý: Policy, Adapters, Ledger, Execution.
//!
//! ## Layout
//! - `policy/` - Action catalog and gating decisions (pure)
//! - `response/` - Adapters, control plane, rollback tokens
//! - `ledger/` - Hash-chained append-only history
//! - `execution/` - Per-action orchestration and reports
//! - `config` - Runtime configuration from the environment

pub mod config;
pub mod policy;
pub mod response;
pub mod ledger;
pub mod execution;
