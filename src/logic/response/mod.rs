//! Response Module - Adapters & Rollback
//!
//! Mục đích: Chuyển action đã được policy cho phép thành lệnh trên host.
//!
//! # Components
//! - `types.rs`: ControlCommand, AdapterOutcome, RollbackToken
//! - `control_plane.rs`: Where commands actually go (logged or run)
//! - `identity.rs`, `network.rs`, `audit_config.rs`: Per-capability commands
//! - `adapters.rs`: Closed adapter set (execute + generate_rollback)
//! - `registry.rs`: Action type → adapter routing

pub mod types;
pub mod control_plane;
pub mod identity;
pub mod network;
pub mod audit_config;
pub mod adapters;
pub mod registry;

pub use types::{ActionParams, AdapterOutcome, CommandPlan, ControlCommand, RollbackToken};
pub use control_plane::{ControlPlane, ControlPlaneError, LoggingControlPlane, ShellControlPlane};
pub use adapters::Adapter;
pub use registry::AdapterRegistry;
