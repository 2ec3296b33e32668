//! Policy Module
//!
//! Quyết định action dựa trên ActionCategory, confidence và blast radius.
//! Không có I/O, không có state: cùng input luôn cho cùng output.
//!
//! ## Structure
//! - `types`: Core types (ActionCategory, ExecutionMode, PolicyDecision)
//! - `catalog`: Static action type → category table
//! - `config`: Thresholds and blast-radius weights
//! - `engine`: Decision logic
//!
//! ## Usage
//! ```ignore
//! use crate::logic::policy::{decide, ExecutionMode};
//!
//! let decision = decide("Block Inbound SMB", 0.9, 1);
//! match decision.mode {
//!     ExecutionMode::Auto => run_adapter(),
//!     ExecutionMode::Staged => dry_run(),
//!     ExecutionMode::Rejected => block(),
//! }
//! ```

pub mod types;
pub mod catalog;
pub mod config;
pub mod engine;

#[cfg(test)]
mod tests;

// Re-export main types for convenience
pub use types::{ActionCategory, ExecutionMode, PolicyDecision};

pub use config::{BlastRadiusWeights, PolicyConfig};

pub use engine::{decide, decide_with_config, PolicyEngine};
