//! Execution Module
//!
//! Điều phối từng action: policy → adapter → ledger.
//!
//! ## Structure
//! - `types`: Input actions, results, report
//! - `input`: Lenient response-plan parsing
//! - `engine`: `ExecutionEngine` (process_plan / rollback)
//! - `board`: Terminal summary
//! - `error`: Engine, input and rollback errors

pub mod types;
pub mod error;
pub mod input;
pub mod engine;
pub mod board;


pub use types::{
    Action,
    ActionEntry,
    ExecutionReport,
    ExecutionResult,
    ExecutionStatus,
    MalformedAction,
    PlannedAction,
    SummaryStats,
    Target,
    TargetType,
};

pub use error::{EngineError, InputError, RollbackError};
pub use input::{load_plan, parse_plan};
pub use engine::{EngineSettings, ExecutionEngine};
pub use board::render_board;
