//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "PredictPath Response";

/// Audit ledger file name inside the data directory
pub const DEFAULT_LEDGER_FILE: &str = "execution_audit.log";

/// Data directory name under the platform's local data dir
pub const DATA_DIR_NAME: &str = "predictpath";

/// Default adapter timeout (milliseconds)
pub const DEFAULT_ADAPTER_TIMEOUT_MS: u64 = 5000;

/// Actions processed at once. 1 = strictly sequential.
pub const DEFAULT_MAX_PARALLEL: usize = 1;

/// Executor recorded for autonomous actions
pub const DEFAULT_EXECUTOR: &str = "System";

/// Default report file for the `execute` command
pub const DEFAULT_REPORT_FILE: &str = "execution_report.json";

// ============================================
// Environment variables
// ============================================

pub const ENV_LEDGER_PATH: &str = "RESPONSE_LEDGER_PATH";
pub const ENV_POLICY_FILE: &str = "RESPONSE_POLICY_FILE";
pub const ENV_ADAPTER_TIMEOUT_MS: &str = "RESPONSE_ADAPTER_TIMEOUT_MS";
pub const ENV_MAX_PARALLEL: &str = "RESPONSE_MAX_PARALLEL";
pub const ENV_EXECUTOR: &str = "RESPONSE_EXECUTOR";
pub const ENV_LIVE_COMMANDS: &str = "RESPONSE_LIVE_COMMANDS";

/// `{data_local_dir}/predictpath/execution_audit.log`, or the working
/// directory when the platform has no data dir
pub fn default_ledger_path() -> std::path::PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join(DATA_DIR_NAME))
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join(DEFAULT_LEDGER_FILE)
}
