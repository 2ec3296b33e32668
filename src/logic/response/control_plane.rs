//! Control Plane
//!
//! Seam between adapters and the host. Adapters build commands, a
//! `ControlPlane` decides whether they really run.

use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;

use crate::constants::DEFAULT_ADAPTER_TIMEOUT_MS;

use super::types::ControlCommand;

#[derive(Debug, thiserror::Error)]
pub enum ControlPlaneError {
    #[error("Command '{command}' failed ({exit_code}): {stderr}")]
    CommandFailed {
        command: String,
        exit_code: i32,
        stderr: String,
    },
    #[error("Failed to spawn '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Command '{command}' timed out after {timeout_ms} ms and was killed")]
    TimedOut { command: String, timeout_ms: u128 },
    #[error("Failed to wait for '{command}': {source}")]
    Wait {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

/// Called from blocking context (`spawn_blocking` or a plain thread),
/// never directly from an async task.
pub trait ControlPlane: Send + Sync {
    /// Issue `command`, returning its output on success
    fn issue(&self, command: &ControlCommand) -> Result<String, ControlPlaneError>;

    fn name(&self) -> &'static str;
}

// ============================================================================
// LOGGING (DEFAULT)
// ============================================================================

/// Logs commands without running them
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingControlPlane;

impl ControlPlane for LoggingControlPlane {
    fn issue(&self, command: &ControlCommand) -> Result<String, ControlPlaneError> {
        log::info!("[ControlPlane] (not executed) {}", command);
        Ok(String::new())
    }

    fn name(&self) -> &'static str {
        "logging"
    }
}

// ============================================================================
// SHELL
// ============================================================================

/// Runs commands as child processes.
///
/// A child still running at `timeout` is killed, so a timed-out command
/// never lands after its result was recorded.
#[derive(Debug, Clone, Copy)]
pub struct ShellControlPlane {
    timeout: Duration,
}

impl Default for ShellControlPlane {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_ADAPTER_TIMEOUT_MS))
    }
}

impl ShellControlPlane {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Spawn the child and wait for it, killing it on timeout
    pub async fn run(&self, command: &ControlCommand) -> Result<String, ControlPlaneError> {
        log::warn!("[ControlPlane] Running: {}", command);

        let child = Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| ControlPlaneError::Spawn {
                command: command.to_string(),
                source,
            })?;

        // On timeout the wait future drops the child, which kills it
        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(source)) => {
                return Err(ControlPlaneError::Wait {
                    command: command.to_string(),
                    source,
                })
            }
            Err(_) => {
                log::error!("[ControlPlane] Killed after {:?}: {}", self.timeout, command);
                return Err(ControlPlaneError::TimedOut {
                    command: command.to_string(),
                    timeout_ms: self.timeout.as_millis(),
                });
            }
        };

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
        } else {
            Err(ControlPlaneError::CommandFailed {
                command: command.program.clone(),
                exit_code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}

impl ControlPlane for ShellControlPlane {
    fn issue(&self, command: &ControlCommand) -> Result<String, ControlPlaneError> {
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle.block_on(self.run(command)),
            Err(_) => {
                let runtime = tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
                    .map_err(|source| ControlPlaneError::Spawn {
                        command: command.to_string(),
                        source,
                    })?;
                runtime.block_on(self.run(command))
            }
        }
    }

    fn name(&self) -> &'static str {
        "shell"
    }
}
