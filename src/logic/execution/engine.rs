//! Execution Engine
//!
//! Orchestration per action:
//! blast radius → policy decision → (Auto) rollback token, adapter call
//! → outcome → exactly one audit ledger entry.
//!
//! Actions never influence each other. With `max_parallel > 1` they run
//! concurrently but the report keeps input order and ledger appends stay
//! linearized by the ledger's own lock.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::constants::{DEFAULT_ADAPTER_TIMEOUT_MS, DEFAULT_EXECUTOR, DEFAULT_MAX_PARALLEL};
use crate::logic::ledger::{AuditLedger, JsonlStore, LedgerStore};
use crate::logic::policy::{ExecutionMode, PolicyEngine};
use crate::logic::response::{
    ActionParams, Adapter, AdapterOutcome, AdapterRegistry, ControlCommand, ControlPlane,
};

use super::error::{EngineError, RollbackError};
use super::types::*;

// ============================================================================
// SETTINGS
// ============================================================================

#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub executor: String,
    pub adapter_timeout: Duration,
    pub max_parallel: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            executor: DEFAULT_EXECUTOR.to_string(),
            adapter_timeout: Duration::from_millis(DEFAULT_ADAPTER_TIMEOUT_MS),
            max_parallel: DEFAULT_MAX_PARALLEL,
        }
    }
}

// ============================================================================
// ENGINE
// ============================================================================

pub struct ExecutionEngine<S: LedgerStore + 'static = JsonlStore> {
    policy: Arc<PolicyEngine>,
    registry: Arc<AdapterRegistry>,
    control: Arc<dyn ControlPlane>,
    ledger: Arc<AuditLedger<S>>,
    settings: EngineSettings,
}

impl<S: LedgerStore + 'static> Clone for ExecutionEngine<S> {
    fn clone(&self) -> Self {
        Self {
            policy: Arc::clone(&self.policy),
            registry: Arc::clone(&self.registry),
            control: Arc::clone(&self.control),
            ledger: Arc::clone(&self.ledger),
            settings: self.settings.clone(),
        }
    }
}

impl<S: LedgerStore + 'static> ExecutionEngine<S> {
    pub fn new(
        policy: PolicyEngine,
        registry: AdapterRegistry,
        control: Arc<dyn ControlPlane>,
        ledger: Arc<AuditLedger<S>>,
        settings: EngineSettings,
    ) -> Self {
        Self {
            policy: Arc::new(policy),
            registry: Arc::new(registry),
            control,
            ledger,
            settings,
        }
    }

    pub fn ledger(&self) -> &AuditLedger<S> {
        &self.ledger
    }

    pub fn ledger_handle(&self) -> Arc<AuditLedger<S>> {
        Arc::clone(&self.ledger)
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Process every planned action and build the report.
    /// Fails only when the audit ledger cannot be written.
    pub async fn process_plan(&self, plan: Vec<PlannedAction>) -> Result<ExecutionReport, EngineError> {
        log::info!(
            "[Engine] Processing {} actions (max_parallel={}, control_plane={})",
            plan.len(),
            self.settings.max_parallel,
            self.control.name()
        );

        let executions = if self.settings.max_parallel > 1 && plan.len() > 1 {
            self.process_parallel(plan).await?
        } else {
            let mut executions = Vec::with_capacity(plan.len());
            for planned in &plan {
                executions.push(self.process_planned(planned).await?);
            }
            executions
        };

        let report = ExecutionReport::new(executions);
        let stats = &report.summary_stats;
        log::info!(
            "[Engine] Done: success={} failed={} pending={} blocked={} total={}",
            stats.success,
            stats.failed,
            stats.pending,
            stats.blocked,
            stats.total
        );
        Ok(report)
    }

    async fn process_parallel(&self, plan: Vec<PlannedAction>) -> Result<Vec<ExecutionResult>, EngineError> {
        let semaphore = Arc::new(Semaphore::new(self.settings.max_parallel));
        let mut tasks = JoinSet::new();
        let total = plan.len();

        for (index, planned) in plan.into_iter().enumerate() {
            let engine = self.clone();
            let semaphore = Arc::clone(&semaphore);
            tasks.spawn(async move {
                // Semaphore is never closed
                let _permit = semaphore.acquire_owned().await.ok();
                engine.process_planned(&planned).await.map(|r| (index, r))
            });
        }

        let mut slots: Vec<Option<ExecutionResult>> = vec![None; total];
        while let Some(joined) = tasks.join_next().await {
            let (index, result) = joined??;
            slots[index] = Some(result);
        }
        Ok(slots.into_iter().flatten().collect())
    }

    pub async fn process_planned(&self, planned: &PlannedAction) -> Result<ExecutionResult, EngineError> {
        match &planned.entry {
            ActionEntry::Valid(action) => {
                self.process_action(&planned.session_id, planned.confidence, action).await
            }
            ActionEntry::Malformed(bad) => self.block_malformed(&planned.session_id, bad),
        }
    }

    /// Run one action through policy, adapter and ledger
    pub async fn process_action(
        &self,
        session_id: &str,
        confidence: f64,
        action: &Action,
    ) -> Result<ExecutionResult, EngineError> {
        let blast_radius = action
            .target
            .target_type
            .blast_radius(&self.policy.config().blast_radius);
        let decision = self.policy.decide(&action.action_type, confidence, blast_radius);

        log::info!(
            "[Engine] {} on {} → {} [{}] {}",
            action.action_type,
            action.target.label(),
            decision.mode,
            decision.category,
            decision.reason
        );

        let mut result = ExecutionResult::pending(
            session_id,
            action.target.label(),
            &action.action_type,
            decision.mode,
            &self.settings.executor,
            decision.reason.clone(),
        );

        match decision.mode {
            ExecutionMode::Auto => {
                let adapter = self.registry.resolve(&action.action_type);
                let params = ActionParams::new();

                // Rollback first: the token exists even if execution fails
                result.rollback_token = Some(adapter.generate_rollback(
                    &result.action_id,
                    &action.target.identifier,
                    &action.action_type,
                    &params,
                ));

                let outcome = self.run_adapter(adapter, action, params).await;
                if outcome.success {
                    result.final_status = ExecutionStatus::Success;
                    result.message = format!("Executed: {}", outcome.message);
                } else {
                    log::warn!("[Engine] {} failed: {}", action.action_type, outcome.message);
                    result.final_status = ExecutionStatus::Failed;
                    result.message = format!("Execution Failed: {}", outcome.message);
                }
            }

            ExecutionMode::Staged => {
                result.final_status = ExecutionStatus::Pending;
                result.message = format!("Staged for Approval: {}", decision.reason);
                result.dry_run_output = Some(format!(
                    "[DRY RUN] Would execute on {}: {}",
                    action.target.identifier, action.action_type
                ));
            }

            ExecutionMode::Rejected => {
                result.final_status = ExecutionStatus::Blocked;
            }
        }

        self.record(&mut result)?;
        Ok(result)
    }

    fn block_malformed(&self, session_id: &str, bad: &MalformedAction) -> Result<ExecutionResult, EngineError> {
        log::warn!("[Engine] Blocking malformed action {}: {}", bad.action_type, bad.error);

        let mut result = ExecutionResult::pending(
            session_id,
            bad.target.clone(),
            &bad.action_type,
            ExecutionMode::Rejected,
            &self.settings.executor,
            format!("Malformed action: {}", bad.error),
        );
        result.final_status = ExecutionStatus::Blocked;

        self.record(&mut result)?;
        Ok(result)
    }

    async fn run_adapter(&self, adapter: Adapter, action: &Action, params: ActionParams) -> AdapterOutcome {
        let control = Arc::clone(&self.control);
        let target = action.target.identifier.clone();
        let action_type = action.action_type.clone();

        let task = tokio::task::spawn_blocking(move || {
            adapter.execute(control.as_ref(), &target, &action_type, &params)
        });

        match tokio::time::timeout(self.settings.adapter_timeout, task).await {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(e)) => AdapterOutcome::failed(format!("Adapter task aborted: {}", e)),
            Err(_) => AdapterOutcome::failed(format!(
                "Adapter timed out after {} ms",
                self.settings.adapter_timeout.as_millis()
            )),
        }
    }

    /// Append the ledger entry for `result` and stamp its hash
    fn record(&self, result: &mut ExecutionResult) -> Result<(), EngineError> {
        let hash = self.ledger.log_execution(
            &result.action_id,
            &result.action_name,
            &result.target,
            &result.executor,
            result.final_status.as_str(),
        )?;
        result.audit_hash = Some(hash);
        Ok(())
    }

    // ========================================================================
    // ROLLBACK
    // ========================================================================

    /// Undo an executed action using its rollback token.
    ///
    /// `Failed` results are accepted too: a failed or timed-out command may
    /// still have changed the host, and the inverse commands are idempotent.
    pub async fn rollback(&self, executed: &ExecutionResult) -> Result<ExecutionResult, RollbackError> {
        let action_id = executed.action_id.clone();

        if !matches!(
            executed.final_status,
            ExecutionStatus::Success | ExecutionStatus::Failed
        ) {
            return Err(RollbackError::NotExecuted {
                action_id,
                status: executed.final_status,
            });
        }

        let Some((token, command)) = executed
            .rollback_token
            .as_ref()
            .filter(|t| t.is_reversible())
            .and_then(|t| t.command.clone().map(|c| (t, c)))
        else {
            return Err(RollbackError::NoRollback { action_id });
        };

        if self.already_rolled_back(&action_id)? {
            return Err(RollbackError::AlreadyRolledBack { action_id });
        }

        log::warn!("[Engine] Rolling back {} ({}): {}", executed.action_name, action_id, command);

        if let Err(message) = self.issue(command).await {
            log::error!("[Engine] Rollback of {} failed: {}", action_id, message);
            return Err(RollbackError::Failed { action_id, message });
        }

        let mut result = executed.clone();
        result.final_status = ExecutionStatus::RolledBack;
        result.timestamp = chrono::Utc::now();
        result.executor = self.settings.executor.clone();
        result.message = format!("Rolled back: {}", token.rollback_command);
        result.dry_run_output = None;
        result.rollback_token = None;

        let hash = self.ledger.log_execution(
            &result.action_id,
            &result.action_name,
            &result.target,
            &result.executor,
            result.final_status.as_str(),
        )?;
        result.audit_hash = Some(hash);
        Ok(result)
    }

    fn already_rolled_back(&self, action_id: &str) -> Result<bool, RollbackError> {
        let rolled_back = ExecutionStatus::RolledBack.as_str();
        Ok(self
            .ledger
            .entries()?
            .iter()
            .any(|e| e.content.action_id == action_id && e.content.status == rolled_back))
    }

    async fn issue(&self, command: ControlCommand) -> Result<String, String> {
        let control = Arc::clone(&self.control);
        let task = tokio::task::spawn_blocking(move || control.issue(&command));

        match tokio::time::timeout(self.settings.adapter_timeout, task).await {
            Ok(Ok(Ok(output))) => Ok(output),
            Ok(Ok(Err(e))) => Err(e.to_string()),
            Ok(Err(e)) => Err(format!("Control plane task aborted: {}", e)),
            Err(_) => Err(format!(
                "Timed out after {} ms",
                self.settings.adapter_timeout.as_millis()
            )),
        }
    }
}
