//! PredictPath Response - CLI Entry Point

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use predictpath_response::constants::{APP_NAME, APP_VERSION, DEFAULT_REPORT_FILE};
use predictpath_response::{
    load_plan, render_board, AdapterRegistry, AuditLedger, ControlPlane, EngineSettings,
    ExecutionEngine, ExecutionReport, JsonlStore, LoggingControlPlane, PolicyEngine,
    ResponseConfig, ShellControlPlane,
};

#[derive(Parser)]
#[command(name = "predictpath-response", version, about = "Controlled Response Execution Engine")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Execute a response plan and write the execution report
    Execute {
        /// Response plan (JSON array of decision records)
        plan: PathBuf,
        /// Output path for the JSON report
        #[arg(long, default_value = DEFAULT_REPORT_FILE)]
        output: PathBuf,
        /// Audit ledger path (overrides RESPONSE_LEDGER_PATH)
        #[arg(long)]
        ledger: Option<PathBuf>,
    },
    /// Verify the audit ledger hash chain
    Verify {
        #[arg(long)]
        ledger: Option<PathBuf>,
    },
    /// Roll back a successfully executed action from a saved report
    Rollback {
        report: PathBuf,
        action_id: String,
        #[arg(long)]
        ledger: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            log::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let mut config = ResponseConfig::from_env().context("Invalid configuration")?;

    match cli.command {
        Command::Execute { plan, output, ledger } => {
            override_ledger(&mut config, ledger);
            log::info!("Starting {} v{}...", APP_NAME, APP_VERSION);

            let engine = build_engine(&config)?;
            log::info!("Loading input from {}...", plan.display());
            let planned = load_plan(&plan)?;

            let report = engine.process_plan(planned).await?;
            println!("{}", render_board(&report));

            write_report(&output, &report)?;
            log::info!("Execution Report written to {}", output.display());
            log::info!("Audit Log written to {}", config.ledger_path.display());
            Ok(ExitCode::SUCCESS)
        }

        Command::Verify { ledger } => {
            override_ledger(&mut config, ledger);
            let ledger = open_ledger(&config.ledger_path)?;
            let report = ledger.verify()?;
            println!("{}: {}", ledger.describe(), report);
            Ok(if report.ok {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }

        Command::Rollback {
            report,
            action_id,
            ledger,
        } => {
            override_ledger(&mut config, ledger);
            let saved = read_report(&report)?;
            let Some(executed) = saved.find(&action_id) else {
                bail!("Action {} not found in {}", action_id, report.display());
            };

            let engine = build_engine(&config)?;
            let result = engine.rollback(executed).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn override_ledger(config: &mut ResponseConfig, ledger: Option<PathBuf>) {
    if let Some(path) = ledger {
        config.ledger_path = path;
    }
}

fn open_ledger(path: &Path) -> Result<AuditLedger> {
    let store = JsonlStore::open(path)
        .with_context(|| format!("Cannot open audit ledger {}", path.display()))?;
    AuditLedger::open(store).with_context(|| format!("Audit ledger {} is unusable", path.display()))
}

fn build_engine(config: &ResponseConfig) -> Result<ExecutionEngine> {
    let control: Arc<dyn ControlPlane> = if config.live_commands {
        log::warn!("Live commands enabled: control-plane commands will run on this host");
        Arc::new(ShellControlPlane::new(config.adapter_timeout))
    } else {
        Arc::new(LoggingControlPlane)
    };

    let settings = EngineSettings {
        executor: config.executor.clone(),
        adapter_timeout: config.adapter_timeout,
        max_parallel: config.max_parallel,
    };

    Ok(ExecutionEngine::new(
        PolicyEngine::new(config.policy.clone()),
        AdapterRegistry::default(),
        control,
        Arc::new(open_ledger(&config.ledger_path)?),
        settings,
    ))
}

fn write_report(path: &Path, report: &ExecutionReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json).with_context(|| format!("Cannot write report {}", path.display()))
}

fn read_report(path: &Path) -> Result<ExecutionReport> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read report {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid report {}", path.display()))
}
