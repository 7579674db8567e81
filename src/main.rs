// SPDX-License-Identifier: Apache-2.0
//! main
//!
//! Layer: Composition Root
//! Purpose:
//! - Parse arguments, load configuration once, wire adapters into the
//!   control loop and run it until SIGINT/SIGTERM.
//!
//! Notes:
//! - Standard file header. Keep stable to avoid churn.

use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use ifswitchd::{
    app::{actuator::Actuator, prober::Prober, ControlLoop},
    config::{Overrides, Settings},
    domain::policy::Policy,
    infra::{
        control_commands::CommandInterfaceControl, interval_ticker::IntervalTicker,
        process_runner::ProcessRunner, status_commands::CommandStatusSource,
    },
    ports::{
        command::CommandRunner, interface_control::InterfaceControl,
        status_source::StatusSource,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
struct Args {
    /// TOML configuration file.
    #[arg(long, env = "IFSWITCHD_CONFIG")]
    config: Option<PathBuf>,

    /// Wired interface, highest priority first. Repeat for more.
    #[arg(long = "wired", value_name = "IFACE")]
    wired: Vec<String>,

    /// Wireless interface, highest priority first. Repeat for more.
    #[arg(long = "wireless", value_name = "IFACE")]
    wireless: Vec<String>,

    /// Seconds between reconciliation cycles.
    #[arg(long, value_name = "SECS")]
    interval: Option<u64>,

    /// Run a single reconciliation cycle and exit.
    #[arg(long)]
    once: bool,

    /// Log what would change without touching any interface.
    #[arg(long)]
    dry_run: bool,

    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            wired: (!self.wired.is_empty()).then(|| self.wired.clone()),
            wireless: (!self.wireless.is_empty()).then(|| self.wireless.clone()),
            poll_interval_secs: self.interval,
            dry_run: self.dry_run.then_some(true),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log_format);

    let settings = Settings::load(args.config.as_deref(), &args.overrides())
        .context("failed to load configuration")?;
    let config = settings
        .resolve(std::env::var_os("PATH").as_deref())
        .context("invalid configuration")?;

    let names: Vec<String> = config.interfaces.iter().map(ToString::to_string).collect();
    info!(
        interfaces=?names,
        interval=?config.poll_interval,
        dry_run=%config.dry_run,
        "ifswitchd starting"
    );

    let runner: Arc<dyn CommandRunner> = Arc::new(ProcessRunner::new(config.command_timeout));
    let status: Arc<dyn StatusSource> = Arc::new(CommandStatusSource::new(
        runner.clone(),
        config.tools.clone(),
        config.link_probes,
    ));
    let control: Arc<dyn InterfaceControl> =
        Arc::new(CommandInterfaceControl::new(runner, config.tools.clone()));

    let mut control_loop = ControlLoop::new(
        config.interfaces.clone(),
        Prober::new(status),
        Policy::new(config.report_mode),
        Actuator::new(control, config.interfaces.clone()).dry_run(config.dry_run),
        Box::new(IntervalTicker::new(config.poll_interval)),
    );

    if args.once {
        let outcome = control_loop.run_cycle().await;
        info!(decision=?outcome.decision, ok=%outcome.actuation.is_ok(), "single cycle complete");
        return Ok(());
    }

    info!("daemon running (terminate with SIGTERM or Ctrl+C)");
    control_loop.run_until(shutdown_signal()).await;
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error=%e, "cannot listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error=%e, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Ctrl+C received; shutting down"),
        _ = terminate => info!("SIGTERM received; shutting down"),
    }
}
