//! Pincer binary entry point.
//!
//! Wires the CLI surface to the scan engine: resolve the target, build the
//! port set, run the scan under a cancellation token hooked to ctrl-c, then
//! render and optionally export the report.

use anyhow::{ensure, Context};
use clap::Parser;
use pincer::cli::Args;
use pincer::engine::{run_scan, ScanConfig, ScanMode};
use pincer::error::ScanError;
use pincer::probe::ConnectStyle;
use pincer::{logging, output, ports, target};
use std::process::ExitCode;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    logging::init(args.verbose);
    if args.no_color {
        console::set_colors_enabled(false);
    }

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    ensure!(args.timeout > 0.0, "timeout must be positive");
    ensure!(args.delay >= 0.0, "delay must not be negative");
    ensure!(args.threads > 0, "worker pool width must be at least 1");

    let target = target::resolve(&args.target).await?;
    let port_set = ports::build_port_set(args.ports.as_deref(), args.top_ports)?;

    info!(
        "scanning {} ports on {} ({} mode)",
        port_set.len(),
        target,
        if args.slow { "sequential" } else { "parallel" }
    );

    // Ctrl-c stops dispatch of new probes; in-flight probes finish and are
    // counted, then the partial report is rendered.
    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("interrupt received, stopping dispatch");
            ctrl_c.cancel();
        }
    });

    let config = ScanConfig {
        timeout: Duration::from_secs_f64(args.timeout),
        workers: args.threads,
        style: if args.stealth {
            ConnectStyle::Stealth
        } else {
            ConnectStyle::Standard
        },
        mode: if args.slow {
            ScanMode::Sequential {
                delay: Duration::from_secs_f64(args.delay),
            }
        } else {
            ScanMode::Parallel
        },
        progress: args.verbose,
    };

    let report = run_scan(target, port_set, config, cancel).await;

    output::print_report(&report);

    if let Some(path) = &args.output {
        output::save_report(&report, path)
            .with_context(|| format!("failed to write results to {}", path.display()))?;
        info!("results saved to {}", path.display());
    }

    // Canonical exit code for interrupted runs is 1: the requested scan did
    // not complete, even though partial results were shown.
    if report.interrupted {
        return Err(ScanError::Interrupted.into());
    }

    Ok(())
}
