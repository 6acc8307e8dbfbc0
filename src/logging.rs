//! Logging setup.
//!
//! Human-readable timestamped lines go to stderr and, best-effort, to a
//! persistent `scan.log` in the working directory. A log file that cannot
//! be opened degrades to console-only logging rather than aborting.

use std::fs::OpenOptions;
use std::sync::Arc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Log file appended to on every run.
pub const LOG_FILE: &str = "scan.log";

/// Install the global subscriber. `RUST_LOG` overrides the level chosen by
/// `verbose`.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }));

    let console_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let file_layer = OpenOptions::new()
        .create(true)
        .append(true)
        .open(LOG_FILE)
        .ok()
        .map(|file| {
            fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Arc::new(file))
        });

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .init();
}
