//! Command-line interface definitions.
//!
//! Uses `clap` derive macros for declarative argument parsing.

use clap::Parser;
use std::path::PathBuf;

/// A concurrent TCP port probing utility.
#[derive(Parser, Debug)]
#[command(name = "pincer")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Probe TCP ports for reachable services", long_about = None)]
pub struct Args {
    /// Target IP address or hostname
    #[arg(value_name = "TARGET")]
    pub target: String,

    /// Inclusive port range to probe (e.g. "1-1000"); defaults to 1-1024
    #[arg(short, long, value_name = "START-END")]
    pub ports: Option<String>,

    /// Probe a curated list of common service ports instead of a range
    #[arg(long, conflicts_with = "ports")]
    pub top_ports: bool,

    /// Per-probe connection timeout in seconds
    #[arg(short = 't', long, default_value = "1.0", value_name = "SECONDS")]
    pub timeout: f64,

    /// Worker pool width for the parallel mode
    #[arg(short = 'T', long, default_value = "100", value_name = "N")]
    pub threads: usize,

    /// Use the stealth connect variant (still an ordinary TCP connect)
    #[arg(long)]
    pub stealth: bool,

    /// Probe ports one at a time with a delay between probes
    #[arg(long)]
    pub slow: bool,

    /// Delay between sequential probes in seconds (only with --slow)
    #[arg(long, default_value = "0.1", value_name = "SECONDS")]
    pub delay: f64,

    /// Write results to a file (.json for structured output, plain text otherwise)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Disable ANSI colors in console output
    #[arg(long)]
    pub no_color: bool,

    /// Verbose output (debug logging and a progress bar)
    #[arg(short, long)]
    pub verbose: bool,
}
