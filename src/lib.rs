//! # Pincer - a concurrent TCP port probing utility
//!
//! Pincer determines which TCP ports on a target accept a connection,
//! attempts lightweight service identification, and optionally retrieves a
//! short banner from the remote service.
//!
//! ## Example
//!
//! ```rust,ignore
//! use pincer::engine::{run_scan, ScanConfig};
//! use pincer::target::Target;
//! use std::net::{IpAddr, Ipv4Addr};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() {
//!     let target = Target::new("127.0.0.1", IpAddr::V4(Ipv4Addr::LOCALHOST));
//!     let report = run_scan(
//!         target,
//!         (1..=1024).collect(),
//!         ScanConfig::default(),
//!         CancellationToken::new(),
//!     )
//!     .await;
//!
//!     println!("{} open ports", report.stats.open);
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`target`] - host resolution (IP literal fast path, DNS fallback)
//! - [`ports`] - port set construction and range validation
//! - [`services`] - static port-to-service classification
//! - [`banner`] - best-effort banner retrieval from open ports
//! - [`probe`] - the single-port connect probe and its outcome types
//! - [`engine`] - scan orchestration: parallel and sequential modes,
//!   statistics, cancellation
//! - [`output`] - console rendering and plain/JSON file export
//! - [`error`] - fatal error types
//! - [`logging`] - tracing setup (console + log file)

pub mod banner;
pub mod cli;
pub mod engine;
pub mod error;
pub mod logging;
pub mod output;
pub mod ports;
pub mod probe;
pub mod services;
pub mod target;

// Re-export commonly used types
pub use engine::{run_scan, ScanConfig, ScanMode, ScanReport, ScanStats, StatsSnapshot};
pub use error::{ScanError, ScanResult};
pub use probe::{probe_port, ConnectStyle, PortReport, ProbeOutcome};
pub use target::Target;
