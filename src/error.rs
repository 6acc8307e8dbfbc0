//! Error types for pincer.
//!
//! Uses `thiserror` for ergonomic error definitions. Only conditions that
//! abort a run live here; per-port failures are ordinary
//! [`ProbeOutcome`](crate::probe::ProbeOutcome) values and never bubble up
//! as errors.

use thiserror::Error;

/// Fatal errors. Everything except `Interrupted` occurs before any probing.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("could not resolve host '{0}'")]
    Resolution(String),

    #[error("invalid port range '{0}': expected 'start-end' with bounds in 1-65535")]
    InvalidRange(String),

    #[error("scan interrupted")]
    Interrupted,
}

/// Result type alias for scan operations.
pub type ScanResult<T> = Result<T, ScanError>;
