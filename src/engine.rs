//! Scan orchestration.
//!
//! Drives [`probe_port`] across the full port set in one of two modes: a
//! semaphore-bounded parallel scan with unordered completion, or a
//! rate-limited sequential scan in ascending port order. Both modes feed
//! the same shared statistics counters and produce the same report shape,
//! so classification semantics cannot drift between them.

use crate::probe::{probe_port, ConnectStyle, PortReport, ProbeOutcome};
use crate::target::Target;
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;

/// Default parallel worker pool width.
pub const DEFAULT_WORKERS: usize = 100;

/// Default inter-probe delay for the sequential mode.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(100);

/// Running counters, shared across workers in parallel mode. Updated
/// atomically; increment-then-read races would otherwise lose counts.
#[derive(Debug, Default)]
pub struct ScanStats {
    total: AtomicUsize,
    open: AtomicUsize,
    closed: AtomicUsize,
    filtered: AtomicUsize,
    errors: AtomicUsize,
}

impl ScanStats {
    /// Record one finished probe. Bumps `total` and exactly one bucket.
    pub fn record(&self, outcome: &ProbeOutcome) {
        self.total.fetch_add(1, Ordering::Relaxed);
        let bucket = match outcome {
            ProbeOutcome::Open { .. } => &self.open,
            ProbeOutcome::Closed => &self.closed,
            ProbeOutcome::Filtered { .. } => &self.filtered,
            ProbeOutcome::Error { .. } => &self.errors,
        };
        bucket.fetch_add(1, Ordering::Relaxed);
    }

    /// Point-in-time copy of the counters.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            total: self.total.load(Ordering::Relaxed),
            open: self.open.load(Ordering::Relaxed),
            closed: self.closed.load(Ordering::Relaxed),
            filtered: self.filtered.load(Ordering::Relaxed),
            errors: self.errors.load(Ordering::Relaxed),
        }
    }
}

/// Immutable copy of the counters, as handed to the output layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    pub total: usize,
    pub open: usize,
    pub closed: usize,
    pub filtered: usize,
    pub errors: usize,
}

/// How the engine walks the port set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMode {
    /// Fixed-width worker pool; no completion-order guarantee.
    Parallel,
    /// One probe at a time with a fixed delay in between, ascending order.
    Sequential { delay: Duration },
}

/// Configuration for one scan run.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub timeout: Duration,
    pub workers: usize,
    pub style: ConnectStyle,
    pub mode: ScanMode,
    /// Show an indicatif progress bar while scanning.
    pub progress: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(1),
            workers: DEFAULT_WORKERS,
            style: ConnectStyle::Standard,
            mode: ScanMode::Parallel,
            progress: false,
        }
    }
}

/// Final result of a run. Immutable once constructed.
#[derive(Debug)]
pub struct ScanReport {
    pub target: Target,
    /// Retained outcomes, sorted by port. Closed ports are counted in the
    /// statistics but not retained here.
    pub reports: Vec<PortReport>,
    pub stats: StatsSnapshot,
    pub elapsed: Duration,
    /// True when the run was cut short by cancellation; the statistics
    /// cover only the probes that actually ran.
    pub interrupted: bool,
}

/// Execute a complete scan of `ports` against `target`.
///
/// After an uninterrupted run, `stats.total` equals the size of the port
/// set and the four buckets sum to it. Cancelling `cancel` stops dispatch
/// of new probes promptly; probes already past the dispatch gate finish and
/// are counted.
pub async fn run_scan(
    target: Target,
    ports: Vec<u16>,
    config: ScanConfig,
    cancel: CancellationToken,
) -> ScanReport {
    let start = Instant::now();
    let stats = Arc::new(ScanStats::default());

    tracing::info!(
        target = %target,
        ports = ports.len(),
        mode = ?config.mode,
        "starting scan"
    );

    let progress = if config.progress {
        let pb = ProgressBar::new(ports.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%)")
                .unwrap()
                .progress_chars("=>-"),
        );
        Some(pb)
    } else {
        None
    };

    let mut reports = match config.mode {
        ScanMode::Parallel => {
            parallel_scan(&target, &ports, &config, &stats, &cancel, progress.as_ref()).await
        }
        ScanMode::Sequential { delay } => {
            sequential_scan(&target, &ports, &config, delay, &stats, &cancel, progress.as_ref())
                .await
        }
    };

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    // Closed ports live on in the counters only; the retained collection is
    // sorted so unordered parallel completion still aggregates
    // deterministically.
    reports.retain(|r| !matches!(r.outcome, ProbeOutcome::Closed));
    reports.sort_by_key(|r| r.port);

    let snapshot = stats.snapshot();
    let interrupted = cancel.is_cancelled();
    let elapsed = start.elapsed();

    tracing::info!(
        open = snapshot.open,
        closed = snapshot.closed,
        filtered = snapshot.filtered,
        errors = snapshot.errors,
        elapsed_ms = elapsed.as_millis() as u64,
        interrupted,
        "scan finished"
    );

    ScanReport {
        target,
        reports,
        stats: snapshot,
        elapsed,
        interrupted,
    }
}

/// Parallel mode: one task per port, concurrency bounded by a semaphore.
async fn parallel_scan(
    target: &Target,
    ports: &[u16],
    config: &ScanConfig,
    stats: &Arc<ScanStats>,
    cancel: &CancellationToken,
    progress: Option<&ProgressBar>,
) -> Vec<PortReport> {
    let semaphore = Arc::new(Semaphore::new(config.workers.max(1)));
    let ip = target.ip;
    let timeout = config.timeout;
    let style = config.style;

    let reports: Vec<Option<PortReport>> = stream::iter(ports.iter().copied())
        .map(|port| {
            let sem = Arc::clone(&semaphore);
            let stats = Arc::clone(stats);
            let cancel = cancel.clone();
            let progress = progress.cloned();

            async move {
                let _permit = sem.acquire().await.expect("semaphore never closed");

                // Dispatch gate: once cancelled, pending ports are abandoned
                // and left out of the statistics.
                if cancel.is_cancelled() {
                    return None;
                }

                let report = probe_port(ip, port, timeout, style).await;
                stats.record(&report.outcome);

                if let Some(pb) = &progress {
                    pb.inc(1);
                }

                Some(report)
            }
        })
        // High buffering; the semaphore controls actual concurrency.
        .buffer_unordered(1000)
        .collect()
        .await;

    reports.into_iter().flatten().collect()
}

/// Sequential mode: ascending port order, fixed delay between probes.
async fn sequential_scan(
    target: &Target,
    ports: &[u16],
    config: &ScanConfig,
    delay: Duration,
    stats: &Arc<ScanStats>,
    cancel: &CancellationToken,
    progress: Option<&ProgressBar>,
) -> Vec<PortReport> {
    let mut reports = Vec::new();

    for (i, &port) in ports.iter().enumerate() {
        if cancel.is_cancelled() {
            break;
        }

        let report = probe_port(target.ip, port, config.timeout, config.style).await;
        stats.record(&report.outcome);
        reports.push(report);

        if let Some(pb) = progress {
            pb.inc(1);
        }

        if i + 1 < ports.len() {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(delay) => {}
            }
        }
    }

    reports
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_record_bumps_total_and_one_bucket() {
        let stats = ScanStats::default();
        stats.record(&ProbeOutcome::Open {
            service: "SSH",
            banner: None,
        });
        stats.record(&ProbeOutcome::Closed);
        stats.record(&ProbeOutcome::Closed);
        stats.record(&ProbeOutcome::Filtered {
            reason: "timed out".to_string(),
        });
        stats.record(&ProbeOutcome::Error {
            message: "too many open files".to_string(),
        });

        let snap = stats.snapshot();
        assert_eq!(snap.total, 5);
        assert_eq!(snap.open, 1);
        assert_eq!(snap.closed, 2);
        assert_eq!(snap.filtered, 1);
        assert_eq!(snap.errors, 1);
        assert_eq!(
            snap.open + snap.closed + snap.filtered + snap.errors,
            snap.total
        );
    }

    #[test]
    fn stats_are_safe_under_concurrent_recorders() {
        let stats = Arc::new(ScanStats::default());
        let mut handles = Vec::new();
        for _ in 0..8 {
            let stats = Arc::clone(&stats);
            handles.push(std::thread::spawn(move || {
                for _ in 0..1000 {
                    stats.record(&ProbeOutcome::Closed);
                }
            }));
        }
        for h in handles {
            h.join().unwrap();
        }

        let snap = stats.snapshot();
        assert_eq!(snap.total, 8000);
        assert_eq!(snap.closed, 8000);
    }
}
