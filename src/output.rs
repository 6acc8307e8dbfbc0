//! Result rendering and export.
//!
//! Console rendering uses `console` styles (globally disabled by
//! `--no-color`); file export picks the structured format for `.json`
//! paths and plain text for everything else.

use crate::engine::{ScanReport, StatsSnapshot};
use crate::probe::{PortReport, ProbeOutcome};
use chrono::Local;
use console::Style;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Structured export record.
#[derive(Serialize)]
struct JsonRecord {
    target: String,
    scan_time: String,
    ports: Vec<JsonPort>,
    stats: StatsSnapshot,
}

#[derive(Serialize)]
struct JsonPort {
    port: u16,
    status: &'static str,
    service: String,
}

impl JsonPort {
    fn from_report(report: &PortReport) -> Self {
        Self {
            port: report.port,
            status: report.outcome.status_label(),
            service: report.outcome.describe(),
        }
    }
}

/// Print the scan report to stdout.
pub fn print_report(report: &ScanReport) {
    println!();
    println!("Scan Results for {}", report.target);
    println!("{}", "=".repeat(50));

    if report.reports.is_empty() {
        println!("No open, filtered, or errored ports.");
    }

    for r in &report.reports {
        let style = status_style(&r.outcome);
        println!(
            "{} Port {}: {}",
            style.apply_to(r.outcome.status_label()),
            r.port,
            r.outcome.describe()
        );
    }

    let stats = &report.stats;
    println!();
    println!("Scan Summary:");
    println!("{}", "-".repeat(30));
    println!("Total: {}", stats.total);
    println!("Open: {}", stats.open);
    println!("Closed: {}", stats.closed);
    println!("Filtered: {}", stats.filtered);
    println!("Errors: {}", stats.errors);

    println!();
    if report.interrupted {
        println!(
            "{}",
            Style::new()
                .yellow()
                .apply_to("Scan interrupted; results are partial.")
        );
    }
    println!("Scan completed in {:.2} seconds", report.elapsed.as_secs_f64());
}

fn status_style(outcome: &ProbeOutcome) -> Style {
    match outcome {
        ProbeOutcome::Open { .. } => Style::new().green().bold(),
        ProbeOutcome::Closed => Style::new().red(),
        ProbeOutcome::Filtered { .. } => Style::new().yellow(),
        ProbeOutcome::Error { .. } => Style::new().red().bold(),
    }
}

/// Write the report to `path`. A `.json` extension selects the structured
/// record; anything else gets plain text.
pub fn save_report(report: &ScanReport, path: &Path) -> io::Result<()> {
    let json = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let mut writer = BufWriter::new(File::create(path)?);
    if json {
        write_json(report, &mut writer)?;
    } else {
        write_text(report, &mut writer)?;
    }
    writer.flush()
}

fn write_json<W: Write>(report: &ScanReport, writer: &mut W) -> io::Result<()> {
    let record = JsonRecord {
        target: report.target.ip.to_string(),
        scan_time: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        ports: report.reports.iter().map(JsonPort::from_report).collect(),
        stats: report.stats,
    };
    serde_json::to_writer_pretty(&mut *writer, &record)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    writeln!(writer)
}

fn write_text<W: Write>(report: &ScanReport, writer: &mut W) -> io::Result<()> {
    writeln!(writer, "Port Scan Results for {}", report.target.ip)?;
    writeln!(writer, "{}", "=".repeat(50))?;

    for r in &report.reports {
        writeln!(
            writer,
            "{} Port {}: {}",
            r.outcome.status_label(),
            r.port,
            r.outcome.describe()
        )?;
    }

    let stats = &report.stats;
    writeln!(writer)?;
    writeln!(writer, "Scan Summary:")?;
    writeln!(writer, "Total: {}", stats.total)?;
    writeln!(writer, "Open: {}", stats.open)?;
    writeln!(writer, "Closed: {}", stats.closed)?;
    writeln!(writer, "Filtered: {}", stats.filtered)?;
    writeln!(writer, "Errors: {}", stats.errors)?;
    Ok(())
}
