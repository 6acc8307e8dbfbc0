//! The atomic unit of scan work: one TCP connect probe.
//!
//! A probe attempts a connection to `(target, port)` under a timeout,
//! classifies the result, and on success hands the stream to the banner
//! prober. Each probe owns its connection; the stream is dropped on every
//! exit path.

use crate::banner;
use crate::services;
use std::io;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;

/// Outcome of probing a single port. Produced exactly once per port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The port accepted a connection.
    Open {
        service: &'static str,
        banner: Option<String>,
    },
    /// The connection was actively refused.
    Closed,
    /// No answer within the timeout; something is silently dropping packets.
    Filtered { reason: String },
    /// The probe itself failed (permissions, fd exhaustion, routing).
    Error { message: String },
}

impl ProbeOutcome {
    /// Status column as shown to the user and written to exports.
    pub fn status_label(&self) -> &'static str {
        match self {
            Self::Open { .. } => "OPEN",
            Self::Closed => "CLOSED",
            Self::Filtered { .. } => "FILTERED",
            Self::Error { .. } => "ERROR",
        }
    }

    /// Service column: the label with the banner appended in brackets,
    /// or the reason/message for non-open outcomes.
    pub fn describe(&self) -> String {
        match self {
            Self::Open {
                service,
                banner: Some(banner),
            } => format!("{service} [{banner}]"),
            Self::Open {
                service,
                banner: None,
            } => (*service).to_string(),
            Self::Closed => String::new(),
            Self::Filtered { reason } => reason.clone(),
            Self::Error { message } => message.clone(),
        }
    }
}

/// One completed probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortReport {
    pub port: u16,
    pub outcome: ProbeOutcome,
}

/// Placeholder distinction between a full connect-and-hold and an immediate
/// connect check. Both complete an ordinary TCP handshake; no raw-socket
/// capability is involved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectStyle {
    #[default]
    Standard,
    Stealth,
}

/// Probe a single port on `target` under `probe_timeout`.
///
/// Banner failures degrade to an open result without a banner; they never
/// turn into a probe error.
pub async fn probe_port(
    target: IpAddr,
    port: u16,
    probe_timeout: Duration,
    style: ConnectStyle,
) -> PortReport {
    let addr = SocketAddr::new(target, port);
    tracing::trace!(%addr, ?style, "probing");

    let outcome = match timeout(probe_timeout, TcpStream::connect(addr)).await {
        Ok(Ok(mut stream)) => {
            let service = services::classify(port);
            let banner = banner::grab_banner(&mut stream, port, probe_timeout).await;
            ProbeOutcome::Open { service, banner }
        }
        Ok(Err(e)) => classify_connect_error(&e),
        Err(_) => ProbeOutcome::Filtered {
            reason: "timed out".to_string(),
        },
    };

    PortReport { port, outcome }
}

/// Map a connect error to an outcome. Refusals are ordinary closed ports;
/// an in-kernel connect timeout is the same silence as our own timer
/// expiring. Anything else is unexpected and surfaced as an error.
fn classify_connect_error(err: &io::Error) -> ProbeOutcome {
    match err.kind() {
        io::ErrorKind::ConnectionRefused | io::ErrorKind::ConnectionReset => ProbeOutcome::Closed,
        io::ErrorKind::TimedOut => ProbeOutcome::Filtered {
            reason: "timed out".to_string(),
        },
        _ => ProbeOutcome::Error {
            message: err.to_string(),
        },
    }
}
