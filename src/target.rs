//! Target resolution.
//!
//! Converts the user-supplied host string into a connectable address.
//! IP literals are accepted without any network traffic; hostnames go
//! through DNS exactly once per run. Resolution failure is terminal.

use crate::error::{ScanError, ScanResult};
use std::fmt;
use std::net::IpAddr;
use trust_dns_resolver::config::{ResolverConfig, ResolverOpts};
use trust_dns_resolver::TokioAsyncResolver;

/// A resolved scan target. Immutable for the lifetime of a run; every probe
/// connects to `ip`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// The original user input (hostname or IP string).
    pub original: String,
    /// The resolved address.
    pub ip: IpAddr,
}

impl Target {
    pub fn new(original: impl Into<String>, ip: IpAddr) -> Self {
        Self {
            original: original.into(),
            ip,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.original == self.ip.to_string() {
            write!(f, "{}", self.ip)
        } else {
            write!(f, "{} ({})", self.original, self.ip)
        }
    }
}

/// Resolve a host spec to a target. No retries.
pub async fn resolve(host: &str) -> ScanResult<Target> {
    let host = host.trim();

    if let Ok(ip) = host.parse::<IpAddr>() {
        return Ok(Target::new(host, ip));
    }

    tracing::debug!(host, "resolving hostname");
    let resolver = TokioAsyncResolver::tokio(ResolverConfig::default(), ResolverOpts::default());
    let response = resolver
        .lookup_ip(host)
        .await
        .map_err(|_| ScanError::Resolution(host.to_string()))?;

    let ip = response
        .iter()
        .next()
        .ok_or_else(|| ScanError::Resolution(host.to_string()))?;

    Ok(Target::new(host, ip))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[tokio::test]
    async fn ipv4_literal_skips_dns() {
        let target = resolve("127.0.0.1").await.unwrap();
        assert_eq!(target.ip, IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert_eq!(target.original, "127.0.0.1");
    }

    #[tokio::test]
    async fn ipv6_literal_skips_dns() {
        let target = resolve("::1").await.unwrap();
        assert!(target.ip.is_ipv6());
    }

    #[test]
    fn display_hides_redundant_original() {
        let target = Target::new("127.0.0.1", IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert_eq!(target.to_string(), "127.0.0.1");

        let target = Target::new("localhost", IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert_eq!(target.to_string(), "localhost (127.0.0.1)");
    }
}
