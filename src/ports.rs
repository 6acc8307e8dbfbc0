//! Port set construction.
//!
//! Expands a user-facing specification (explicit range, curated common
//! list, or nothing) into an ascending, duplicate-free list of port
//! numbers. Pure parsing and validation; no socket is touched until the
//! set is handed to the engine.

use crate::error::{ScanError, ScanResult};

/// Curated list of widely-deployed service ports, ascending.
pub const COMMON_PORTS: &[u16] = &[
    21, 22, 23, 25, 53, 80, 110, 143, 443, 465, 993, 995, 3306, 3389,
];

/// Range scanned when nothing is specified. Capped at 1024 so the
/// unprivileged default case stays quick.
pub const DEFAULT_RANGE: (u16, u16) = (1, 1024);

/// Build the port set for a run.
///
/// `--top-ports` wins over an explicit range at the CLI layer (clap marks
/// them conflicting), so `top_ports` is checked first here.
pub fn build_port_set(range: Option<&str>, top_ports: bool) -> ScanResult<Vec<u16>> {
    if top_ports {
        return Ok(COMMON_PORTS.to_vec());
    }
    match range {
        Some(spec) => parse_range(spec),
        None => Ok((DEFAULT_RANGE.0..=DEFAULT_RANGE.1).collect()),
    }
}

/// Parse an inclusive `"start-end"` range.
fn parse_range(spec: &str) -> ScanResult<Vec<u16>> {
    let invalid = || ScanError::InvalidRange(spec.to_string());

    let (start, end) = spec.split_once('-').ok_or_else(invalid)?;
    let start: u16 = start.trim().parse().map_err(|_| invalid())?;
    let end: u16 = end.trim().parse().map_err(|_| invalid())?;

    // u16 parsing already rejects anything above 65535; zero is the one
    // in-type value outside the port space.
    if start == 0 || end == 0 || start > end {
        return Err(invalid());
    }

    Ok((start..=end).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_is_inclusive_ascending_and_distinct() {
        let ports = build_port_set(Some("20-25"), false).unwrap();
        assert_eq!(ports, vec![20, 21, 22, 23, 24, 25]);

        let ports = build_port_set(Some("443-443"), false).unwrap();
        assert_eq!(ports, vec![443]);

        let ports = build_port_set(Some("1-1000"), false).unwrap();
        assert_eq!(ports.len(), 1000);
        assert!(ports.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn default_is_one_through_1024() {
        let ports = build_port_set(None, false).unwrap();
        assert_eq!(ports.len(), 1024);
        assert_eq!(ports.first(), Some(&1));
        assert_eq!(ports.last(), Some(&1024));
    }

    #[test]
    fn top_ports_are_the_curated_list() {
        let ports = build_port_set(None, true).unwrap();
        assert_eq!(ports, COMMON_PORTS);
        assert!(ports.windows(2).all(|w| w[0] < w[1]), "must be ascending");
    }

    #[test]
    fn top_ports_beats_an_explicit_range() {
        let ports = build_port_set(Some("1-10"), true).unwrap();
        assert_eq!(ports, COMMON_PORTS);
    }

    #[test]
    fn malformed_ranges_are_rejected() {
        for spec in ["abc-20", "20-xyz", "20", "", "-5", "10-", "1-2-3"] {
            assert!(
                matches!(
                    build_port_set(Some(spec), false),
                    Err(ScanError::InvalidRange(_))
                ),
                "{spec:?} should be rejected"
            );
        }
    }

    #[test]
    fn out_of_bounds_and_backwards_ranges_are_rejected() {
        for spec in ["0-10", "10-0", "1-65536", "70000-70001", "100-50"] {
            assert!(
                matches!(
                    build_port_set(Some(spec), false),
                    Err(ScanError::InvalidRange(_))
                ),
                "{spec:?} should be rejected"
            );
        }
    }

    #[test]
    fn full_port_space_is_allowed() {
        let ports = build_port_set(Some("1-65535"), false).unwrap();
        assert_eq!(ports.len(), 65535);
    }
}
