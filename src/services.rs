//! Service detection based on well-known port numbers.
//!
//! Pure lookup from port number to a protocol label. No I/O, no state,
//! safe to call from any number of workers at once.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Static map of well-known ports to service labels. Exactly one label per
/// port.
static PORT_SERVICES: LazyLock<HashMap<u16, &'static str>> = LazyLock::new(|| {
    let mut m = HashMap::new();

    m.insert(21, "FTP");
    m.insert(22, "SSH");
    m.insert(23, "Telnet");
    m.insert(25, "SMTP");
    m.insert(53, "DNS");
    m.insert(80, "HTTP");
    m.insert(110, "POP3");
    m.insert(139, "NetBIOS");
    m.insert(143, "IMAP");
    m.insert(389, "LDAP");
    m.insert(443, "HTTPS");
    m.insert(445, "SMB");
    m.insert(465, "SMTPS");
    m.insert(636, "LDAPS");
    m.insert(993, "IMAPS");
    m.insert(995, "POP3S");
    m.insert(1433, "MSSQL");
    m.insert(3306, "MySQL");
    m.insert(3389, "RDP");
    m.insert(5432, "PostgreSQL");
    m.insert(6379, "Redis");
    m.insert(8080, "HTTP-Alt");
    m.insert(8443, "HTTPS-Alt");

    m
});

/// Look up the probable service for a port. Returns `"Unknown"` for ports
/// outside the table.
pub fn classify(port: u16) -> &'static str {
    PORT_SERVICES.get(&port).copied().unwrap_or("Unknown")
}
