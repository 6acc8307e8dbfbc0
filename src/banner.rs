//! Best-effort banner retrieval from open ports.
//!
//! Only an allow-list of ports is probed: web ports get a minimal HTTP
//! request, protocols that greet unprompted (FTP, SSH, Telnet, SMTP) get a
//! plain read. Everything else returns `None` without touching the socket.
//! No failure in here ever propagates to the caller.

use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;

/// Maximum bytes read from the remote service.
const MAX_BANNER_BYTES: usize = 1024;

/// Banners longer than this are cut for display.
const DISPLAY_LIMIT: usize = 50;

/// Minimal request used to coax a response out of web ports.
const HTTP_PROBE: &[u8] = b"HEAD / HTTP/1.0\r\nHost: example.com\r\n\r\n";

/// Request to send before reading, keyed by port. `Some(None)` means the
/// port is eligible but the service speaks first.
fn probe_request(port: u16) -> Option<Option<&'static [u8]>> {
    match port {
        80 | 443 | 8080 | 8443 => Some(Some(HTTP_PROBE)),
        21 | 22 | 23 | 25 => Some(None),
        _ => None,
    }
}

/// Try to pull a short banner out of an already-open connection.
///
/// Reads at most [`MAX_BANNER_BYTES`] within `read_timeout`, decodes
/// permissively, and truncates for display. Every failure path (timeout,
/// reset, write error, empty read) degrades to `None`.
pub async fn grab_banner(
    stream: &mut TcpStream,
    port: u16,
    read_timeout: Duration,
) -> Option<String> {
    let request = probe_request(port)?;

    if let Some(payload) = request {
        timeout(read_timeout, stream.write_all(payload))
            .await
            .ok()?
            .ok()?;
    }

    let mut buffer = vec![0u8; MAX_BANNER_BYTES];
    let n = match timeout(read_timeout, stream.read(&mut buffer)).await {
        Ok(Ok(n)) if n > 0 => n,
        _ => return None,
    };

    let text = String::from_utf8_lossy(&buffer[..n]);
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    Some(truncate_banner(text))
}

/// Cut a banner down to [`DISPLAY_LIMIT`] characters, marking the cut with
/// an ellipsis. Counts characters rather than bytes so multi-byte input
/// never splits mid-codepoint.
pub fn truncate_banner(s: &str) -> String {
    if s.chars().count() <= DISPLAY_LIMIT {
        s.to_string()
    } else {
        let cut: String = s.chars().take(DISPLAY_LIMIT).collect();
        format!("{cut}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    #[test]
    fn short_banners_pass_verbatim() {
        assert_eq!(truncate_banner("SSH-2.0-OpenSSH_9.6"), "SSH-2.0-OpenSSH_9.6");
        let at_limit = "x".repeat(DISPLAY_LIMIT);
        assert_eq!(truncate_banner(&at_limit), at_limit);
    }

    #[test]
    fn long_banners_are_cut_at_the_limit() {
        let long = "y".repeat(DISPLAY_LIMIT + 20);
        let cut = truncate_banner(&long);
        assert_eq!(cut.chars().count(), DISPLAY_LIMIT + 3);
        assert!(cut.ends_with("..."));
        assert_eq!(&cut[..DISPLAY_LIMIT], &long[..DISPLAY_LIMIT]);
    }

    #[test]
    fn truncation_is_character_aware() {
        let long = "é".repeat(DISPLAY_LIMIT + 1);
        let cut = truncate_banner(&long);
        assert_eq!(cut.chars().count(), DISPLAY_LIMIT + 3);
    }

    #[tokio::test]
    async fn greeting_banner_is_read() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut sock, _) = listener.accept().await.unwrap();
            sock.write_all(b"220 mail.example.com ESMTP\r\n").await.unwrap();
        });

        let mut stream = TcpStream::connect(addr).await.unwrap();
        // Claimed port 25 selects the plain-read path.
        let banner = grab_banner(&mut stream, 25, Duration::from_millis(500)).await;
        assert_eq!(banner.as_deref(), Some("220 mail.example.com ESMTP"));
    }

    #[tokio::test]
    async fn http_port_sends_a_probe_first() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut sock, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 256];
            let n = sock.read(&mut buf).await.unwrap();
            assert!(buf[..n].starts_with(b"HEAD / HTTP/1.0"));
            sock.write_all(b"HTTP/1.0 200 OK\r\nServer: test\r\n\r\n")
                .await
                .unwrap();
        });

        let mut stream = TcpStream::connect(addr).await.unwrap();
        let banner = grab_banner(&mut stream, 80, Duration::from_millis(500)).await;
        assert!(banner.unwrap().starts_with("HTTP/1.0 200 OK"));
    }

    #[tokio::test]
    async fn ports_off_the_allow_list_are_not_probed() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let mut stream = TcpStream::connect(addr).await.unwrap();
        let banner = grab_banner(&mut stream, 4444, Duration::from_millis(500)).await;
        assert!(banner.is_none());
    }

    #[tokio::test]
    async fn silent_service_yields_no_banner() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (_sock, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
        });

        let mut stream = TcpStream::connect(addr).await.unwrap();
        let banner = grab_banner(&mut stream, 22, Duration::from_millis(100)).await;
        assert!(banner.is_none());
    }
}
