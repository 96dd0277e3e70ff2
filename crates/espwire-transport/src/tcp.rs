use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use tokio::net::TcpStream;
use tracing::debug;

use crate::error::{Result, TransportError};

/// Default port of the ESPHome native API.
pub const DEFAULT_PORT: u16 = 6053;

/// Configuration for dialing a device.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Upper bound on the TCP connect. `None` waits for the OS.
    pub connect_timeout: Option<Duration>,
    /// Disable Nagle's algorithm. Frames are small and latency matters.
    pub nodelay: bool,
    /// Port used when the address does not carry one.
    pub default_port: u16,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Some(Duration::from_secs(5)),
            nodelay: true,
            default_port: DEFAULT_PORT,
        }
    }
}

/// TCP transport to a device.
pub struct TcpTransport;

impl TcpTransport {
    /// Connect to `addr` (`host`, `host:port`, `ip` or `[ipv6]:port`).
    pub async fn connect(addr: &str, config: &TransportConfig) -> Result<TcpStream> {
        let addr = with_default_port(addr, config.default_port);
        let connecting = TcpStream::connect(addr.as_str());

        let stream = match config.connect_timeout {
            Some(timeout) => tokio::time::timeout(timeout, connecting)
                .await
                .map_err(|_| TransportError::ConnectTimeout {
                    addr: addr.clone(),
                    timeout,
                })?,
            None => connecting.await,
        }
        .map_err(|source| TransportError::Connect {
            addr: addr.clone(),
            source,
        })?;

        if config.nodelay {
            stream.set_nodelay(true)?;
        }
        debug!(%addr, peer = ?stream.peer_addr().ok(), "connected to device");
        Ok(stream)
    }

    /// Transport name for diagnostics.
    pub fn transport_name() -> &'static str {
        "tcp"
    }
}

/// Append `port` to `addr` unless it already names one.
pub fn with_default_port(addr: &str, port: u16) -> String {
    let addr = addr.trim();
    if addr.parse::<SocketAddr>().is_ok() {
        return addr.to_string();
    }
    if let Ok(ip) = addr.parse::<IpAddr>() {
        return SocketAddr::new(ip, port).to_string();
    }
    if let Some(inner) = addr.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
        if let Ok(ip) = inner.parse::<IpAddr>() {
            return SocketAddr::new(ip, port).to_string();
        }
    }
    match addr.rsplit_once(':') {
        Some((host, p)) if !host.is_empty() && p.parse::<u16>().is_ok() => addr.to_string(),
        _ => format!("{addr}:{port}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_port_is_appended_to_bare_hosts() {
        assert_eq!(with_default_port("livingroom.local", 6053), "livingroom.local:6053");
        assert_eq!(with_default_port("10.0.0.7", 6053), "10.0.0.7:6053");
        assert_eq!(with_default_port("::1", 6053), "[::1]:6053");
        assert_eq!(with_default_port("[fe80::1]", 6053), "[fe80::1]:6053");
    }

    #[test]
    fn explicit_ports_are_kept() {
        assert_eq!(with_default_port("10.0.0.7:1234", 6053), "10.0.0.7:1234");
        assert_eq!(with_default_port("node.local:80", 6053), "node.local:80");
        assert_eq!(with_default_port("[::1]:9000", 6053), "[::1]:9000");
    }

    #[tokio::test]
    async fn connect_to_local_listener() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap().to_string();

        let accept = tokio::spawn(async move { listener.accept().await.map(|_| ()) });
        let stream = TcpTransport::connect(&addr, &TransportConfig::default())
            .await
            .unwrap();
        assert!(stream.nodelay().unwrap());
        accept.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn connect_refused_reports_address() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap().to_string();
        drop(listener);

        let err = TcpTransport::connect(&addr, &TransportConfig::default())
            .await
            .unwrap_err();
        match err {
            TransportError::Connect { addr: reported, .. } => assert_eq!(reported, addr),
            other => panic!("unexpected error: {other}"),
        }
    }
}
