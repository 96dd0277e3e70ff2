use std::fmt;
use std::time::Duration;

use espwire_frame::FrameConfig;
use espwire_transport::TransportConfig;

/// Default bound on every wait for a device reply.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
/// Default per-subscriber queue length.
pub const DEFAULT_SINK_CAPACITY: usize = 64;
/// Client identity sent in `HelloRequest` unless overridden.
pub const DEFAULT_CLIENT_INFO: &str = concat!("espwire ", env!("CARGO_PKG_VERSION"));

/// What the registry does when a subscriber's queue is full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverflowPolicy {
    /// Wait for the subscriber to make room. Later subscribers wait too.
    #[default]
    Block,
    /// Drop the message for that subscriber only.
    Drop,
}

/// Connection configuration.
#[derive(Clone)]
pub struct ConnectionConfig {
    /// Sent as `HelloRequest.client_info` by [`Connection::handshake`](crate::Connection::handshake).
    pub client_info: String,
    /// Sent as `ConnectRequest.password`. Redacted in debug output.
    pub password: String,
    /// `None` waits forever for replies.
    pub request_timeout: Option<Duration>,
    pub sink_capacity: usize,
    pub overflow: OverflowPolicy,
    /// Answer ping, time and disconnect requests sent by the device.
    pub answer_device_requests: bool,
    pub transport: TransportConfig,
    pub frame: FrameConfig,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            client_info: DEFAULT_CLIENT_INFO.to_string(),
            password: String::new(),
            request_timeout: Some(DEFAULT_REQUEST_TIMEOUT),
            sink_capacity: DEFAULT_SINK_CAPACITY,
            overflow: OverflowPolicy::default(),
            answer_device_requests: true,
            transport: TransportConfig::default(),
            frame: FrameConfig::default(),
        }
    }
}

impl ConnectionConfig {
    pub fn with_client_info(mut self, client_info: impl Into<String>) -> Self {
        self.client_info = client_info.into();
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Queue length per subscriber. Clamped to at least one.
    pub fn with_sink_capacity(mut self, capacity: usize) -> Self {
        self.sink_capacity = capacity.max(1);
        self
    }

    pub fn with_overflow(mut self, overflow: OverflowPolicy) -> Self {
        self.overflow = overflow;
        self
    }

    pub fn with_answer_device_requests(mut self, enabled: bool) -> Self {
        self.answer_device_requests = enabled;
        self
    }

    pub fn with_transport(mut self, transport: TransportConfig) -> Self {
        self.transport = transport;
        self
    }

    pub fn with_frame(mut self, frame: FrameConfig) -> Self {
        self.frame = frame;
        self
    }
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("client_info", &self.client_info)
            .field(
                "password",
                &format_args!("<redacted:{} bytes>", self.password.len()),
            )
            .field("request_timeout", &self.request_timeout)
            .field("sink_capacity", &self.sink_capacity)
            .field("overflow", &self.overflow)
            .field("answer_device_requests", &self.answer_device_requests)
            .field("transport", &self.transport)
            .field("frame", &self.frame)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_password() {
        let config = ConnectionConfig::default().with_password("s3cret-pass");
        let debug = format!("{config:?}");
        assert!(debug.contains("<redacted:11 bytes>"));
        assert!(!debug.contains("s3cret-pass"));
    }

    #[test]
    fn defaults() {
        let config = ConnectionConfig::default();
        assert_eq!(config.request_timeout, Some(Duration::from_secs(10)));
        assert_eq!(config.sink_capacity, 64);
        assert_eq!(config.overflow, OverflowPolicy::Block);
        assert!(config.answer_device_requests);
        assert!(config.client_info.starts_with("espwire "));
    }

    #[test]
    fn sink_capacity_never_zero() {
        assert_eq!(ConnectionConfig::default().with_sink_capacity(0).sink_capacity, 1);
    }
}
