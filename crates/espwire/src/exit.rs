use std::fmt;
use std::io;

use espwire_frame::FrameError;
use espwire_peer::PeerError;
use espwire_transport::TransportError;

pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const TRANSPORT_ERROR: i32 = 3;
pub const PERMISSION_DENIED: i32 = 50;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const TIMEOUT: i32 = 124;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => TIMEOUT,
        _ => TRANSPORT_ERROR,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn transport_error(context: &str, err: TransportError) -> CliError {
    match err {
        TransportError::ConnectTimeout { .. } => {
            CliError::new(TIMEOUT, format!("{context}: {err}"))
        }
        TransportError::Connect { addr, source } => {
            io_error(&format!("{context} ({addr})"), source)
        }
        TransportError::Io(source) => io_error(context, source),
    }
}

pub fn frame_error(context: &str, err: FrameError) -> CliError {
    match err {
        FrameError::Io(source) => io_error(context, source),
        FrameError::ConnectionClosed => CliError::new(FAILURE, format!("{context}: {err}")),
        other => CliError::new(DATA_INVALID, format!("{context}: {other}")),
    }
}

pub fn peer_error(context: &str, err: PeerError) -> CliError {
    match err {
        PeerError::Transport(err) => transport_error(context, err),
        PeerError::Frame(err) => frame_error(context, err),
        PeerError::Catalog(err) => CliError::new(DATA_INVALID, format!("{context}: {err}")),
        PeerError::UnexpectedMessage(_) => CliError::new(DATA_INVALID, format!("{context}: {err}")),
        PeerError::AuthFailed => CliError::new(PERMISSION_DENIED, format!("{context}: {err}")),
        PeerError::Timeout(_) => CliError::new(TIMEOUT, format!("{context}: {err}")),
        PeerError::Closed(_) | PeerError::IncompleteListing { .. } => {
            CliError::new(FAILURE, format!("{context}: {err}"))
        }
        other => CliError::new(INTERNAL, format!("{context}: {other}")),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use espwire_peer::CloseReason;

    use super::*;

    #[test]
    fn auth_rejection_maps_to_permission_denied() {
        assert_eq!(peer_error("connect", PeerError::AuthFailed).code, PERMISSION_DENIED);
    }

    #[test]
    fn timeouts_map_to_timeout() {
        let err = peer_error("ping", PeerError::Timeout(Duration::from_secs(1)));
        assert_eq!(err.code, TIMEOUT);
        assert!(err.message.starts_with("ping: "));

        let err = transport_error(
            "dial",
            TransportError::ConnectTimeout {
                addr: "10.0.0.7:6053".into(),
                timeout: Duration::from_secs(5),
            },
        );
        assert_eq!(err.code, TIMEOUT);
    }

    #[test]
    fn refused_dial_maps_to_transport_error() {
        let err = peer_error(
            "dial",
            PeerError::Transport(TransportError::Connect {
                addr: "127.0.0.1:6053".into(),
                source: io::Error::from(io::ErrorKind::ConnectionRefused),
            }),
        );
        assert_eq!(err.code, TRANSPORT_ERROR);
        assert!(err.message.contains("127.0.0.1:6053"));
    }

    #[test]
    fn closure_maps_to_failure() {
        let err = peer_error("states", PeerError::Closed(CloseReason::PeerClosed));
        assert_eq!(err.code, FAILURE);
    }

    #[test]
    fn malformed_frames_map_to_data_invalid() {
        let err = frame_error("read", FrameError::InvalidVarint);
        assert_eq!(err.code, DATA_INVALID);
    }
}
