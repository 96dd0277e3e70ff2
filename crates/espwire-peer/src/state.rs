use std::fmt;

/// Lifecycle of a [`Connection`](crate::Connection).
///
/// `Closed` is terminal and reachable from every other state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionState {
    Idle,
    Dialing,
    Open,
    Authenticated,
    Closed,
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ConnectionState::Idle => "idle",
            ConnectionState::Dialing => "dialing",
            ConnectionState::Open => "open",
            ConnectionState::Authenticated => "authenticated",
            ConnectionState::Closed => "closed",
        };
        f.write_str(label)
    }
}

/// Why a connection closed. The first recorded reason wins.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CloseReason {
    /// Closed by the caller.
    Local,
    /// A disconnect exchange completed, initiated by either side.
    Disconnected,
    /// The device rejected the password.
    AuthRejected,
    /// End of stream without a disconnect exchange.
    PeerClosed,
    /// Reading from or writing to the transport failed.
    Transport(String),
}

impl CloseReason {
    /// Local, negotiated and authentication closures are graceful.
    pub fn is_graceful(&self) -> bool {
        matches!(
            self,
            CloseReason::Local | CloseReason::Disconnected | CloseReason::AuthRejected
        )
    }
}

impl fmt::Display for CloseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CloseReason::Local => f.write_str("closed locally"),
            CloseReason::Disconnected => f.write_str("disconnected"),
            CloseReason::AuthRejected => f.write_str("authentication rejected"),
            CloseReason::PeerClosed => f.write_str("closed by device"),
            CloseReason::Transport(err) => write!(f, "transport failure: {err}"),
        }
    }
}
