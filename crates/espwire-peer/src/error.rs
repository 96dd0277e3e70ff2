use std::time::Duration;

use espwire_proto::MessageId;

use crate::entity::Entity;
use crate::state::CloseReason;

/// Errors that can occur in connection operations.
#[derive(Debug, thiserror::Error)]
pub enum PeerError {
    /// Transport-level error, including socket failures while reading or
    /// writing frames.
    #[error("transport error: {0}")]
    Transport(#[from] espwire_transport::TransportError),

    /// Malformed or oversized frame.
    #[error("frame error: {0}")]
    Frame(#[from] espwire_frame::FrameError),

    /// Message catalog error.
    #[error("catalog error: {0}")]
    Catalog(#[from] espwire_proto::CatalogError),

    /// The connection is closed; no I/O was attempted.
    #[error("connection closed: {0}")]
    Closed(CloseReason),

    /// The device rejected the password.
    #[error("authentication failed: invalid password")]
    AuthFailed,

    /// The connection closed before the device finished listing entities.
    #[error("entity listing interrupted after {} entities: {reason}", .entities.len())]
    IncompleteListing {
        entities: Vec<Entity>,
        reason: CloseReason,
    },

    /// No reply arrived within the request timeout.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The connection has not been dialed yet.
    #[error("not connected")]
    NotConnected,

    /// The connection already has a transport.
    #[error("already connected")]
    AlreadyConnected,

    /// A reply arrived that the operation cannot interpret.
    #[error("unexpected {0} reply")]
    UnexpectedMessage(MessageId),
}

impl PeerError {
    /// Whether this error reports a closed connection.
    pub fn is_closed(&self) -> bool {
        matches!(
            self,
            PeerError::Closed(_) | PeerError::IncompleteListing { .. }
        )
    }

    /// The close reason carried by a closure error.
    pub fn close_reason(&self) -> Option<&CloseReason> {
        match self {
            PeerError::Closed(reason) | PeerError::IncompleteListing { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, PeerError>;
