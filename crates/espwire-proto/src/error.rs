use crate::catalog::MessageId;

/// Errors produced when turning a frame into a [`Message`](crate::Message).
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// No schema is registered for this message type id.
    #[error("unsupported message type {0}")]
    UnsupportedType(u32),

    /// The payload is not a valid encoding of the schema.
    #[error("malformed {id} payload: {source}")]
    Decode {
        id: MessageId,
        source: prost::DecodeError,
    },
}

pub type Result<T> = std::result::Result<T, CatalogError>;
