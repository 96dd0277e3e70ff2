/// Errors that can occur during frame encoding/decoding.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The frame did not start with the `0x00` preamble.
    #[error("bad preamble 0x{byte:02x} ({skipped} bytes skipped)")]
    BadPreamble { byte: u8, skipped: usize },

    /// A length or type varint is malformed or out of range.
    #[error("invalid varint in frame header")]
    InvalidVarint,

    /// The payload exceeds the configured maximum size.
    #[error("payload too large ({size} bytes, max {max})")]
    PayloadTooLarge { size: usize, max: usize },

    /// The stream ended in the middle of a frame.
    #[error("truncated frame: stream ended after {available} buffered bytes")]
    Truncated {
        expected: Option<usize>,
        available: usize,
    },

    /// An I/O error occurred while reading or writing frames.
    #[error("frame I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The peer closed the stream cleanly between frames.
    #[error("connection closed")]
    ConnectionClosed,
}

impl FrameError {
    /// Whether the stream can keep delivering frames after this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            FrameError::BadPreamble { .. }
                | FrameError::InvalidVarint
                | FrameError::PayloadTooLarge { .. }
                | FrameError::Truncated { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, FrameError>;
