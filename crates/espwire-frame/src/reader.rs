use std::io::{ErrorKind, Read};

use bytes::{Buf, BytesMut};
use tracing::debug;

use crate::codec::{decode_frame, decode_header, Frame, FrameConfig};
use crate::error::{FrameError, Result};

const INITIAL_BUFFER_CAPACITY: usize = 8 * 1024;
const READ_CHUNK_SIZE: usize = 8 * 1024;

/// Receive buffer shared by the blocking and async readers.
#[derive(Debug)]
struct FrameBuffer {
    buf: BytesMut,
    /// Bytes of an oversized frame still to be thrown away.
    discard: usize,
    config: FrameConfig,
}

impl FrameBuffer {
    fn new(config: FrameConfig) -> Self {
        Self {
            buf: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
            discard: 0,
            config,
        }
    }

    fn next_frame(&mut self) -> Result<Option<Frame>> {
        if self.discard > 0 {
            let n = self.discard.min(self.buf.len());
            self.buf.advance(n);
            self.discard -= n;
            if self.discard > 0 {
                return Ok(None);
            }
        }

        match decode_frame(&mut self.buf, self.config.max_payload_size) {
            Err(FrameError::PayloadTooLarge { size, max }) => {
                if let Ok(Some(header)) = decode_header(&self.buf) {
                    self.discard = header.frame_len();
                    debug!(
                        message_type = header.message_type,
                        size, "skipping oversized frame"
                    );
                }
                Err(FrameError::PayloadTooLarge { size, max })
            }
            other => other,
        }
    }

    /// Error to report once the stream has hit EOF.
    fn end_of_stream(&mut self) -> FrameError {
        if self.buf.is_empty() && self.discard == 0 {
            return FrameError::ConnectionClosed;
        }

        let available = self.buf.len();
        let expected = if self.discard > 0 {
            None
        } else {
            decode_header(&self.buf)
                .ok()
                .flatten()
                .map(|header| header.frame_len())
        };
        self.buf.clear();
        self.discard = 0;
        FrameError::Truncated {
            expected,
            available,
        }
    }
}

/// Reads complete frames from any `Read` stream.
///
/// Handles partial reads internally; callers always get complete frames.
/// Malformed frames are reported one at a time and the reader stays usable,
/// see [`FrameError::is_recoverable`].
pub struct FrameReader<T> {
    inner: T,
    state: FrameBuffer,
}

impl<T: Read> FrameReader<T> {
    /// Create a new frame reader with default configuration.
    pub fn new(inner: T) -> Self {
        Self::with_config(inner, FrameConfig::default())
    }

    /// Create a new frame reader with explicit configuration.
    pub fn with_config(inner: T, config: FrameConfig) -> Self {
        Self {
            inner,
            state: FrameBuffer::new(config),
        }
    }

    /// Read the next complete frame (blocking).
    ///
    /// Returns `Err(FrameError::ConnectionClosed)` when EOF is reached
    /// between frames and `Err(FrameError::Truncated { .. })` when it is
    /// reached inside one.
    pub fn read_frame(&mut self) -> Result<Frame> {
        loop {
            if let Some(frame) = self.state.next_frame()? {
                return Ok(frame);
            }

            let mut chunk = [0u8; READ_CHUNK_SIZE];
            let read = match self.inner.read(&mut chunk) {
                Ok(n) => n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(FrameError::Io(err)),
            };

            if read == 0 {
                return Err(self.state.end_of_stream());
            }

            self.state.buf.extend_from_slice(&chunk[..read]);
        }
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Consume the reader and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Current frame reader configuration.
    pub fn config(&self) -> &FrameConfig {
        &self.state.config
    }
}

/// Reads complete frames from any [`tokio::io::AsyncRead`] stream.
///
/// [`read_frame`](Self::read_frame) is cancel safe: if the future is dropped
/// before completion no buffered bytes are lost, so it can be raced in
/// `tokio::select!`.
#[cfg(feature = "async")]
pub struct AsyncFrameReader<T> {
    inner: T,
    state: FrameBuffer,
}

#[cfg(feature = "async")]
impl<T: tokio::io::AsyncRead + Unpin> AsyncFrameReader<T> {
    pub fn new(inner: T) -> Self {
        Self::with_config(inner, FrameConfig::default())
    }

    pub fn with_config(inner: T, config: FrameConfig) -> Self {
        Self {
            inner,
            state: FrameBuffer::new(config),
        }
    }

    /// Read the next complete frame.
    ///
    /// Same end-of-stream semantics as [`FrameReader::read_frame`].
    pub async fn read_frame(&mut self) -> Result<Frame> {
        use tokio::io::AsyncReadExt;

        loop {
            if let Some(frame) = self.state.next_frame()? {
                return Ok(frame);
            }

            self.state.buf.reserve(READ_CHUNK_SIZE);
            let read = match self.inner.read_buf(&mut self.state.buf).await {
                Ok(n) => n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(FrameError::Io(err)),
            };

            if read == 0 {
                return Err(self.state.end_of_stream());
            }
        }
    }

    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    pub fn into_inner(self) -> T {
        self.inner
    }
}
