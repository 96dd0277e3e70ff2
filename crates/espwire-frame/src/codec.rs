use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::{FrameError, Result};
use crate::varint::{decode_varint, encode_varint, encoded_len};

/// First byte of every plaintext frame.
pub const PREAMBLE: u8 = 0x00;

/// Default maximum payload size: 16 MiB.
pub const DEFAULT_MAX_PAYLOAD: usize = 16 * 1024 * 1024;

/// A framed message tagged with its message type id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Message type id selecting the payload schema.
    pub message_type: u32,
    /// The serialized message.
    pub payload: Bytes,
}

impl Frame {
    /// Create a new frame.
    pub fn new(message_type: u32, payload: impl Into<Bytes>) -> Self {
        Self {
            message_type,
            payload: payload.into(),
        }
    }

    /// The total wire size of this frame (header + payload).
    pub fn wire_size(&self) -> usize {
        1 + encoded_len(self.payload.len() as u64)
            + encoded_len(u64::from(self.message_type))
            + self.payload.len()
    }
}

/// A parsed frame header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    pub message_type: u32,
    pub payload_len: usize,
    /// Bytes taken by preamble and both varints.
    pub header_len: usize,
}

impl FrameHeader {
    /// Header plus payload.
    pub fn frame_len(&self) -> usize {
        self.header_len + self.payload_len
    }
}

/// Encode a frame into the wire format.
///
/// Wire format:
/// ```text
/// ┌──────────┬──────────────┬──────────────┬────────────────┐
/// │ Preamble │ Length       │ Type         │ Payload        │
/// │ 0x00     │ (varint)     │ (varint)     │ (Length bytes) │
/// └──────────┴──────────────┴──────────────┴────────────────┘
/// ```
pub fn encode_frame(message_type: u32, payload: &[u8], dst: &mut BytesMut) -> Result<()> {
    if payload.len() > u32::MAX as usize {
        return Err(FrameError::PayloadTooLarge {
            size: payload.len(),
            max: u32::MAX as usize,
        });
    }
    let len = payload.len() as u64;
    dst.reserve(1 + encoded_len(len) + encoded_len(u64::from(message_type)) + payload.len());
    dst.put_u8(PREAMBLE);
    encode_varint(len, dst);
    encode_varint(u64::from(message_type), dst);
    dst.put_slice(payload);
    Ok(())
}

/// Parse a frame header without consuming anything.
///
/// Returns `Ok(None)` if the buffer doesn't hold a complete header yet.
pub fn decode_header(src: &[u8]) -> Result<Option<FrameHeader>> {
    let Some(&first) = src.first() else {
        return Ok(None);
    };
    if first != PREAMBLE {
        return Err(FrameError::BadPreamble {
            byte: first,
            skipped: 0,
        });
    }

    let Some((len, len_bytes)) = decode_varint(&src[1..])? else {
        return Ok(None);
    };
    let Some((message_type, type_bytes)) = decode_varint(&src[1 + len_bytes..])? else {
        return Ok(None);
    };

    let payload_len = usize::try_from(len).map_err(|_| FrameError::InvalidVarint)?;
    let message_type = u32::try_from(message_type).map_err(|_| FrameError::InvalidVarint)?;

    Ok(Some(FrameHeader {
        message_type,
        payload_len,
        header_len: 1 + len_bytes + type_bytes,
    }))
}

/// Decode a frame from a buffer.
///
/// Returns `Ok(None)` if the buffer doesn't contain a complete frame yet.
/// On success, consumes the frame bytes from the buffer. On a bad preamble
/// the buffer is advanced to the next `0x00` byte so decoding can resume;
/// on a malformed varint only the preamble is consumed. An oversized frame
/// is left in place.
pub fn decode_frame(src: &mut BytesMut, max_payload: usize) -> Result<Option<Frame>> {
    let header = match decode_header(src) {
        Ok(Some(header)) => header,
        Ok(None) => return Ok(None), // Need more data
        Err(FrameError::BadPreamble { byte, .. }) => {
            let skipped = src
                .iter()
                .position(|&b| b == PREAMBLE)
                .unwrap_or(src.len());
            src.advance(skipped);
            return Err(FrameError::BadPreamble { byte, skipped });
        }
        Err(err) => {
            // Drop the preamble so the next call rescans from the following byte.
            src.advance(1);
            return Err(err);
        }
    };

    if header.payload_len > max_payload {
        return Err(FrameError::PayloadTooLarge {
            size: header.payload_len,
            max: max_payload,
        });
    }

    if src.len() < header.frame_len() {
        return Ok(None); // Need more data
    }

    src.advance(header.header_len);
    let payload = src.split_to(header.payload_len).freeze();

    Ok(Some(Frame {
        message_type: header.message_type,
        payload,
    }))
}

/// Configuration for the frame codec.
#[derive(Debug, Clone)]
pub struct FrameConfig {
    /// Maximum payload size in bytes. Default: 16 MiB.
    pub max_payload_size: usize,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            max_payload_size: DEFAULT_MAX_PAYLOAD,
        }
    }
}

/// `tokio_util` codec over [`encode_frame`] / [`decode_frame`].
#[cfg(feature = "async")]
#[derive(Debug, Clone)]
pub struct FrameCodec {
    max_payload_size: usize,
}

#[cfg(feature = "async")]
impl FrameCodec {
    pub fn new(config: &FrameConfig) -> Self {
        Self {
            max_payload_size: config.max_payload_size,
        }
    }
}

#[cfg(feature = "async")]
impl Default for FrameCodec {
    fn default() -> Self {
        Self::new(&FrameConfig::default())
    }
}

#[cfg(feature = "async")]
impl tokio_util::codec::Decoder for FrameCodec {
    type Item = Frame;
    type Error = FrameError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Frame>> {
        decode_frame(src, self.max_payload_size)
    }

    fn decode_eof(&mut self, buf: &mut BytesMut) -> Result<Option<Frame>> {
        match self.decode(buf)? {
            Some(frame) => Ok(Some(frame)),
            None if buf.is_empty() => Ok(None),
            None => {
                let available = buf.len();
                let expected = decode_header(buf).ok().flatten().map(|h| h.frame_len());
                buf.clear();
                Err(FrameError::Truncated {
                    expected,
                    available,
                })
            }
        }
    }
}

#[cfg(feature = "async")]
impl tokio_util::codec::Encoder<Frame> for FrameCodec {
    type Error = FrameError;

    fn encode(&mut self, frame: Frame, dst: &mut BytesMut) -> Result<()> {
        if frame.payload.len() > self.max_payload_size {
            return Err(FrameError::PayloadTooLarge {
                size: frame.payload.len(),
                max: self.max_payload_size,
            });
        }
        encode_frame(frame.message_type, &frame.payload, dst)
    }
}
