//! Framing for the ESPHome native API.
//!
//! Every message on the wire is framed as:
//! - A single `0x00` preamble byte
//! - A varint payload length
//! - A varint message type id
//!
//! followed by exactly `length` payload bytes. Readers only ever hand out
//! complete frames; partial reads are buffered internally.

pub mod codec;
pub mod error;
pub mod reader;
pub mod varint;

#[cfg(feature = "async")]
pub use codec::FrameCodec;
pub use codec::{
    decode_frame, decode_header, encode_frame, Frame, FrameConfig, FrameHeader,
    DEFAULT_MAX_PAYLOAD, PREAMBLE,
};
pub use error::{FrameError, Result};
#[cfg(feature = "async")]
pub use reader::AsyncFrameReader;
pub use reader::FrameReader;
