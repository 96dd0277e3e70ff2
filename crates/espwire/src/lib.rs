//! Client for the ESPHome native API.
//!
//! espwire talks to ESPHome devices over their plain-TCP binary protocol:
//! framed protobuf messages, a request/response and subscription layer on
//! top, and a typed view of the entities a device exposes.
//!
//! # Crate Structure
//!
//! - [`transport`]: TCP dialing and boxed stream halves
//! - [`frame`]: preamble/varint framing
//! - [`proto`]: the message catalog (ids, schemas, encode/decode)
//! - [`peer`]: connections, subscriptions and entities (behind `peer` feature)

/// Re-export transport types.
pub mod transport {
    pub use espwire_transport::*;
}

/// Re-export frame types.
pub mod frame {
    pub use espwire_frame::*;
}

/// Re-export catalog types.
pub mod proto {
    pub use espwire_proto::*;
}

/// Re-export connection types (requires `peer` feature).
#[cfg(feature = "peer")]
pub mod peer {
    pub use espwire_peer::*;
}
