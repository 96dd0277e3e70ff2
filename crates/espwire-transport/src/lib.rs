//! TCP transport for the ESPHome native API.
//!
//! Devices listen on a plain TCP port (6053 by default). This is the lowest
//! layer of espwire: it resolves addresses, dials the device and hands the
//! rest of the stack a pair of boxed read/write halves.

pub mod error;
pub mod tcp;
pub mod traits;

pub use error::{Result, TransportError};
pub use tcp::{with_default_port, TcpTransport, TransportConfig, DEFAULT_PORT};
pub use traits::{split, BoxedReader, BoxedWriter, DeviceIo};
