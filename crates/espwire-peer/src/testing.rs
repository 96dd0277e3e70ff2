//! In-memory mock device for unit tests.

use espwire_frame::{Frame, FrameCodec};
use espwire_proto::{Message, Schema};
use futures_util::{SinkExt, StreamExt};
use tokio::io::DuplexStream;
use tokio_util::codec::Framed;

use crate::config::ConnectionConfig;
use crate::connection::Connection;

pub(crate) struct MockDevice {
    framed: Framed<DuplexStream, FrameCodec>,
}

impl MockDevice {
    pub(crate) async fn send(&mut self, message: impl Into<Message>) {
        let message = message.into();
        self.framed
            .send(Frame::new(message.id().as_u32(), message.encode_payload()))
            .await
            .expect("mock device write should succeed");
    }

    pub(crate) async fn send_raw(&mut self, bytes: &[u8]) {
        use tokio::io::AsyncWriteExt;

        self.framed
            .get_mut()
            .write_all(bytes)
            .await
            .expect("mock device write should succeed");
    }

    /// Next frame from the client, or `None` once the client closed.
    pub(crate) async fn recv_raw(&mut self) -> Option<Message> {
        let frame = self.framed.next().await?.expect("client frames should decode");
        let message = Message::decode(frame.message_type, &frame.payload)
            .expect("client should send known messages");
        Some(message)
    }

    /// Next frame from the client, which must be an `S`.
    pub(crate) async fn expect<S: Schema>(&mut self) -> S {
        let message = self
            .recv_raw()
            .await
            .expect("client closed while the device was waiting");
        S::from_message(&message)
            .cloned()
            .unwrap_or_else(|| panic!("expected {}, got {}", S::ID, message.id()))
    }
}

/// A connection attached to an in-memory device.
pub(crate) async fn connected_pair(config: ConnectionConfig) -> (Connection, MockDevice) {
    connected_pair_with_buffer(config, 64 * 1024).await
}

/// Like [`connected_pair`], with `max_buf` bytes of buffering each way.
pub(crate) async fn connected_pair_with_buffer(
    config: ConnectionConfig,
    max_buf: usize,
) -> (Connection, MockDevice) {
    let (client, device) = tokio::io::duplex(max_buf);
    let conn = Connection::new(config);
    conn.attach(client).await.expect("attach should succeed");
    let device = MockDevice {
        framed: Framed::new(device, FrameCodec::default()),
    };
    (conn, device)
}
