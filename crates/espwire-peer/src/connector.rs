use crate::config::ConnectionConfig;
use crate::connection::Connection;
use crate::error::Result;

/// Dial a device with the default configuration.
pub async fn dial(addr: &str) -> Result<Connection> {
    dial_with_config(addr, ConnectionConfig::default()).await
}

/// Dial a device with explicit configuration. No handshake is performed.
pub async fn dial_with_config(addr: &str, config: ConnectionConfig) -> Result<Connection> {
    let conn = Connection::new(config);
    conn.dial(addr).await?;
    Ok(conn)
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::net::{TcpListener, TcpStream};
    use std::thread;

    use espwire_frame::{encode_frame, FrameReader};
    use espwire_proto::{
        ConnectResponse, DeviceInfoResponse, HelloResponse, Message, MessageId, PingResponse,
    };

    use super::*;
    use crate::{CloseReason, ConnectionState, PeerError};

    /// Blocking mock device answering one client until it disconnects.
    fn spawn_device(listener: TcpListener) -> thread::JoinHandle<Vec<MessageId>> {
        thread::spawn(move || {
            let (stream, _) = listener.accept().expect("device should accept");
            let mut reader = FrameReader::new(stream.try_clone().expect("stream should clone"));
            let mut stream = stream;
            let mut seen = Vec::new();

            while let Ok(frame) = reader.read_frame() {
                let request = Message::decode(frame.message_type, &frame.payload)
                    .expect("client should send known messages");
                seen.push(request.id());
                let reply: Message = match request.id() {
                    MessageId::HelloRequest => HelloResponse {
                        api_version_major: 1,
                        api_version_minor: 3,
                        server_info: "fake-server".into(),
                    }
                    .into(),
                    MessageId::ConnectRequest => ConnectResponse {
                        invalid_password: false,
                    }
                    .into(),
                    MessageId::DeviceInfoRequest => DeviceInfoResponse {
                        name: "garage".into(),
                        mac_address: "AA:BB:CC:DD:EE:FF".into(),
                        esphome_version: "1.14.3".into(),
                        ..Default::default()
                    }
                    .into(),
                    MessageId::PingRequest => PingResponse {}.into(),
                    MessageId::DisconnectRequest => {
                        espwire_proto::DisconnectResponse {}.into()
                    }
                    _ => continue,
                };
                write_message(&mut stream, &reply);
            }
            seen
        })
    }

    /// Write `message` as one complete frame.
    fn write_message(stream: &mut TcpStream, message: &Message) {
        let mut buf = Default::default();
        encode_frame(message.id().as_u32(), &message.encode_payload(), &mut buf)
            .expect("reply should encode");
        stream.write_all(&buf).expect("device should reply");
    }

    #[tokio::test]
    async fn dial_handshake_and_query_over_tcp() {
        let listener = TcpListener::bind("127.0.0.1:0").expect("listener should bind");
        let addr = listener.local_addr().expect("listener should have an address");
        let device = spawn_device(listener);

        let conn = dial(&addr.to_string()).await.expect("dial should succeed");
        assert_eq!(conn.state(), ConnectionState::Open);

        let hello = conn.handshake().await.expect("handshake should succeed");
        assert_eq!(hello.server_info, "fake-server");
        assert_eq!(conn.state(), ConnectionState::Authenticated);

        let info = conn.device_info().await.expect("device info should arrive");
        assert_eq!(info.name, "garage");
        conn.ping().await.expect("ping should round-trip");

        conn.disconnect().await.expect("disconnect should succeed");
        assert_eq!(conn.close_reason(), Some(CloseReason::Disconnected));

        let seen = device.join().expect("device thread should complete");
        assert_eq!(
            seen,
            vec![
                MessageId::HelloRequest,
                MessageId::ConnectRequest,
                MessageId::DeviceInfoRequest,
                MessageId::PingRequest,
                MessageId::DisconnectRequest,
            ]
        );
    }

    #[tokio::test]
    async fn dial_refused_reports_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").expect("listener should bind");
        let addr = listener.local_addr().expect("listener should have an address");
        drop(listener);

        let conn = Connection::new(ConnectionConfig::default());
        let err = conn.dial(&addr.to_string()).await.unwrap_err();
        assert!(matches!(err, PeerError::Transport(_)));
        assert_eq!(conn.state(), ConnectionState::Idle);
    }

    #[tokio::test]
    async fn operations_before_dial_are_rejected() {
        let conn = Connection::new(ConnectionConfig::default());
        assert!(matches!(conn.ping().await, Err(PeerError::NotConnected)));
        assert!(matches!(
            conn.subscribe_states().await,
            Err(PeerError::NotConnected)
        ));
    }
}
