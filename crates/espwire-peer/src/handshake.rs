use espwire_proto::{ConnectRequest, ConnectResponse, HelloRequest, HelloResponse};
use tracing::{debug, info, warn};

use crate::connection::Connection;
use crate::error::{PeerError, Result};
use crate::state::{CloseReason, ConnectionState};

impl Connection {
    /// Introduce the client and learn the device's API version.
    pub async fn hello(&self, client_info: &str) -> Result<HelloResponse> {
        let request = HelloRequest {
            client_info: client_info.to_string(),
        };
        let response: HelloResponse = self.shared().request(request).await?;
        info!(
            server_info = %response.server_info,
            api_version_major = response.api_version_major,
            api_version_minor = response.api_version_minor,
            "device said hello"
        );
        Ok(response)
    }

    /// Authenticate with `password`.
    ///
    /// A rejected password closes the connection with
    /// [`CloseReason::AuthRejected`] and returns [`PeerError::AuthFailed`].
    pub async fn connect(&self, password: &str) -> Result<()> {
        let request = ConnectRequest {
            password: password.to_string(),
        };
        let response: ConnectResponse = self.shared().request(request).await?;

        if response.invalid_password {
            warn!("device rejected the password");
            self.shared().close_with(CloseReason::AuthRejected);
            self.shared().terminated.cancelled().await;
            return Err(PeerError::AuthFailed);
        }

        self.shared().set_state(ConnectionState::Authenticated);
        debug!("authenticated");
        Ok(())
    }

    /// `hello` with the configured client info, then `connect` with the
    /// configured password.
    pub async fn handshake(&self) -> Result<HelloResponse> {
        let config = self.config();
        let hello = self.hello(&config.client_info).await?;
        self.connect(&config.password).await?;
        Ok(hello)
    }
}

#[cfg(test)]
mod tests {
    use espwire_proto::{ConnectRequest, ConnectResponse, HelloRequest, HelloResponse};

    use crate::config::ConnectionConfig;
    use crate::testing::{connected_pair, MockDevice};
    use crate::{CloseReason, ConnectionState, PeerError};

    async fn answer_connect(device: &mut MockDevice, accepted_password: &str) -> String {
        let request = device.expect::<ConnectRequest>().await;
        device
            .send(ConnectResponse {
                invalid_password: request.password != accepted_password,
            })
            .await;
        request.password
    }

    #[tokio::test]
    async fn hello_returns_device_identity() {
        let (conn, mut device) = connected_pair(ConnectionConfig::default()).await;

        let (response, client_info) = tokio::join!(conn.hello("test-client"), async {
            let request = device.expect::<HelloRequest>().await;
            device
                .send(HelloResponse {
                    api_version_major: 1,
                    api_version_minor: 3,
                    server_info: "fake-server".into(),
                })
                .await;
            request.client_info
        });

        assert_eq!(client_info, "test-client");
        assert_eq!(
            response.unwrap(),
            HelloResponse {
                api_version_major: 1,
                api_version_minor: 3,
                server_info: "fake-server".into(),
            }
        );
        assert_eq!(conn.state(), ConnectionState::Open);
    }

    #[tokio::test]
    async fn wrong_password_closes_connection() {
        let (conn, mut device) = connected_pair(ConnectionConfig::default()).await;

        let (result, _) = tokio::join!(conn.connect("wrong"), answer_connect(&mut device, "right"));
        assert!(matches!(result, Err(PeerError::AuthFailed)));
        assert_eq!(conn.state(), ConnectionState::Closed);
        assert_eq!(conn.close_reason(), Some(CloseReason::AuthRejected));

        let second = conn.connect("right").await;
        assert!(matches!(
            second,
            Err(PeerError::Closed(CloseReason::AuthRejected))
        ));
        // Nothing more reaches the device; its stream just ends.
        assert!(device.recv_raw().await.is_none());
    }

    #[tokio::test]
    async fn right_password_authenticates() {
        let (conn, mut device) = connected_pair(ConnectionConfig::default()).await;

        let (result, sent) = tokio::join!(conn.connect("right"), answer_connect(&mut device, "right"));
        result.unwrap();
        assert_eq!(sent, "right");
        assert_eq!(conn.state(), ConnectionState::Authenticated);
    }

    #[tokio::test]
    async fn handshake_uses_configured_credentials() {
        let config = ConnectionConfig::default()
            .with_client_info("kitchen-panel")
            .with_password("letmein");
        let (conn, mut device) = connected_pair(config).await;

        let (result, sent) = tokio::join!(conn.handshake(), async {
            let hello = device.expect::<HelloRequest>().await;
            device
                .send(HelloResponse {
                    api_version_major: 1,
                    api_version_minor: 3,
                    server_info: "fake-server".into(),
                })
                .await;
            let password = answer_connect(&mut device, "letmein").await;
            (hello.client_info, password)
        });

        assert_eq!(result.unwrap().server_info, "fake-server");
        assert_eq!(sent, ("kitchen-panel".to_string(), "letmein".to_string()));
        assert_eq!(conn.state(), ConnectionState::Authenticated);
    }
}
