//! Replies to requests the device initiates.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use espwire_proto::{DisconnectResponse, GetTimeResponse, Message, PingResponse};
use tracing::debug;

use crate::connection::Shared;

/// Seconds since the Unix epoch, as carried by `GetTimeResponse`.
pub fn epoch_seconds() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| u32::try_from(elapsed.as_secs()).unwrap_or(u32::MAX))
        .unwrap_or(0)
}

/// Answer `message` if it is a device-initiated request.
///
/// Ping and time replies are written from their own task so the caller
/// keeps reading while the write half is busy. A disconnect request returns
/// its reply instead; it goes out while the connection shuts down.
pub(crate) fn answer_device_request(shared: &Arc<Shared>, message: &Message) -> Option<Message> {
    let reply = match message {
        Message::PingRequest(_) => Message::from(PingResponse {}),
        Message::GetTimeRequest(_) => Message::from(GetTimeResponse {
            epoch_seconds: epoch_seconds(),
        }),
        Message::DisconnectRequest(_) => {
            shared.begin_disconnect();
            return Some(Message::from(DisconnectResponse {}));
        }
        _ => return None,
    };

    let shared = Arc::clone(shared);
    tokio::spawn(async move {
        let id = reply.id();
        if let Err(err) = shared.send(reply).await {
            debug!(reply = %id, error = %err, "could not answer device request");
        }
    });
    None
}
