//! The per-connection receive loop.
//!
//! The loop is the only reader of the transport. It decodes frames in
//! arrival order, answers device-initiated requests and hands every message
//! to the registry. It never waits on the write half; dispatch is its only
//! back-pressure. Whatever ends it, the connection is closed exactly once.

use std::sync::Arc;

use espwire_frame::{AsyncFrameReader, FrameError};
use espwire_proto::Message;
use espwire_transport::BoxedReader;
use tracing::{debug, warn};

use crate::connection::Shared;
use crate::control;
use crate::state::CloseReason;

pub(crate) type DeviceReader = AsyncFrameReader<BoxedReader>;

/// Closes the connection even if the task is aborted mid-loop.
struct CloseGuard {
    shared: Arc<Shared>,
}

impl Drop for CloseGuard {
    fn drop(&mut self) {
        self.shared.mark_closed(local_reason(&self.shared));
    }
}

pub(crate) fn spawn(reader: DeviceReader, shared: Arc<Shared>) {
    tokio::spawn(run(reader, shared));
}

async fn run(mut reader: DeviceReader, shared: Arc<Shared>) {
    let _guard = CloseGuard {
        shared: Arc::clone(&shared),
    };
    let ending = receive_until_closed(&mut reader, &shared).await;
    debug!(reason = %ending.reason, "receive loop finished");
    drop(reader);
    shared.finish(ending.reason, ending.farewell).await;
}

/// Why the loop stopped, and the last reply owed to the device.
struct Ending {
    reason: CloseReason,
    farewell: Option<Message>,
}

impl From<CloseReason> for Ending {
    fn from(reason: CloseReason) -> Self {
        Self {
            reason,
            farewell: None,
        }
    }
}

fn local_reason(shared: &Shared) -> CloseReason {
    shared.close_reason().unwrap_or(CloseReason::Local)
}

async fn receive_until_closed(reader: &mut DeviceReader, shared: &Arc<Shared>) -> Ending {
    loop {
        let result = tokio::select! {
            biased;
            _ = shared.shutdown.cancelled() => return local_reason(shared).into(),
            result = reader.read_frame() => result,
        };

        let frame = match result {
            Ok(frame) => frame,
            Err(FrameError::ConnectionClosed) => return CloseReason::PeerClosed.into(),
            Err(FrameError::Io(err)) => return CloseReason::Transport(err.to_string()).into(),
            Err(err) => {
                warn!(error = %err, "skipping malformed frame");
                continue;
            }
        };

        let message = match Message::decode(frame.message_type, &frame.payload) {
            Ok(message) => message,
            Err(err) => {
                warn!(
                    message_type = frame.message_type,
                    error = %err,
                    "skipping undecodable frame"
                );
                continue;
            }
        };
        debug!(message = message.name(), bytes = frame.payload.len(), "received");

        let farewell = if shared.config.answer_device_requests {
            control::answer_device_request(shared, &message)
        } else {
            None
        };

        tokio::select! {
            biased;
            _ = shared.shutdown.cancelled() => return local_reason(shared).into(),
            _ = shared.registry.dispatch(Arc::new(message)) => {}
        }

        if farewell.is_some() {
            return Ending {
                reason: CloseReason::Disconnected,
                farewell,
            };
        }
    }
}
