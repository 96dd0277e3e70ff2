use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use espwire_frame::{AsyncFrameReader, Frame, FrameCodec, FrameError};
use espwire_proto::{
    CameraImageRequest, CameraImageResponse, ClimateCommandRequest, CoverCommandRequest,
    DeviceInfoRequest, DeviceInfoResponse, DisconnectRequest, DisconnectResponse,
    ExecuteServiceRequest, FanCommandRequest, LightCommandRequest, ListEntitiesRequest, LogLevel,
    Message, MessageId, PingRequest, PingResponse, Schema, SubscribeLogsRequest,
    SubscribeStatesRequest, SwitchCommandRequest,
};
use espwire_transport::{
    split, with_default_port, BoxedWriter, DeviceIo, TcpTransport, TransportError,
};
use futures_util::SinkExt;
use tokio::io::AsyncWriteExt;
use tokio_util::codec::FramedWrite;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::ConnectionConfig;
use crate::entity::Entity;
use crate::error::{PeerError, Result};
use crate::receive;
use crate::registry::{Delivery, SubscriberRegistry, Subscription};
use crate::state::{CloseReason, ConnectionState};
use crate::stream::MessageStream;

pub(crate) type DeviceWriter = FramedWrite<BoxedWriter, FrameCodec>;

/// Command schemas accepted by [`Connection::send_command`].
pub trait Command: Schema {}

impl Command for SwitchCommandRequest {}
impl Command for LightCommandRequest {}
impl Command for CoverCommandRequest {}
impl Command for FanCommandRequest {}
impl Command for ClimateCommandRequest {}
impl Command for ExecuteServiceRequest {}

#[derive(Debug)]
pub(crate) struct Lifecycle {
    pub(crate) state: ConnectionState,
    pub(crate) reason: Option<CloseReason>,
    /// A disconnect exchange is in flight; any closure counts as negotiated.
    pub(crate) disconnecting: bool,
    /// A receive loop owns the close path.
    pub(crate) running: bool,
}

/// State shared by every handle of one connection and its receive loop.
pub(crate) struct Shared {
    pub(crate) config: ConnectionConfig,
    pub(crate) registry: SubscriberRegistry,
    writer: tokio::sync::Mutex<Option<DeviceWriter>>,
    lifecycle: Mutex<Lifecycle>,
    /// Cancelled to stop the receive loop.
    pub(crate) shutdown: CancellationToken,
    /// Cancelled once the connection is fully closed.
    pub(crate) terminated: CancellationToken,
    request_locks: Mutex<HashMap<MessageId, Arc<tokio::sync::Mutex<()>>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Socket errors on the write half are transport failures.
fn write_failure(err: FrameError) -> PeerError {
    match err {
        FrameError::Io(source) => TransportError::Io(source).into(),
        other => other.into(),
    }
}

impl Shared {
    fn new(config: ConnectionConfig) -> Self {
        let registry = SubscriberRegistry::new(config.sink_capacity, config.overflow);
        Self {
            config,
            registry,
            writer: tokio::sync::Mutex::new(None),
            lifecycle: Mutex::new(Lifecycle {
                state: ConnectionState::Idle,
                reason: None,
                disconnecting: false,
                running: false,
            }),
            shutdown: CancellationToken::new(),
            terminated: CancellationToken::new(),
            request_locks: Mutex::new(HashMap::new()),
        }
    }

    pub(crate) fn state(&self) -> ConnectionState {
        lock(&self.lifecycle).state
    }

    pub(crate) fn close_reason(&self) -> Option<CloseReason> {
        lock(&self.lifecycle).reason.clone()
    }

    fn closed_error(&self) -> PeerError {
        PeerError::Closed(self.close_reason().unwrap_or(CloseReason::Local))
    }

    /// Fail fast unless a transport is attached and still open.
    pub(crate) fn ensure_live(&self) -> Result<()> {
        let lifecycle = lock(&self.lifecycle);
        match lifecycle.state {
            ConnectionState::Open | ConnectionState::Authenticated => Ok(()),
            ConnectionState::Idle | ConnectionState::Dialing => Err(PeerError::NotConnected),
            ConnectionState::Closed => Err(PeerError::Closed(
                lifecycle.reason.clone().unwrap_or(CloseReason::Local),
            )),
        }
    }

    pub(crate) fn set_state(&self, state: ConnectionState) {
        let mut lifecycle = lock(&self.lifecycle);
        if lifecycle.state != ConnectionState::Closed {
            lifecycle.state = state;
        }
    }

    /// Record `reason` and move to `Closed`. Returns the reason in effect.
    fn record_close(&self, reason: CloseReason) -> CloseReason {
        let mut lifecycle = lock(&self.lifecycle);
        lifecycle.state = ConnectionState::Closed;
        let reason = match reason {
            CloseReason::PeerClosed | CloseReason::Transport(_) if lifecycle.disconnecting => {
                CloseReason::Disconnected
            }
            reason => reason,
        };
        lifecycle.reason.get_or_insert(reason).clone()
    }

    /// Close locally: record the reason and stop the receive loop.
    pub(crate) fn close_with(&self, reason: CloseReason) {
        let reason = self.record_close(reason);
        let running = lock(&self.lifecycle).running;
        if !self.shutdown.is_cancelled() {
            debug!(%reason, "closing connection");
        }
        self.shutdown.cancel();
        // Without a receive loop nobody else finishes the close.
        if !running {
            self.mark_closed(reason);
        }
    }

    /// Final step of every close path. Idempotent.
    pub(crate) fn mark_closed(&self, reason: CloseReason) {
        let reason = self.record_close(reason);
        self.shutdown.cancel();
        self.registry.close(reason);
        self.terminated.cancel();
    }

    /// Shut the write half down and finish the close.
    ///
    /// `farewell` is written first, bounded by the request timeout. Writes
    /// still pending elsewhere are abandoned once shutdown is signalled.
    pub(crate) async fn finish(&self, reason: CloseReason, farewell: Option<Message>) {
        let reason = self.record_close(reason);
        self.shutdown.cancel();
        if let Some(mut writer) = self.writer.lock().await.take() {
            if let Some(message) = farewell {
                self.write_farewell(&mut writer, message).await;
            }
            let mut stream = writer.into_inner();
            if let Err(err) = stream.shutdown().await {
                debug!(error = %err, "write half shutdown failed");
            }
        }
        info!(%reason, "connection closed");
        self.mark_closed(reason);
    }

    async fn write_farewell(&self, writer: &mut DeviceWriter, message: Message) {
        let id = message.id();
        let sending = writer.send(Frame::new(id.as_u32(), message.encode_payload()));
        let written = match self.config.request_timeout {
            Some(timeout) => tokio::time::timeout(timeout, sending).await.ok(),
            None => Some(sending.await),
        };
        match written {
            Some(Ok(())) => debug!(message = %id, "sent"),
            Some(Err(err)) => debug!(message = %id, error = %err, "final reply not written"),
            None => debug!(message = %id, "final reply timed out"),
        }
    }

    pub(crate) fn begin_disconnect(&self) {
        lock(&self.lifecycle).disconnecting = true;
    }

    /// Encode and write one message. Whole frames never interleave.
    pub(crate) async fn send(&self, message: Message) -> Result<()> {
        self.ensure_live()?;
        let id = message.id();
        let frame = Frame::new(id.as_u32(), message.encode_payload());

        let mut guard = self.writer.lock().await;
        let Some(writer) = guard.as_mut() else {
            return Err(self.closed_error());
        };
        let result = tokio::select! {
            biased;
            _ = self.shutdown.cancelled() => return Err(self.closed_error()),
            result = writer.send(frame) => result,
        };
        drop(guard);

        match result {
            Ok(()) => {
                debug!(message = %id, "sent");
                Ok(())
            }
            Err(err @ FrameError::PayloadTooLarge { .. }) => Err(err.into()),
            Err(err) => {
                warn!(message = %id, error = %err, "write failed, closing connection");
                self.close_with(CloseReason::Transport(err.to_string()));
                Err(write_failure(err))
            }
        }
    }

    fn request_lock(&self, id: MessageId) -> Arc<tokio::sync::Mutex<()>> {
        Arc::clone(lock(&self.request_locks).entry(id).or_default())
    }

    /// Wait for the next delivery, bounded by the request timeout.
    pub(crate) async fn next_delivery(&self, sub: &mut Subscription) -> Result<Delivery> {
        let wait = async {
            sub.recv().await.unwrap_or_else(|| {
                Delivery::Closed(self.close_reason().unwrap_or(CloseReason::Local))
            })
        };
        match self.config.request_timeout {
            Some(timeout) => tokio::time::timeout(timeout, wait)
                .await
                .map_err(|_| PeerError::Timeout(timeout)),
            None => Ok(wait.await),
        }
    }

    /// Send `request` and wait for one `R` reply.
    ///
    /// The reply subscriber is registered before the request is written and
    /// released on every exit path.
    pub(crate) async fn request<R: Schema>(&self, request: impl Schema) -> Result<R> {
        self.ensure_live()?;
        let serial = self.request_lock(R::ID);
        let _serial = serial.lock().await;

        let mut sub = self.registry.subscribe([R::ID])?;
        self.send(request.into_message()).await?;

        match self.next_delivery(&mut sub).await? {
            Delivery::Message(message) => R::from_message(&message)
                .cloned()
                .ok_or(PeerError::UnexpectedMessage(message.id())),
            Delivery::Closed(reason) => Err(PeerError::Closed(reason)),
        }
    }
}

struct Handle {
    shared: Arc<Shared>,
}

impl Drop for Handle {
    fn drop(&mut self) {
        self.shared.close_with(CloseReason::Local);
    }
}

/// A client connection to one device.
///
/// Cloning is cheap; all clones drive the same transport. Dropping the last
/// clone closes the connection.
#[derive(Clone)]
pub struct Connection {
    handle: Arc<Handle>,
}

impl Connection {
    /// Create an idle connection. Nothing is dialed yet.
    pub fn new(config: ConnectionConfig) -> Self {
        Self {
            handle: Arc::new(Handle {
                shared: Arc::new(Shared::new(config)),
            }),
        }
    }

    pub(crate) fn shared(&self) -> &Shared {
        &self.handle.shared
    }

    pub fn config(&self) -> &ConnectionConfig {
        &self.shared().config
    }

    pub fn state(&self) -> ConnectionState {
        self.shared().state()
    }

    /// The close reason, once the connection is closed.
    pub fn close_reason(&self) -> Option<CloseReason> {
        self.shared().close_reason()
    }

    /// Subscriber table of this connection.
    pub fn registry(&self) -> &SubscriberRegistry {
        &self.shared().registry
    }

    fn begin_attach(&self, next: ConnectionState) -> Result<()> {
        let shared = self.shared();
        let mut lifecycle = lock(&shared.lifecycle);
        match lifecycle.state {
            ConnectionState::Idle if next == ConnectionState::Dialing => {
                lifecycle.state = next;
                Ok(())
            }
            ConnectionState::Dialing if next == ConnectionState::Open => {
                lifecycle.state = next;
                lifecycle.running = true;
                Ok(())
            }
            ConnectionState::Closed => Err(PeerError::Closed(
                lifecycle.reason.clone().unwrap_or(CloseReason::Local),
            )),
            _ => Err(PeerError::AlreadyConnected),
        }
    }

    /// Open a TCP connection to `addr` and start the receive loop.
    ///
    /// `addr` may omit the port; the transport's default port is used.
    pub async fn dial(&self, addr: &str) -> Result<()> {
        self.begin_attach(ConnectionState::Dialing)?;
        let transport = &self.config().transport;
        let addr = with_default_port(addr, transport.default_port);

        match TcpTransport::connect(&addr, transport).await {
            Ok(stream) => self.start(stream),
            Err(err) => {
                self.shared().set_state(ConnectionState::Idle);
                Err(err.into())
            }
        }
    }

    /// Use an already connected stream and start the receive loop.
    pub async fn attach<T: DeviceIo>(&self, io: T) -> Result<()> {
        self.begin_attach(ConnectionState::Dialing)?;
        self.start(io)
    }

    fn start<T: DeviceIo>(&self, io: T) -> Result<()> {
        let shared = &self.handle.shared;
        let (reader, writer) = split(io);
        let reader = AsyncFrameReader::with_config(reader, shared.config.frame.clone());
        let writer = FramedWrite::new(writer, FrameCodec::new(&shared.config.frame));

        {
            // Uncontended while dialing: `send` refuses to run before `Open`.
            let Ok(mut slot) = shared.writer.try_lock() else {
                return Err(PeerError::AlreadyConnected);
            };
            self.begin_attach(ConnectionState::Open)?;
            *slot = Some(writer);
        }

        receive::spawn(reader, Arc::clone(shared));
        debug!("connection open");
        Ok(())
    }

    pub async fn device_info(&self) -> Result<DeviceInfoResponse> {
        self.shared().request(DeviceInfoRequest {}).await
    }

    /// Round-trip time of one ping exchange.
    pub async fn ping(&self) -> Result<Duration> {
        let started = Instant::now();
        let _: PingResponse = self.shared().request(PingRequest {}).await?;
        Ok(started.elapsed())
    }

    /// Enumerate the device's entities, in the order the device sends them.
    ///
    /// If the connection closes first, [`PeerError::IncompleteListing`]
    /// carries the entities received so far.
    pub async fn list_entities(&self) -> Result<Vec<Entity>> {
        let shared = self.shared();
        shared.ensure_live()?;
        let serial = shared.request_lock(MessageId::ListEntitiesDoneResponse);
        let _serial = serial.lock().await;

        let filter = MessageId::LIST_ENTITY_RESPONSES.iter().copied().chain([
            MessageId::ListEntitiesServicesResponse,
            MessageId::ListEntitiesDoneResponse,
        ]);
        let mut sub = shared.registry.subscribe(filter)?;
        shared.send(ListEntitiesRequest {}.into_message()).await?;

        let mut entities = Vec::new();
        loop {
            match shared.next_delivery(&mut sub).await? {
                Delivery::Message(message) => match message.id() {
                    MessageId::ListEntitiesDoneResponse => {
                        debug!(count = entities.len(), "entity listing complete");
                        return Ok(entities);
                    }
                    MessageId::ListEntitiesServicesResponse => {
                        debug!("skipping service description");
                    }
                    _ => entities.extend(Entity::from_message(message)),
                },
                Delivery::Closed(reason) => {
                    return Err(PeerError::IncompleteListing { entities, reason });
                }
            }
        }
    }

    /// Stream entity state updates until the connection closes.
    pub async fn subscribe_states(&self) -> Result<MessageStream> {
        self.subscribe_with(MessageId::STATE_RESPONSES.iter().copied(), SubscribeStatesRequest {})
            .await
    }

    /// Stream device log lines at `level` and above.
    pub async fn subscribe_logs(
        &self,
        level: LogLevel,
        dump_config: bool,
    ) -> Result<MessageStream> {
        let request = SubscribeLogsRequest {
            level: level as i32,
            dump_config,
        };
        self.subscribe_with([MessageId::SubscribeLogsResponse], request)
            .await
    }

    async fn subscribe_with(
        &self,
        filter: impl IntoIterator<Item = MessageId>,
        request: impl Schema,
    ) -> Result<MessageStream> {
        let shared = self.shared();
        shared.ensure_live()?;
        let sub = shared.registry.subscribe(filter)?;
        shared.send(request.into_message()).await?;
        Ok(MessageStream::new(sub))
    }

    pub async fn send_switch_command(&self, key: u32, state: bool) -> Result<()> {
        self.send_command(SwitchCommandRequest { key, state }).await
    }

    /// Send a command. No reply is expected.
    pub async fn send_command<C: Command>(&self, command: C) -> Result<()> {
        self.shared().send(command.into_message()).await
    }

    /// Request a single camera image and return its bytes.
    pub async fn camera_image(&self) -> Result<Vec<u8>> {
        let shared = self.shared();
        shared.ensure_live()?;
        let serial = shared.request_lock(MessageId::CameraImageResponse);
        let _serial = serial.lock().await;

        let mut sub = shared.registry.subscribe([MessageId::CameraImageResponse])?;
        let request = CameraImageRequest {
            single: true,
            stream: false,
        };
        shared.send(request.into_message()).await?;

        let mut image = Vec::new();
        loop {
            match shared.next_delivery(&mut sub).await? {
                Delivery::Message(message) => {
                    let Some(chunk) = CameraImageResponse::from_message(&message) else {
                        return Err(PeerError::UnexpectedMessage(message.id()));
                    };
                    image.extend_from_slice(&chunk.data);
                    if chunk.done {
                        return Ok(image);
                    }
                }
                Delivery::Closed(reason) => return Err(PeerError::Closed(reason)),
            }
        }
    }

    /// Negotiate a disconnect and close.
    ///
    /// The device may answer or simply drop the stream; both end in
    /// [`CloseReason::Disconnected`].
    pub async fn disconnect(&self) -> Result<()> {
        let shared = self.shared();
        shared.ensure_live()?;
        shared.begin_disconnect();

        let reply = shared.request::<DisconnectResponse>(DisconnectRequest {}).await;
        shared.close_with(CloseReason::Disconnected);
        shared.terminated.cancelled().await;

        match reply {
            Ok(_) | Err(PeerError::Closed(_)) => Ok(()),
            Err(err) => Err(err),
        }
    }

    /// Close locally and wait for the receive loop to finish.
    pub async fn close(&self) {
        self.shared().close_with(CloseReason::Local);
        self.shared().terminated.cancelled().await;
    }

    /// Wait until the connection is closed and return why.
    pub async fn closed(&self) -> CloseReason {
        self.shared().terminated.cancelled().await;
        self.close_reason().unwrap_or(CloseReason::Local)
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("state", &self.state())
            .field("subscribers", &self.registry().len())
            .finish()
    }
}
