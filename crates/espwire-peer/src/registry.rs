//! Message-type keyed fan-out to subscribers.
//!
//! Every subscriber owns a bounded queue. The sink table sits behind a
//! `std::sync::Mutex` that is held only long enough to snapshot the targets
//! of a dispatch; deliveries happen after the lock is released.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::task::{Context, Poll};

use espwire_proto::{Message, MessageId};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, warn};

use crate::config::{OverflowPolicy, DEFAULT_SINK_CAPACITY};
use crate::error::{PeerError, Result};
use crate::state::CloseReason;

/// Identifier of one subscriber. Ids grow monotonically, so ascending id
/// order is registration order.
pub type SinkId = u64;

/// What a [`Subscription`] yields.
#[derive(Debug, Clone, PartialEq)]
pub enum Delivery {
    Message(Arc<Message>),
    /// The connection closed. Sent once, after every buffered message.
    Closed(CloseReason),
}

/// Outcome of one [`SubscriberRegistry::dispatch`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchReport {
    pub delivered: usize,
    pub dropped: usize,
}

#[derive(Default)]
struct Sinks {
    /// Senders of every live `Subscription`.
    live: HashMap<SinkId, mpsc::Sender<Arc<Message>>>,
    /// Filters of the sinks currently registered for dispatch.
    filters: BTreeMap<SinkId, HashSet<MessageId>>,
    closed: Option<CloseReason>,
}

struct Inner {
    sinks: Mutex<Sinks>,
    next_id: AtomicU64,
    capacity: usize,
    overflow: OverflowPolicy,
}

impl Inner {
    fn lock(&self) -> MutexGuard<'_, Sinks> {
        self.sinks.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn close_reason(&self) -> Option<CloseReason> {
        self.lock().closed.clone()
    }

    fn release(&self, sink: SinkId) {
        let mut sinks = self.lock();
        sinks.live.remove(&sink);
        sinks.filters.remove(&sink);
    }
}

/// Shared handle to a connection's subscriber table.
#[derive(Clone)]
pub struct SubscriberRegistry {
    inner: Arc<Inner>,
}

impl Default for SubscriberRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_SINK_CAPACITY, OverflowPolicy::default())
    }
}

impl SubscriberRegistry {
    /// Create a registry whose sinks buffer up to `capacity` messages.
    pub fn new(capacity: usize, overflow: OverflowPolicy) -> Self {
        Self {
            inner: Arc::new(Inner {
                sinks: Mutex::new(Sinks::default()),
                next_id: AtomicU64::new(1),
                capacity: capacity.max(1),
                overflow,
            }),
        }
    }

    /// Register a fresh sink for the message types in `filter`.
    ///
    /// Fails with [`PeerError::Closed`] once the registry has closed.
    pub fn subscribe(&self, filter: impl IntoIterator<Item = MessageId>) -> Result<Subscription> {
        let (tx, rx) = mpsc::channel(self.inner.capacity);
        let filter: HashSet<MessageId> = filter.into_iter().collect();

        let id = {
            let mut sinks = self.inner.lock();
            if let Some(reason) = &sinks.closed {
                return Err(PeerError::Closed(reason.clone()));
            }
            let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
            sinks.live.insert(id, tx);
            sinks.filters.insert(id, filter);
            id
        };

        debug!(sink = id, "subscriber registered");
        Ok(Subscription {
            id,
            rx,
            registry: Arc::clone(&self.inner),
            finished: false,
        })
    }

    /// Add `filter` to an existing sink.
    ///
    /// Re-registers a sink that was [`unregister`](Self::unregister)ed while
    /// its `Subscription` is still alive. Returns `false` if no live
    /// subscription has this id or the registry is closed.
    pub fn register(&self, sink: SinkId, filter: impl IntoIterator<Item = MessageId>) -> bool {
        let mut sinks = self.inner.lock();
        if sinks.closed.is_some() || !sinks.live.contains_key(&sink) {
            return false;
        }
        sinks.filters.entry(sink).or_default().extend(filter);
        true
    }

    /// Stop dispatching to `sink`. Unknown ids are ignored.
    pub fn unregister(&self, sink: SinkId) {
        self.inner.lock().filters.remove(&sink);
    }

    /// Deliver `message` to every sink whose filter contains its id, in
    /// registration order.
    ///
    /// A no-op once the registry has closed.
    pub async fn dispatch(&self, message: Arc<Message>) -> DispatchReport {
        let id = message.id();
        let targets: Vec<(SinkId, mpsc::Sender<Arc<Message>>)> = {
            let sinks = self.inner.lock();
            if sinks.closed.is_some() {
                return DispatchReport::default();
            }
            sinks
                .filters
                .iter()
                .filter(|(_, filter)| filter.contains(&id))
                .filter_map(|(sink, _)| sinks.live.get(sink).map(|tx| (*sink, tx.clone())))
                .collect()
        };

        let mut report = DispatchReport::default();
        for (sink, tx) in targets {
            match self.inner.overflow {
                OverflowPolicy::Block => {
                    // An error means the subscriber went away mid-dispatch.
                    if tx.send(Arc::clone(&message)).await.is_ok() {
                        report.delivered += 1;
                    }
                }
                OverflowPolicy::Drop => match tx.try_send(Arc::clone(&message)) {
                    Ok(()) => report.delivered += 1,
                    Err(TrySendError::Full(_)) => {
                        warn!(sink, message = %id, "subscriber queue full, dropping message");
                        report.dropped += 1;
                    }
                    Err(TrySendError::Closed(_)) => {}
                },
            }
        }
        report
    }

    /// Close the registry. The first reason wins; later calls are no-ops.
    ///
    /// Every live subscriber drains its buffered messages and then receives
    /// exactly one [`Delivery::Closed`].
    pub fn close(&self, reason: CloseReason) {
        let released = {
            let mut sinks = self.inner.lock();
            if sinks.closed.is_some() {
                return;
            }
            sinks.closed = Some(reason.clone());
            sinks.filters.clear();
            std::mem::take(&mut sinks.live)
        };
        debug!(subscribers = released.len(), %reason, "registry closed");
        // Dropping the senders ends every queue after its buffered messages.
        drop(released);
    }

    pub fn is_closed(&self) -> bool {
        self.inner.close_reason().is_some()
    }

    pub fn close_reason(&self) -> Option<CloseReason> {
        self.inner.close_reason()
    }

    /// Number of sinks currently registered for dispatch.
    pub fn len(&self) -> usize {
        self.inner.lock().filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Receiving end of one sink. Dropping it unregisters the sink.
pub struct Subscription {
    id: SinkId,
    rx: mpsc::Receiver<Arc<Message>>,
    registry: Arc<Inner>,
    finished: bool,
}

impl Subscription {
    pub fn id(&self) -> SinkId {
        self.id
    }

    /// Next delivery, or `None` after the closure signal has been returned.
    pub async fn recv(&mut self) -> Option<Delivery> {
        std::future::poll_fn(|cx| self.poll_recv(cx)).await
    }

    pub fn poll_recv(&mut self, cx: &mut Context<'_>) -> Poll<Option<Delivery>> {
        if self.finished {
            return Poll::Ready(None);
        }
        match self.rx.poll_recv(cx) {
            Poll::Ready(Some(message)) => Poll::Ready(Some(Delivery::Message(message))),
            Poll::Ready(None) => {
                self.finished = true;
                let reason = self.registry.close_reason().unwrap_or(CloseReason::Local);
                Poll::Ready(Some(Delivery::Closed(reason)))
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.registry.release(self.id);
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("finished", &self.finished)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use espwire_proto::{PingResponse, SensorStateResponse, SwitchStateResponse};

    use super::*;

    fn switch_state(key: u32) -> Arc<Message> {
        Arc::new(Message::from(SwitchStateResponse { key, state: true }))
    }

    fn sensor_state(key: u32) -> Arc<Message> {
        Arc::new(Message::from(SensorStateResponse {
            key,
            state: 1.5,
            missing_state: false,
        }))
    }

    async fn expect_message(sub: &mut Subscription) -> Arc<Message> {
        match sub.recv().await {
            Some(Delivery::Message(message)) => message,
            other => panic!("expected message, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn dispatch_respects_filters() {
        let registry = SubscriberRegistry::default();
        let mut switches = registry.subscribe([MessageId::SwitchStateResponse]).unwrap();
        let mut both = registry
            .subscribe([MessageId::SwitchStateResponse, MessageId::SensorStateResponse])
            .unwrap();

        let report = registry.dispatch(switch_state(1)).await;
        assert_eq!(report, DispatchReport { delivered: 2, dropped: 0 });
        let report = registry.dispatch(sensor_state(2)).await;
        assert_eq!(report.delivered, 1);
        let report = registry
            .dispatch(Arc::new(Message::from(PingResponse {})))
            .await;
        assert_eq!(report.delivered, 0);

        assert_eq!(expect_message(&mut switches).await.id(), MessageId::SwitchStateResponse);
        assert_eq!(expect_message(&mut both).await.id(), MessageId::SwitchStateResponse);
        assert_eq!(expect_message(&mut both).await.id(), MessageId::SensorStateResponse);
    }

    #[tokio::test]
    async fn register_extends_and_unregister_pauses() {
        let registry = SubscriberRegistry::default();
        let mut sub = registry.subscribe([MessageId::SwitchStateResponse]).unwrap();

        assert!(registry.register(sub.id(), [MessageId::SensorStateResponse]));
        assert!(registry.register(sub.id(), [MessageId::SensorStateResponse]));
        assert_eq!(registry.dispatch(sensor_state(4)).await.delivered, 1);

        registry.unregister(sub.id());
        registry.unregister(sub.id());
        assert_eq!(registry.dispatch(switch_state(5)).await.delivered, 0);
        assert!(registry.is_empty());

        assert!(registry.register(sub.id(), [MessageId::SwitchStateResponse]));
        assert_eq!(registry.dispatch(switch_state(6)).await.delivered, 1);

        assert_eq!(expect_message(&mut sub).await.state_key(), Some(4));
        assert_eq!(expect_message(&mut sub).await.state_key(), Some(6));
    }

    #[tokio::test]
    async fn register_unknown_sink_is_noop() {
        let registry = SubscriberRegistry::default();
        assert!(!registry.register(42, [MessageId::PingResponse]));
        registry.unregister(42);
        assert!(registry.is_empty());

        let sub = registry.subscribe([MessageId::PingResponse]).unwrap();
        let id = sub.id();
        drop(sub);
        assert!(!registry.register(id, [MessageId::PingResponse]));
        assert!(registry.is_empty());
    }

    #[tokio::test]
    async fn close_notifies_each_subscriber_once_after_buffered_messages() {
        let registry = SubscriberRegistry::default();
        let mut first = registry.subscribe([MessageId::SwitchStateResponse]).unwrap();
        let mut second = registry.subscribe([MessageId::SensorStateResponse]).unwrap();

        registry.dispatch(switch_state(1)).await;
        registry.dispatch(switch_state(2)).await;
        registry.close(CloseReason::PeerClosed);
        registry.close(CloseReason::Local);

        assert_eq!(expect_message(&mut first).await.state_key(), Some(1));
        assert_eq!(expect_message(&mut first).await.state_key(), Some(2));
        assert_eq!(first.recv().await, Some(Delivery::Closed(CloseReason::PeerClosed)));
        assert_eq!(first.recv().await, None);

        assert_eq!(second.recv().await, Some(Delivery::Closed(CloseReason::PeerClosed)));
        assert_eq!(second.recv().await, None);
    }

    #[tokio::test]
    async fn closed_registry_rejects_subscribers_and_dispatch() {
        let registry = SubscriberRegistry::default();
        registry.close(CloseReason::Disconnected);

        let err = registry.subscribe([MessageId::PingResponse]).unwrap_err();
        assert!(matches!(err, PeerError::Closed(CloseReason::Disconnected)));
        assert_eq!(registry.dispatch(switch_state(1)).await, DispatchReport::default());
        assert_eq!(registry.close_reason(), Some(CloseReason::Disconnected));
    }

    #[tokio::test]
    async fn drop_policy_keeps_responsive_sinks_flowing() {
        let registry = SubscriberRegistry::new(1, OverflowPolicy::Drop);
        let _stuck = registry.subscribe([MessageId::SwitchStateResponse]).unwrap();
        let mut responsive = registry.subscribe([MessageId::SwitchStateResponse]).unwrap();

        let first = registry.dispatch(switch_state(1)).await;
        assert_eq!(first, DispatchReport { delivered: 2, dropped: 0 });
        assert_eq!(expect_message(&mut responsive).await.state_key(), Some(1));

        for key in 2..=3 {
            let report = registry.dispatch(switch_state(key)).await;
            assert_eq!(report, DispatchReport { delivered: 1, dropped: 1 });
            assert_eq!(expect_message(&mut responsive).await.state_key(), Some(key));
        }
        assert_eq!(registry.len(), 2);
    }

    #[tokio::test]
    async fn block_policy_stalls_until_stuck_sink_is_dropped() {
        let registry = SubscriberRegistry::new(1, OverflowPolicy::Block);
        let stuck = registry.subscribe([MessageId::SwitchStateResponse]).unwrap();
        let mut responsive = registry.subscribe([MessageId::SwitchStateResponse]).unwrap();

        registry.dispatch(switch_state(1)).await;

        let background = registry.clone();
        let mut pending = tokio::spawn(async move { background.dispatch(switch_state(2)).await });

        let stalled = tokio::time::timeout(Duration::from_millis(50), &mut pending).await;
        assert!(stalled.is_err(), "dispatch should wait on the full queue");

        // Registration is not blocked by the stalled dispatch.
        let late = registry.subscribe([MessageId::PingResponse]).unwrap();
        drop(late);

        // The responsive sink still holds the first message, so it is full too.
        assert_eq!(expect_message(&mut responsive).await.state_key(), Some(1));

        drop(stuck);
        let report = pending.await.unwrap();
        assert_eq!(report, DispatchReport { delivered: 1, dropped: 0 });
        assert_eq!(expect_message(&mut responsive).await.state_key(), Some(2));
    }
}
