use std::pin::Pin;
use std::sync::Arc;
use std::task::{ready, Context, Poll};

use espwire_proto::Message;
use futures_core::Stream;

use crate::error::{PeerError, Result};
use crate::registry::{Delivery, SinkId, Subscription};

/// A durable subscription exposed as a stream of messages.
///
/// The stream ends without an item when the connection closes gracefully.
/// Any other closure yields one `Err(PeerError::Closed(_))` first. Dropping
/// the stream unregisters it.
#[derive(Debug)]
pub struct MessageStream {
    sub: Subscription,
    done: bool,
}

impl MessageStream {
    pub(crate) fn new(sub: Subscription) -> Self {
        Self { sub, done: false }
    }

    pub fn id(&self) -> SinkId {
        self.sub.id()
    }

    /// Next message, without going through `StreamExt`.
    pub async fn recv(&mut self) -> Option<Result<Arc<Message>>> {
        std::future::poll_fn(|cx| self.poll_item(cx)).await
    }

    fn poll_item(&mut self, cx: &mut Context<'_>) -> Poll<Option<Result<Arc<Message>>>> {
        if self.done {
            return Poll::Ready(None);
        }
        match ready!(self.sub.poll_recv(cx)) {
            Some(Delivery::Message(message)) => Poll::Ready(Some(Ok(message))),
            Some(Delivery::Closed(reason)) => {
                self.done = true;
                if reason.is_graceful() {
                    Poll::Ready(None)
                } else {
                    Poll::Ready(Some(Err(PeerError::Closed(reason))))
                }
            }
            None => {
                self.done = true;
                Poll::Ready(None)
            }
        }
    }
}

impl Stream for MessageStream {
    type Item = Result<Arc<Message>>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut().poll_item(cx)
    }
}
