//! Client connections to ESPHome devices over the native API.
//!
//! A [`Connection`] owns one transport. A background receive loop decodes
//! every incoming frame and fans it out through the [`SubscriberRegistry`]
//! to whoever asked for that message type: a caller waiting on a reply, an
//! entity listing in progress, or a long-lived [`MessageStream`].
//!
//! ```no_run
//! # async fn demo() -> espwire_peer::Result<()> {
//! use futures_util::StreamExt;
//!
//! let conn = espwire_peer::dial("livingroom.local").await?;
//! conn.handshake().await?;
//! for entity in conn.list_entities().await? {
//!     println!("{} {} ({})", entity.key, entity.name, entity.kind);
//! }
//! let mut states = conn.subscribe_states().await?;
//! while let Some(state) = states.next().await {
//!     println!("{}", state?.name());
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod connection;
pub mod connector;
pub mod control;
pub mod entity;
pub mod error;
pub mod handshake;
pub mod receive;
pub mod registry;
pub mod state;
pub mod stream;

#[cfg(test)]
pub(crate) mod testing;

pub use config::{
    ConnectionConfig, OverflowPolicy, DEFAULT_CLIENT_INFO, DEFAULT_REQUEST_TIMEOUT,
    DEFAULT_SINK_CAPACITY,
};
pub use connection::{Command, Connection};
pub use connector::{dial, dial_with_config};
pub use entity::{classify, Entity, EntityKind};
pub use error::{PeerError, Result};
pub use registry::{Delivery, DispatchReport, SinkId, SubscriberRegistry, Subscription};
pub use state::{CloseReason, ConnectionState};
pub use stream::MessageStream;
