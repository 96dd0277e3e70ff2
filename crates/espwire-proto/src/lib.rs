//! Message catalog for the ESPHome native API.
//!
//! Every frame carries a numeric message type id that selects one protobuf
//! schema. [`MessageId`] enumerates the ids, [`Message`] is the decoded
//! tagged union, and [`Schema`] ties each schema struct to its id.
//!
//! ```
//! use espwire_proto::{HelloRequest, Message, MessageId, Schema};
//!
//! let hello = HelloRequest { client_info: "espwire".into() };
//! let payload = hello.clone().into_message().encode_payload();
//!
//! let decoded = Message::decode(MessageId::HelloRequest.as_u32(), &payload).unwrap();
//! assert_eq!(HelloRequest::from_message(&decoded), Some(&hello));
//! ```

pub mod api;
pub mod catalog;
pub mod error;
pub mod list;

pub use api::*;
pub use catalog::{Message, MessageId, Schema};
pub use error::{CatalogError, Result};
pub use list::ListEntity;
