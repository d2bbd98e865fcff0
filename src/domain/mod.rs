//! Domain layer types for the mailpane client.
//!
//! The domain layer is deliberately small: messages, folder names, ids, and
//! the transient phishing alert. Everything here is plain data; behavior
//! lives in the store, view, and service layers.

mod message;
mod types;

pub use message::{
    ingest, Message, PhishingAlert, WireId, WireMessage, NO_CONTENT, NO_SUBJECT, UNKNOWN_SENDER,
};
pub use types::{Folder, MessageId};
