//! The mail backend collaborator boundary.
//!
//! The delivery/storage backend lives outside this crate; this module pins
//! down the surface the client depends on: a folder query, a per-message
//! command, and a send command. [`HttpBackend`] is the production
//! implementation; tests substitute the trait.

mod http;

pub use http::HttpBackend;

use anyhow::Result;
use serde::Serialize;

use crate::domain::{Folder, Message, MessageId};

/// Message-scoped mutations the backend accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageAction {
    Trash,
    Archive,
    MarkAsUnread,
}

/// An outgoing message; all fields are validated non-empty before dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Query/command surface of the mail backend.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MailBackend: Send + Sync {
    /// Fetches the full, ordered message list of a folder.
    async fn fetch_folder(&self, folder: Folder) -> Result<Vec<Message>>;

    /// Applies a message-scoped action. Resolves once the backend confirms.
    async fn dispatch(&self, id: &MessageId, action: MessageAction) -> Result<()>;

    /// Sends a composed message. On success it later appears in `sent`.
    async fn send(&self, outgoing: &OutgoingMail) -> Result<()>;
}
