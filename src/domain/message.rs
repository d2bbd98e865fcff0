//! Message domain types and the wire-ingestion boundary.
//!
//! The backend and the update feed both deliver loosely-shaped JSON objects
//! with optional fields. They are normalized exactly once, here, into the
//! strict [`Message`] type; nothing downstream re-checks for missing fields.

use serde::{Deserialize, Serialize};

use super::MessageId;

/// Fallback shown when a message has no sender.
pub const UNKNOWN_SENDER: &str = "Unknown";
/// Fallback shown when a message has no subject.
pub const NO_SUBJECT: &str = "(no subject)";
/// Fallback shown when a message has no body or preview.
pub const NO_CONTENT: &str = "(No content)";

/// An email message as held by the folder store.
///
/// All fields are already normalized; `date` stays an opaque string (the
/// backend forwards whatever the mail headers carried) and is interpreted
/// only by the date formatter in the view layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Stable identifier, unique across all folders.
    pub id: MessageId,
    /// Sender display name.
    pub sender: String,
    /// Sender address, when the backend knows it. Only used in alerts.
    pub sender_email: Option<String>,
    /// Subject line.
    pub subject: String,
    /// Short list-row preview of the content.
    pub preview: String,
    /// Full body shown in the reading pane.
    pub body: String,
    /// Raw timestamp string as received (RFC 2822, RFC 3339, or opaque).
    pub date: String,
    /// Whether the message has been opened.
    pub read: bool,
}

/// A message as it appears on the wire, before normalization.
///
/// Every field is optional; `id` may be a JSON string or number (both occur
/// in practice). Use [`WireMessage::into_message`] to normalize.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireMessage {
    #[serde(default)]
    pub id: Option<WireId>,
    #[serde(default)]
    pub sender: Option<String>,
    #[serde(default)]
    pub sender_email: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub preview: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub read: Option<bool>,
}

/// Message id wire representation: string or integer.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum WireId {
    Text(String),
    Number(i64),
}

impl WireId {
    fn into_string(self) -> String {
        match self {
            WireId::Text(s) => s,
            WireId::Number(n) => n.to_string(),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

impl WireMessage {
    /// Normalizes a wire record into a [`Message`].
    ///
    /// Records without an id are unusable (no action or open can target
    /// them) and yield `None`; callers drop them at the boundary. Blank
    /// strings count as missing.
    pub fn into_message(self) -> Option<Message> {
        let id = MessageId(self.id?.into_string());

        let sender = non_blank(self.sender).unwrap_or_else(|| UNKNOWN_SENDER.to_string());
        let subject = non_blank(self.subject).unwrap_or_else(|| NO_SUBJECT.to_string());
        let body_opt = non_blank(self.body);
        let preview_opt = non_blank(self.preview);

        let preview = preview_opt
            .clone()
            .or_else(|| body_opt.clone())
            .unwrap_or_else(|| NO_CONTENT.to_string());
        let body = body_opt
            .or(preview_opt)
            .unwrap_or_else(|| NO_CONTENT.to_string());

        Some(Message {
            id,
            sender,
            sender_email: non_blank(self.sender_email),
            subject,
            preview,
            body,
            date: self.date.unwrap_or_default(),
            read: self.read.unwrap_or(false),
        })
    }
}

/// Normalizes a whole wire list, dropping unusable records.
pub fn ingest(wire: Vec<WireMessage>) -> Vec<Message> {
    let total = wire.len();
    let messages: Vec<Message> = wire.into_iter().filter_map(WireMessage::into_message).collect();
    if messages.len() < total {
        tracing::debug!(
            dropped = total - messages.len(),
            "dropped wire messages without an id"
        );
    }
    messages
}

/// Transient phishing classification alert delivered over the update feed.
///
/// Not stored anywhere; rendered as a banner and discarded after a fixed
/// display duration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PhishingAlert {
    #[serde(default)]
    pub sender: String,
    #[serde(default)]
    pub sender_email: String,
    #[serde(default)]
    pub subject: String,
    /// Classifier confidence label, e.g. "High".
    #[serde(default)]
    pub confidence: String,
    /// Human-readable reasons, in classifier order.
    #[serde(default)]
    pub reasons: Vec<String>,
}
