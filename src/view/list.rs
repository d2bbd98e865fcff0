//! List projection: folders to renderable rows.
//!
//! This is a pure mapping from store state to view models; the rendering
//! boundary (whatever paints the rows) consumes these types and correlates
//! click events back through the carried message id.
//!
//! Sender, subject, and preview text are untrusted input. They are
//! HTML-escaped here, once, and the rendering boundary must treat row text
//! as already safe markup text.

use crate::domain::{Folder, Message, MessageId};

use super::date::format_smart_date;

/// Escapes HTML-special characters in untrusted display text.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Per-row action affordances, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Reply,
    Archive,
    Trash,
    MarkUnread,
}

impl RowAction {
    /// The affordances every message row carries.
    pub const ALL: [RowAction; 4] = [
        RowAction::Reply,
        RowAction::Archive,
        RowAction::Trash,
        RowAction::MarkUnread,
    ];
}

/// One renderable message row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRow {
    /// Id for correlating row events back to the store.
    pub id: MessageId,
    /// First character of the sender name, uppercased; `'?'` when empty.
    pub initial: char,
    /// Escaped sender display name.
    pub sender: String,
    /// Escaped subject line.
    pub subject: String,
    /// Escaped content preview.
    pub preview: String,
    /// Smart-formatted date label.
    pub date: String,
    /// Whether the row renders in the unread style.
    pub unread: bool,
    /// Action affordances shown on the row.
    pub actions: [RowAction; 4],
}

impl ListRow {
    fn project(message: &Message) -> Self {
        let initial = message
            .sender
            .chars()
            .next()
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or('?');
        Self {
            id: message.id.clone(),
            initial,
            sender: escape_html(&message.sender),
            subject: escape_html(&message.subject),
            preview: escape_html(&message.preview),
            date: format_smart_date(&message.date),
            unread: !message.read,
            actions: RowAction::ALL,
        }
    }
}

/// A rendered folder listing: sticky header plus rows or a placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderListing {
    pub folder: Folder,
    /// Capitalized folder name for the header.
    pub title: String,
    /// Message count shown next to the title (0 for an empty folder).
    pub count: usize,
    /// One row per message, in store order. Empty when `placeholder` is set.
    pub rows: Vec<ListRow>,
    /// Informational row shown instead of messages when the folder is empty.
    pub placeholder: Option<String>,
}

/// Projects a folder's messages into a listing.
pub fn render_folder(folder: Folder, messages: &[Message]) -> FolderListing {
    if messages.is_empty() {
        return FolderListing {
            folder,
            title: folder.title().to_string(),
            count: 0,
            rows: Vec::new(),
            placeholder: Some(format!("No messages in {}", folder.title())),
        };
    }
    FolderListing {
        folder,
        title: folder.title().to_string(),
        count: messages.len(),
        rows: messages.iter().map(ListRow::project).collect(),
        placeholder: None,
    }
}
