//! Core identifier and folder types.
//!
//! `MessageId` is a newtype over the opaque, system-wide unique id the
//! backend assigns to each message. Ids are stable across refresh cycles,
//! which is what lets view state keyed by id survive a wholesale list swap.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for an email message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub String);

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for MessageId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for MessageId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// The closed set of mail folders.
///
/// Unknown sidebar targets never become a `Folder`; they render a
/// placeholder and leave client state untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Folder {
    Inbox,
    Sent,
    Drafts,
    Archive,
    Spam,
    Phishing,
    Trash,
}

impl Folder {
    /// All folders, in sidebar order.
    pub const ALL: [Folder; 7] = [
        Folder::Inbox,
        Folder::Sent,
        Folder::Drafts,
        Folder::Archive,
        Folder::Spam,
        Folder::Phishing,
        Folder::Trash,
    ];

    /// The wire name used in queries and feed event names.
    pub fn as_str(&self) -> &'static str {
        match self {
            Folder::Inbox => "inbox",
            Folder::Sent => "sent",
            Folder::Drafts => "drafts",
            Folder::Archive => "archive",
            Folder::Spam => "spam",
            Folder::Phishing => "phishing",
            Folder::Trash => "trash",
        }
    }

    /// Capitalized name for list headers and placeholders.
    pub fn title(&self) -> &'static str {
        match self {
            Folder::Inbox => "Inbox",
            Folder::Sent => "Sent",
            Folder::Drafts => "Drafts",
            Folder::Archive => "Archive",
            Folder::Spam => "Spam",
            Folder::Phishing => "Phishing",
            Folder::Trash => "Trash",
        }
    }

    /// Parses a sidebar target or feed event name, case-insensitively.
    ///
    /// Returns `None` for anything outside the fixed folder set.
    pub fn parse(name: &str) -> Option<Folder> {
        match name.trim().to_ascii_lowercase().as_str() {
            "inbox" => Some(Folder::Inbox),
            "sent" => Some(Folder::Sent),
            "drafts" => Some(Folder::Drafts),
            "archive" => Some(Folder::Archive),
            "spam" => Some(Folder::Spam),
            "phishing" => Some(Folder::Phishing),
            "trash" => Some(Folder::Trash),
            _ => None,
        }
    }
}

impl fmt::Display for Folder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_id_display() {
        let id = MessageId::from("msg-42");
        assert_eq!(id.to_string(), "msg-42");
    }

    #[test]
    fn message_id_hash() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(MessageId::from("a"));
        assert!(set.contains(&MessageId::from("a")));
        assert!(!set.contains(&MessageId::from("b")));
    }

    #[test]
    fn folder_parse_known_names() {
        assert_eq!(Folder::parse("inbox"), Some(Folder::Inbox));
        assert_eq!(Folder::parse("Sent"), Some(Folder::Sent));
        assert_eq!(Folder::parse("TRASH"), Some(Folder::Trash));
        assert_eq!(Folder::parse(" phishing "), Some(Folder::Phishing));
    }

    #[test]
    fn folder_parse_unknown_names() {
        assert_eq!(Folder::parse("settings"), None);
        assert_eq!(Folder::parse("starred"), None);
        assert_eq!(Folder::parse(""), None);
    }

    #[test]
    fn folder_wire_names_round_trip() {
        for folder in Folder::ALL {
            assert_eq!(Folder::parse(folder.as_str()), Some(folder));
        }
    }

    #[test]
    fn folder_serialization() {
        let json = serde_json::to_string(&Folder::Phishing).unwrap();
        assert_eq!(json, "\"phishing\"");

        let parsed: Folder = serde_json::from_str("\"sent\"").unwrap();
        assert_eq!(parsed, Folder::Sent);
    }
}
