//! Typed update-feed events.
//!
//! The server pushes two shapes of data events (folder-scoped snapshots and
//! an unscoped inbox snapshot) plus two control events. Anything malformed
//! or unrecognized is dropped here without disturbing the connection.

use crate::domain::{ingest, Folder, Message, PhishingAlert, WireMessage};

use super::sse::SseFrame;

/// A decoded update-feed event.
#[derive(Debug, Clone)]
pub enum FeedEvent {
    /// Full replacement list for one named folder.
    FolderSnapshot {
        folder: Folder,
        messages: Vec<Message>,
    },
    /// Full inbox list from an unscoped event; subject to the
    /// count-comparison re-render rule.
    InboxSnapshot(Vec<Message>),
    /// Force-switch the active folder to phishing, as if clicked.
    SwitchToPhishing,
    /// Transient phishing banner payload.
    Alert(PhishingAlert),
}

impl FeedEvent {
    /// Decodes a frame, or `None` for malformed/unknown events.
    pub fn parse(frame: &SseFrame) -> Option<FeedEvent> {
        match frame.event.as_deref() {
            None | Some("message") => parse_snapshot(&frame.data).map(FeedEvent::InboxSnapshot),
            Some("switch_to_phishing") => Some(FeedEvent::SwitchToPhishing),
            Some("phishing_alert") => match serde_json::from_str(&frame.data) {
                Ok(alert) => Some(FeedEvent::Alert(alert)),
                Err(err) => {
                    tracing::debug!(%err, "dropping malformed phishing_alert event");
                    None
                }
            },
            Some(name) => match Folder::parse(name) {
                Some(folder) => parse_snapshot(&frame.data)
                    .map(|messages| FeedEvent::FolderSnapshot { folder, messages }),
                None => {
                    tracing::debug!(event = name, "dropping unknown feed event");
                    None
                }
            },
        }
    }
}

fn parse_snapshot(data: &str) -> Option<Vec<Message>> {
    match serde_json::from_str::<Vec<WireMessage>>(data) {
        Ok(wire) => Some(ingest(wire)),
        Err(err) => {
            tracing::debug!(%err, "dropping malformed snapshot event");
            None
        }
    }
}
