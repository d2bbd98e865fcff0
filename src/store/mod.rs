//! Per-folder message state.
//!
//! [`FolderStore`] holds the last-known ordered message list for each folder
//! plus the last-seen count used by the unscoped update feed. Lists are
//! replaced wholesale on every refresh; there is no incremental merge, so
//! identity across a swap exists only through stable message ids.
//!
//! Every operation is total: a folder that was never populated behaves as
//! empty, and mutations targeting an absent id are no-ops. This is what
//! makes late action confirmations safe: removing an id that a newer
//! `replace` already dropped simply does nothing.

use std::collections::{HashMap, HashSet};

use crate::domain::{Folder, Message, MessageId};

/// Ordered message lists per folder, plus last-seen counts.
#[derive(Debug, Default)]
pub struct FolderStore {
    folders: HashMap<Folder, Vec<Message>>,
    last_seen: HashMap<Folder, usize>,
    pushed: HashSet<Folder>,
}

impl FolderStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the messages of a folder, in server order.
    ///
    /// A never-populated folder yields an empty slice.
    pub fn get(&self, folder: Folder) -> &[Message] {
        self.folders.get(&folder).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of messages currently held for a folder.
    pub fn count(&self, folder: Folder) -> usize {
        self.get(folder).len()
    }

    /// Whether a folder has ever been populated (even with an empty list).
    pub fn is_populated(&self, folder: Folder) -> bool {
        self.folders.contains_key(&folder)
    }

    /// Replaces a folder's list wholesale, preserving the given order.
    pub fn replace(&mut self, folder: Folder, messages: Vec<Message>) {
        self.folders.insert(folder, messages);
    }

    /// Removes at most one message by id. No-op if the id is absent.
    ///
    /// Returns true if a message was removed.
    pub fn remove_by_id(&mut self, folder: Folder, id: &MessageId) -> bool {
        let Some(list) = self.folders.get_mut(&folder) else {
            return false;
        };
        match list.iter().position(|m| &m.id == id) {
            Some(index) => {
                list.remove(index);
                true
            }
            None => false,
        }
    }

    /// Marks a message read. No-op if the id is absent.
    ///
    /// Returns true if the message was found.
    pub fn mark_read(&mut self, folder: Folder, id: &MessageId) -> bool {
        self.set_read(folder, id, true)
    }

    /// Marks a message unread. No-op if the id is absent.
    ///
    /// Returns true if the message was found.
    pub fn mark_unread(&mut self, folder: Folder, id: &MessageId) -> bool {
        self.set_read(folder, id, false)
    }

    fn set_read(&mut self, folder: Folder, id: &MessageId, read: bool) -> bool {
        let Some(list) = self.folders.get_mut(&folder) else {
            return false;
        };
        match list.iter_mut().find(|m| &m.id == id) {
            Some(message) => {
                message.read = read;
                true
            }
            None => false,
        }
    }

    /// Looks up a message by id within a folder.
    pub fn find(&self, folder: Folder, id: &MessageId) -> Option<&Message> {
        self.get(folder).iter().find(|m| &m.id == id)
    }

    /// The count last acknowledged by the feed consumer for a folder.
    pub fn seen_count(&self, folder: Folder) -> usize {
        self.last_seen.get(&folder).copied().unwrap_or(0)
    }

    /// Records the count the feed consumer has now seen for a folder.
    pub fn note_seen(&mut self, folder: Folder, count: usize) {
        self.last_seen.insert(folder, count);
    }

    /// Marks a folder as kept current by the push feed.
    ///
    /// Selecting such a folder can skip the refresh fetch.
    pub fn note_pushed(&mut self, folder: Folder) {
        self.pushed.insert(folder);
    }

    /// Whether the push feed has populated this folder.
    pub fn is_pushed(&self, folder: Folder) -> bool {
        self.pushed.contains(&folder)
    }
}
