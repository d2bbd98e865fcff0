//! Active folder and open message tracking.
//!
//! Two axes: exactly one active folder (initially the inbox) and at most
//! one message open in the reading pane. Switching folders always closes
//! the reading pane; an open message always belongs to the folder that was
//! active when it was opened.

use crate::domain::{Folder, Message};

/// The selection state machine.
#[derive(Debug, Clone)]
pub struct Selection {
    active_folder: Folder,
    open_message: Option<Message>,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            active_folder: Folder::Inbox,
            open_message: None,
        }
    }
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_folder(&self) -> Folder {
        self.active_folder
    }

    pub fn open_message(&self) -> Option<&Message> {
        self.open_message.as_ref()
    }

    /// Activates a folder and closes any open message.
    pub fn select_folder(&mut self, folder: Folder) {
        self.active_folder = folder;
        self.open_message = None;
    }

    /// Records the message now shown in the reading pane.
    pub fn set_open(&mut self, message: Message) {
        self.open_message = Some(message);
    }

    /// Returns to list mode.
    pub fn clear_open(&mut self) {
        self.open_message = None;
    }
}
