//! Message action dispatch.
//!
//! Actions are confirm-then-mutate: nothing is removed from the store
//! until the backend acknowledges the command, so a failure needs no
//! rollback: the row simply stays. Confirmations mutate the *current*
//! store state rather than a captured snapshot, which makes a confirmation
//! that lands after a wholesale folder replace a harmless no-op.

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::{broadcast, RwLock};

use crate::backend::{MailBackend, MessageAction, OutgoingMail};
use crate::domain::{Folder, MessageId};
use crate::store::FolderStore;
use crate::view::{Notice, ViewEvent};

/// Dispatches message-scoped mutations to the backend and applies
/// confirmed results to the folder store.
pub struct ActionService {
    backend: Arc<dyn MailBackend>,
    store: Arc<RwLock<FolderStore>>,
    view_tx: broadcast::Sender<ViewEvent>,
}

impl ActionService {
    pub fn new(
        backend: Arc<dyn MailBackend>,
        store: Arc<RwLock<FolderStore>>,
        view_tx: broadcast::Sender<ViewEvent>,
    ) -> Self {
        Self {
            backend,
            store,
            view_tx,
        }
    }

    /// Sends an action to the backend and, on confirmation, updates the
    /// store.
    ///
    /// Returns whether the folder's list changed (callers re-render only
    /// then). On failure a notice is emitted and the store is untouched.
    pub async fn dispatch(&self, folder: Folder, id: &MessageId, action: MessageAction) -> bool {
        if let Err(err) = self.backend.dispatch(id, action).await {
            tracing::warn!(%err, %id, ?action, "message action failed");
            self.notify(Notice::error(failure_text(action)));
            return false;
        }

        let mut store = self.store.write().await;
        match action {
            MessageAction::Trash | MessageAction::Archive => store.remove_by_id(folder, id),
            MessageAction::MarkAsUnread => store.mark_unread(folder, id),
        }
    }

    /// Sends a composed message. Emits an error notice on failure.
    pub async fn send(&self, outgoing: &OutgoingMail) -> Result<()> {
        if let Err(err) = self.backend.send(outgoing).await {
            tracing::warn!(%err, to = %outgoing.to, "send failed");
            self.notify(Notice::error("Failed to send"));
            return Err(err);
        }
        Ok(())
    }

    fn notify(&self, notice: Notice) {
        let _ = self.view_tx.send(ViewEvent::Notice(notice));
    }
}

fn failure_text(action: MessageAction) -> &'static str {
    match action {
        MessageAction::Trash => "Could not move the message to Trash",
        MessageAction::Archive => "Could not archive the message",
        MessageAction::MarkAsUnread => "Could not mark the message as unread",
    }
}
