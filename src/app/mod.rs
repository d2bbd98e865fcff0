//! Client wiring and interaction flows.
//!
//! [`MailClient`] owns the folder store, the selection and compose state,
//! and the action service, and exposes the operations the UI surfaces
//! trigger: folder navigation, opening and closing messages, message
//! actions, compose submission, and update-feed application. Results are
//! published as [`ViewEvent`]s; see the `view` module for the boundary
//! contract.
//!
//! Everything runs on the single logical thread of the tokio runtime, so
//! ordering, not locking, is what matters: a folder fetch is tagged with
//! a selection generation and its response is discarded if any newer
//! selection (or reload) has superseded it, and action confirmations
//! re-derive their mutation from the live store instead of a snapshot.

mod compose;
mod selection;

pub use compose::{ComposeError, ComposeState};
pub use selection::Selection;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::{broadcast, RwLock};

use crate::backend::{MailBackend, MessageAction};
use crate::domain::{Folder, MessageId};
use crate::feed::FeedEvent;
use crate::services::ActionService;
use crate::store::FolderStore;
use crate::view::{
    render_folder, BannerView, MessageView, Notice, PlaceholderView, ViewEvent,
};

const VIEW_CHANNEL_CAPACITY: usize = 64;

/// The client engine behind the webmail UI.
pub struct MailClient {
    backend: Arc<dyn MailBackend>,
    store: Arc<RwLock<FolderStore>>,
    selection: RwLock<Selection>,
    compose: RwLock<ComposeState>,
    actions: ActionService,
    /// Bumped on every folder selection and reload; stale fetch responses
    /// compare against it and drop themselves.
    generation: AtomicU64,
    view_tx: broadcast::Sender<ViewEvent>,
}

impl MailClient {
    /// Creates a client on top of a mail backend.
    pub fn new(backend: Arc<dyn MailBackend>) -> Self {
        let (view_tx, _) = broadcast::channel(VIEW_CHANNEL_CAPACITY);
        let store = Arc::new(RwLock::new(FolderStore::new()));
        let actions = ActionService::new(Arc::clone(&backend), Arc::clone(&store), view_tx.clone());
        Self {
            backend,
            store,
            selection: RwLock::new(Selection::new()),
            compose: RwLock::new(ComposeState::new()),
            actions,
            generation: AtomicU64::new(0),
            view_tx,
        }
    }

    /// Subscribes the rendering boundary to view events.
    pub fn subscribe(&self) -> broadcast::Receiver<ViewEvent> {
        self.view_tx.subscribe()
    }

    /// The folder currently shown in the list view.
    pub async fn active_folder(&self) -> Folder {
        self.selection.read().await.active_folder()
    }

    /// Initial load: show the inbox.
    pub async fn start(&self) {
        self.select_folder(Folder::Inbox).await;
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// Activates a folder: closes any open message, renders the known
    /// state, and refreshes from the backend unless the push feed already
    /// keeps the folder current.
    pub async fn select_folder(&self, folder: Folder) {
        let generation = self.bump_generation();
        self.selection.write().await.select_folder(folder);
        self.emit(ViewEvent::ActiveFolderChanged(folder));
        self.emit(ViewEvent::MessageClosed);

        self.render_folder_now(folder).await;

        let fresh = self.store.read().await.is_pushed(folder);
        if !fresh {
            self.refresh_folder(folder, generation).await;
        }
    }

    /// Resolves a sidebar click. Known folder names navigate; anything
    /// else renders a placeholder and changes no state.
    pub async fn open_sidebar_target(&self, target: &str) {
        match Folder::parse(target) {
            Some(folder) => self.select_folder(folder).await,
            None => self.emit(ViewEvent::Placeholder(PlaceholderView::coming_soon(target))),
        }
    }

    /// Fetches a folder tagged with the selection generation; the response
    /// is dropped if a newer selection or reload superseded it.
    async fn refresh_folder(&self, folder: Folder, generation: u64) {
        match self.backend.fetch_folder(folder).await {
            Ok(messages) => {
                if self.current_generation() != generation {
                    tracing::debug!(%folder, "discarding stale folder fetch");
                    return;
                }
                let count = messages.len();
                let mut store = self.store.write().await;
                store.replace(folder, messages);
                store.note_seen(folder, count);
                drop(store);
                self.render_folder_now(folder).await;
            }
            Err(err) => {
                tracing::warn!(%err, %folder, "folder refresh failed");
                self.emit(ViewEvent::Notice(Notice::warning(format!(
                    "Could not refresh {}",
                    folder.title()
                ))));
            }
        }
    }

    // ------------------------------------------------------------------
    // Reading pane
    // ------------------------------------------------------------------

    /// Opens a message from the active folder in the reading pane.
    ///
    /// Marks it read in the store and re-renders the list so the cleared
    /// unread styling is current when the user navigates back. Returns
    /// false if the id is not in the active folder. Idempotent.
    pub async fn open_message(&self, id: &MessageId) -> bool {
        let folder = self.selection.read().await.active_folder();

        let message = {
            let mut store = self.store.write().await;
            let Some(found) = store.find(folder, id) else {
                return false;
            };
            let mut message = found.clone();
            message.read = true;
            store.mark_read(folder, id);
            message
        };

        self.selection.write().await.set_open(message.clone());
        self.render_folder_now(folder).await;
        self.emit(ViewEvent::MessageView(MessageView::of(&message)));
        true
    }

    /// Closes the reading pane and returns to list mode.
    pub async fn close_message(&self) {
        self.selection.write().await.clear_open();
        self.emit(ViewEvent::MessageClosed);
        let folder = self.selection.read().await.active_folder();
        self.render_folder_now(folder).await;
    }

    // ------------------------------------------------------------------
    // Message actions
    // ------------------------------------------------------------------

    /// Dispatches a row action against the active folder.
    pub async fn dispatch_action(&self, action: MessageAction, id: &MessageId) {
        let folder = self.selection.read().await.active_folder();
        let changed = self.actions.dispatch(folder, id, action).await;
        if changed {
            self.render_folder_now(folder).await;
        }
    }

    // ------------------------------------------------------------------
    // Compose
    // ------------------------------------------------------------------

    /// Opens the compose window.
    pub async fn open_compose(&self) {
        let view = {
            let mut compose = self.compose.write().await;
            compose.open();
            compose.view()
        };
        self.emit(ViewEvent::Compose(view));
    }

    /// Closes the compose window, discarding entered text.
    pub async fn close_compose(&self) {
        let view = {
            let mut compose = self.compose.write().await;
            compose.close();
            compose.view()
        };
        self.emit(ViewEvent::Compose(view));
    }

    /// Validates and submits the compose fields.
    ///
    /// Empty fields are rejected locally with a notice and no network
    /// call. While the send is in flight the submit affordance is
    /// disabled; success closes the window and surfaces the sent folder,
    /// failure keeps the window open with the text intact.
    pub async fn submit_compose(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<(), ComposeError> {
        let (begin, view) = {
            let mut compose = self.compose.write().await;
            compose.set_fields(to, subject, body);
            let begin = compose.begin_send();
            (begin, compose.view())
        };

        let outgoing = match begin {
            Ok(outgoing) => outgoing,
            Err(err) => {
                if err == ComposeError::MissingFields {
                    self.emit(ViewEvent::Notice(Notice::warning(err.to_string())));
                }
                return Err(err);
            }
        };
        self.emit(ViewEvent::Compose(view));

        match self.actions.send(&outgoing).await {
            Ok(()) => {
                let view = {
                    let mut compose = self.compose.write().await;
                    compose.finish_send_success();
                    compose.view()
                };
                self.emit(ViewEvent::Compose(view));
                self.select_folder(Folder::Sent).await;
                Ok(())
            }
            Err(_) => {
                let view = {
                    let mut compose = self.compose.write().await;
                    compose.finish_send_failure();
                    compose.view()
                };
                self.emit(ViewEvent::Compose(view));
                Err(ComposeError::SendFailed)
            }
        }
    }

    // ------------------------------------------------------------------
    // Update feed
    // ------------------------------------------------------------------

    /// Applies one update-feed event.
    ///
    /// Snapshots for the active folder re-render the list (the reading
    /// pane, if open, stays put); snapshots for other folders update the
    /// store silently. Unscoped inbox snapshots re-render only when the
    /// message count differs from the last-seen count.
    pub async fn apply_feed_event(&self, event: FeedEvent) {
        match event {
            FeedEvent::FolderSnapshot { folder, messages } => {
                let count = messages.len();
                {
                    let mut store = self.store.write().await;
                    store.replace(folder, messages);
                    store.note_seen(folder, count);
                    store.note_pushed(folder);
                }
                if self.selection.read().await.active_folder() == folder {
                    self.render_folder_now(folder).await;
                }
            }
            FeedEvent::InboxSnapshot(messages) => {
                let count = messages.len();
                let changed = {
                    let mut store = self.store.write().await;
                    let changed = count != store.seen_count(Folder::Inbox);
                    store.replace(Folder::Inbox, messages);
                    store.note_seen(Folder::Inbox, count);
                    store.note_pushed(Folder::Inbox);
                    changed
                };
                if changed && self.selection.read().await.active_folder() == Folder::Inbox {
                    self.render_folder_now(Folder::Inbox).await;
                }
            }
            FeedEvent::SwitchToPhishing => {
                self.select_folder(Folder::Phishing).await;
            }
            FeedEvent::Alert(alert) => {
                self.emit(ViewEvent::Banner(BannerView::of(&alert)));
            }
        }
    }

    /// Full state reload: the fallback for an unreachable update stream.
    ///
    /// Refetches every folder, closes the reading pane, and re-renders the
    /// active folder, the in-place equivalent of a page refresh.
    pub async fn reload_all(&self) {
        tracing::info!("reloading all folder state");
        let generation = self.bump_generation();

        for folder in Folder::ALL {
            match self.backend.fetch_folder(folder).await {
                Ok(messages) => {
                    let count = messages.len();
                    let mut store = self.store.write().await;
                    store.replace(folder, messages);
                    store.note_seen(folder, count);
                }
                Err(err) => tracing::warn!(%err, %folder, "reload fetch failed"),
            }
        }

        if self.current_generation() == generation {
            self.selection.write().await.clear_open();
            self.emit(ViewEvent::MessageClosed);
            let folder = self.selection.read().await.active_folder();
            self.render_folder_now(folder).await;
        }
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    async fn render_folder_now(&self, folder: Folder) {
        let listing = {
            let store = self.store.read().await;
            render_folder(folder, store.get(folder))
        };
        self.emit(ViewEvent::FolderView(listing));
    }

    fn bump_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    fn emit(&self, event: ViewEvent) {
        // Nobody listening is fine; state is authoritative, events advisory.
        let _ = self.view_tx.send(event);
    }
}
