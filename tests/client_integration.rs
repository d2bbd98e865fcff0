//! Integration tests for the client engine.
//!
//! These tests drive [`MailClient`] end to end against an in-memory stub
//! backend and observe only the published view events, the same surface a
//! real renderer consumes. Detailed logic is covered by unit tests inside
//! each module.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Datelike, Duration, Local};
use pretty_assertions::assert_eq;
use tokio::sync::{broadcast, Mutex};

use mailpane::app::{ComposeError, MailClient};
use mailpane::backend::{MailBackend, MessageAction, OutgoingMail};
use mailpane::domain::{ingest, Folder, Message, MessageId, WireMessage};
use mailpane::feed::FeedEvent;
use mailpane::view::{format_smart_date, FolderListing, ViewEvent};

// ============================================================================
// Stub backend
// ============================================================================

/// In-memory backend: serves canned folder lists and records commands.
#[derive(Default)]
struct StubBackend {
    folders: Mutex<HashMap<Folder, Vec<Message>>>,
    dispatched: Mutex<Vec<(MessageId, MessageAction)>>,
    sent: Mutex<Vec<OutgoingMail>>,
    fail_sends: bool,
}

impl StubBackend {
    fn with_folder(folder: Folder, messages: Vec<Message>) -> Self {
        let stub = Self::default();
        stub.folders.try_lock().unwrap().insert(folder, messages);
        stub
    }
}

#[async_trait]
impl MailBackend for StubBackend {
    async fn fetch_folder(&self, folder: Folder) -> anyhow::Result<Vec<Message>> {
        Ok(self
            .folders
            .lock()
            .await
            .get(&folder)
            .cloned()
            .unwrap_or_default())
    }

    async fn dispatch(&self, id: &MessageId, action: MessageAction) -> anyhow::Result<()> {
        self.dispatched.lock().await.push((id.clone(), action));
        Ok(())
    }

    async fn send(&self, outgoing: &OutgoingMail) -> anyhow::Result<()> {
        if self.fail_sends {
            anyhow::bail!("send rejected");
        }
        self.sent.lock().await.push(outgoing.clone());
        Ok(())
    }
}

fn messages(json: &str) -> Vec<Message> {
    let wire: Vec<WireMessage> = serde_json::from_str(json).unwrap();
    ingest(wire)
}

fn drain(rx: &mut broadcast::Receiver<ViewEvent>) -> Vec<ViewEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

fn last_folder_view(events: &[ViewEvent]) -> Option<FolderListing> {
    events
        .iter()
        .rev()
        .find_map(|event| match event {
            ViewEvent::FolderView(listing) => Some(listing.clone()),
            _ => None,
        })
}

// ============================================================================
// Folder navigation and rendering
// ============================================================================

#[tokio::test]
async fn startup_fetches_and_renders_the_inbox() {
    let backend = StubBackend::with_folder(
        Folder::Inbox,
        messages(r#"[{"id": 1, "sender": "John Doe", "subject": "Meeting Tomorrow"}]"#),
    );
    let client = MailClient::new(Arc::new(backend));
    let mut rx = client.subscribe();

    client.start().await;

    let events = drain(&mut rx);
    let listing = last_folder_view(&events).unwrap();
    assert_eq!(listing.folder, Folder::Inbox);
    assert_eq!(listing.title, "Inbox");
    assert_eq!(listing.count, 1);
    assert_eq!(listing.rows[0].sender, "John Doe");
    assert_eq!(listing.rows[0].initial, 'J');
}

#[tokio::test]
async fn empty_folder_renders_a_placeholder_row() {
    let client = MailClient::new(Arc::new(StubBackend::default()));
    let mut rx = client.subscribe();

    client.select_folder(Folder::Drafts).await;

    let listing = last_folder_view(&drain(&mut rx)).unwrap();
    assert_eq!(listing.count, 0);
    assert!(listing.rows.is_empty());
    assert_eq!(listing.placeholder.as_deref(), Some("No messages in Drafts"));
}

#[tokio::test]
async fn store_replace_round_trips_through_the_rendered_view() {
    let client = MailClient::new(Arc::new(StubBackend::default()));
    let mut rx = client.subscribe();

    let list = messages(r#"[{"id": "c"}, {"id": "a"}, {"id": "b"}]"#);
    client
        .apply_feed_event(FeedEvent::FolderSnapshot {
            folder: Folder::Inbox,
            messages: list.clone(),
        })
        .await;

    let listing = last_folder_view(&drain(&mut rx)).unwrap();
    let rendered_ids: Vec<_> = listing.rows.iter().map(|row| row.id.0.clone()).collect();
    let source_ids: Vec<_> = list.iter().map(|m| m.id.0.clone()).collect();
    assert_eq!(rendered_ids, source_ids);
}

// ============================================================================
// Reading pane
// ============================================================================

#[tokio::test]
async fn opening_a_message_marks_it_read_in_the_next_render() {
    let backend = StubBackend::with_folder(
        Folder::Inbox,
        messages(r#"[{"id": "m1", "subject": "hi", "read": false}]"#),
    );
    let client = MailClient::new(Arc::new(backend));
    client.start().await;
    let mut rx = client.subscribe();

    assert!(client.open_message(&"m1".into()).await);
    let events = drain(&mut rx);
    assert!(!last_folder_view(&events).unwrap().rows[0].unread);
    assert!(events
        .iter()
        .any(|e| matches!(e, ViewEvent::MessageView(v) if v.subject == "hi")));

    // Idempotent: a second open observes the same state.
    assert!(client.open_message(&"m1".into()).await);
    assert!(!last_folder_view(&drain(&mut rx)).unwrap().rows[0].unread);
}

// ============================================================================
// Update feed
// ============================================================================

#[tokio::test]
async fn push_for_an_inactive_folder_does_not_touch_the_active_view() {
    let client = MailClient::new(Arc::new(StubBackend::default()));
    client.start().await;
    let mut rx = client.subscribe();

    client
        .apply_feed_event(FeedEvent::FolderSnapshot {
            folder: Folder::Phishing,
            messages: messages(r#"[{"id": "p1"}]"#),
        })
        .await;

    assert!(drain(&mut rx).is_empty());
    assert_eq!(client.active_folder().await, Folder::Inbox);
}

#[tokio::test]
async fn unscoped_updates_rerender_only_on_count_changes() {
    let client = MailClient::new(Arc::new(StubBackend::default()));
    client
        .apply_feed_event(FeedEvent::InboxSnapshot(messages(
            r#"[{"id": "a", "read": false}, {"id": "b"}]"#,
        )))
        .await;
    let mut rx = client.subscribe();

    // Equal count: skipped, even though a message changed in place. This
    // documents an accepted gap of the count heuristic, not an oversight.
    client
        .apply_feed_event(FeedEvent::InboxSnapshot(messages(
            r#"[{"id": "a", "read": true}, {"id": "b"}]"#,
        )))
        .await;
    assert!(drain(&mut rx).is_empty());

    // Fewer messages: re-rendered.
    client
        .apply_feed_event(FeedEvent::InboxSnapshot(messages(r#"[{"id": "b"}]"#)))
        .await;
    assert_eq!(last_folder_view(&drain(&mut rx)).unwrap().count, 1);

    // More messages: re-rendered.
    client
        .apply_feed_event(FeedEvent::InboxSnapshot(messages(
            r#"[{"id": "a"}, {"id": "b"}, {"id": "c"}]"#,
        )))
        .await;
    assert_eq!(last_folder_view(&drain(&mut rx)).unwrap().count, 3);
}

// ============================================================================
// Actions
// ============================================================================

#[tokio::test]
async fn trash_removes_exactly_the_confirmed_id() {
    let backend = Arc::new(StubBackend::with_folder(
        Folder::Inbox,
        messages(r#"[{"id": "a"}, {"id": "b"}]"#),
    ));
    let client = MailClient::new(Arc::clone(&backend) as Arc<dyn MailBackend>);
    client.start().await;
    let mut rx = client.subscribe();

    client.dispatch_action(MessageAction::Trash, &"a".into()).await;

    let listing = last_folder_view(&drain(&mut rx)).unwrap();
    assert_eq!(listing.count, 1);
    assert_eq!(listing.rows[0].id.0, "b");
    let dispatched = backend.dispatched.lock().await;
    assert_eq!(dispatched.len(), 1);
    assert_eq!(dispatched[0], (MessageId::from("a"), MessageAction::Trash));
}

#[tokio::test]
async fn trash_of_an_unknown_id_changes_nothing_visible() {
    let backend = StubBackend::with_folder(Folder::Inbox, messages(r#"[{"id": "a"}]"#));
    let client = MailClient::new(Arc::new(backend));
    client.start().await;
    let mut rx = client.subscribe();

    client
        .dispatch_action(MessageAction::Trash, &"missing".into())
        .await;

    // No re-render: the list did not change.
    assert!(last_folder_view(&drain(&mut rx)).is_none());
}

// ============================================================================
// Compose
// ============================================================================

#[tokio::test]
async fn send_with_an_empty_field_never_reaches_the_backend() {
    let backend = Arc::new(StubBackend::default());
    let client = MailClient::new(Arc::clone(&backend) as Arc<dyn MailBackend>);
    client.open_compose().await;

    for (to, subject, body) in [("", "s", "b"), ("a@b", "", "b"), ("a@b", "s", "  ")] {
        let result = client.submit_compose(to, subject, body).await;
        assert_eq!(result, Err(ComposeError::MissingFields));
    }

    assert!(backend.sent.lock().await.is_empty());
}

#[tokio::test]
async fn successful_send_switches_the_active_folder_to_sent() {
    let backend = Arc::new(StubBackend::with_folder(
        Folder::Sent,
        messages(r#"[{"id": "s1", "sender": "You", "read": true}]"#),
    ));
    let client = MailClient::new(Arc::clone(&backend) as Arc<dyn MailBackend>);
    client.open_compose().await;
    let mut rx = client.subscribe();

    client
        .submit_compose("friend@example.com", "Hello", "Long time!")
        .await
        .unwrap();

    assert_eq!(client.active_folder().await, Folder::Sent);
    let listing = last_folder_view(&drain(&mut rx)).unwrap();
    assert_eq!(listing.folder, Folder::Sent);
    assert_eq!(listing.count, 1);

    let sent = backend.sent.lock().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "friend@example.com");
}

#[tokio::test]
async fn failed_send_leaves_the_compose_surface_usable() {
    let backend = StubBackend {
        fail_sends: true,
        ..Default::default()
    };
    let client = MailClient::new(Arc::new(backend));
    client.open_compose().await;
    let mut rx = client.subscribe();

    let result = client.submit_compose("a@b", "s", "b").await;
    assert_eq!(result, Err(ComposeError::SendFailed));
    assert_eq!(client.active_folder().await, Folder::Inbox);

    // The last compose view is open again with the submit re-enabled.
    let compose_views: Vec<_> = drain(&mut rx)
        .into_iter()
        .filter_map(|e| match e {
            ViewEvent::Compose(view) => Some(view),
            _ => None,
        })
        .collect();
    let last = compose_views.last().unwrap();
    assert!(last.open);
    assert!(!last.submit_disabled);
    assert_eq!(last.body, "b");
}

// ============================================================================
// Smart dates (against the real clock)
// ============================================================================

#[tokio::test]
async fn smart_dates_bucket_relative_to_now() {
    let now = Local::now();

    assert_eq!(format_smart_date(&now.to_rfc3339()), now.format("%H:%M").to_string());

    let yesterday = now - Duration::days(1);
    assert_eq!(format_smart_date(&yesterday.to_rfc2822()), "Yesterday");

    let weeks_ago = now - Duration::days(40);
    let expected = if weeks_ago.year() == now.year() {
        weeks_ago.format("%-d %b").to_string()
    } else {
        weeks_ago.format("%d/%m/%Y").to_string()
    };
    assert_eq!(format_smart_date(&weeks_ago.to_rfc2822()), expected);

    let prior_year = now - Duration::days(400);
    assert_eq!(
        format_smart_date(&prior_year.to_rfc2822()),
        prior_year.format("%d/%m/%Y").to_string()
    );
}
