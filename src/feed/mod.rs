//! The server-to-client update feed.
//!
//! A persistent, one-directional SSE stream keeps the folder store in sync
//! without polling. The connection loop never parks: an interrupted stream
//! reconnects after a short delay, and a stream that cannot be established
//! at all falls back to a full state reload (the moral equivalent of a page
//! refresh) before trying again.

mod event;
mod sse;

pub use event::FeedEvent;
pub use sse::{SseDecoder, SseFrame};

use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;
use thiserror::Error;
use url::Url;

use crate::app::MailClient;
use crate::config::FeedSettings;

/// Feed transport failures, split by recovery policy.
#[derive(Debug, Error)]
pub enum FeedError {
    /// The stream could not be established at all; triggers the
    /// reload-all fallback.
    #[error("could not establish update stream: {0}")]
    Connect(#[source] reqwest::Error),
    /// An established stream broke mid-flight; triggers a plain reconnect.
    #[error("update stream interrupted: {0}")]
    Interrupted(#[source] reqwest::Error),
}

/// The update feed connection driver.
pub struct UpdateFeed {
    http: reqwest::Client,
    url: Url,
    reconnect_delay: Duration,
    reload_delay: Duration,
}

impl UpdateFeed {
    /// Creates a feed for `{base}/stream`.
    pub fn new(mut base: Url, settings: &FeedSettings) -> Self {
        if !base.path().ends_with('/') {
            base.set_path(&format!("{}/", base.path()));
        }
        let url = base.join("stream").expect("static path segment");
        Self {
            http: reqwest::Client::new(),
            url,
            reconnect_delay: settings.reconnect_delay(),
            reload_delay: settings.reload_delay(),
        }
    }

    /// Runs the feed forever, applying events to the client.
    ///
    /// Intended to be spawned as a background task; it only returns if the
    /// task is aborted.
    pub async fn run(self, client: Arc<MailClient>) {
        loop {
            match self.consume(client.as_ref()).await {
                Ok(()) => {
                    tracing::warn!("update stream ended, reconnecting");
                    tokio::time::sleep(self.reconnect_delay).await;
                }
                Err(FeedError::Interrupted(err)) => {
                    tracing::warn!(%err, "update stream interrupted, reconnecting");
                    tokio::time::sleep(self.reconnect_delay).await;
                }
                Err(FeedError::Connect(err)) => {
                    tracing::warn!(%err, "update stream unreachable, reloading state");
                    tokio::time::sleep(self.reload_delay).await;
                    client.reload_all().await;
                }
            }
        }
    }

    /// Connects once and pumps frames until the stream ends or breaks.
    async fn consume(&self, client: &MailClient) -> Result<(), FeedError> {
        let response = self
            .http
            .get(self.url.clone())
            .send()
            .await
            .map_err(FeedError::Connect)?
            .error_for_status()
            .map_err(FeedError::Connect)?;

        tracing::info!(url = %self.url, "update stream connected");

        let mut decoder = SseDecoder::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(FeedError::Interrupted)?;
            for frame in decoder.push(&chunk) {
                if let Some(event) = FeedEvent::parse(&frame) {
                    client.apply_feed_event(event).await;
                }
            }
        }
        Ok(())
    }
}
