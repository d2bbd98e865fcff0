//! mailpane - entry point for the headless client engine

use std::sync::Arc;

use anyhow::{Context, Result};
use url::Url;

use mailpane::app::MailClient;
use mailpane::backend::HttpBackend;
use mailpane::config::Settings;
use mailpane::feed::UpdateFeed;

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Starting mailpane");

    if let Err(e) = run().await {
        tracing::error!("Application error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let settings = Settings::load()?;
    let base = Url::parse(&settings.backend.base_url)
        .with_context(|| format!("invalid backend base URL: {}", settings.backend.base_url))?;

    let backend = Arc::new(HttpBackend::new(base.clone()));
    let client = Arc::new(MailClient::new(backend));

    // Log view events until a real renderer attaches.
    let mut views = client.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = views.recv().await {
            tracing::debug!(?event, "view event");
        }
    });

    let feed = UpdateFeed::new(base, &settings.feed);
    tokio::spawn(feed.run(Arc::clone(&client)));

    client.start().await;

    tokio::signal::ctrl_c().await.context("waiting for shutdown signal")?;
    tracing::info!("Shutting down");
    Ok(())
}
