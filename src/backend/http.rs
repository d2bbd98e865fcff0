//! HTTP implementation of the mail backend.
//!
//! Endpoints:
//! - `GET  {base}/api/emails?folder=<name>`: JSON array of wire messages
//! - `POST {base}/action`: JSON `{id, action}`
//! - `POST {base}/send`: form-encoded `to_addr`, `subject`, `body`

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Serialize;
use url::Url;

use crate::domain::{ingest, Folder, Message, MessageId, WireMessage};

use super::{MailBackend, MessageAction, OutgoingMail};

/// JSON body of the `/action` command.
#[derive(Debug, Serialize)]
struct ActionRequest<'a> {
    id: &'a str,
    action: MessageAction,
}

/// Mail backend speaking the webmail HTTP API.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    http: reqwest::Client,
    base: Url,
}

impl HttpBackend {
    /// Creates a backend client for the given base URL.
    pub fn new(mut base: Url) -> Self {
        // Url::join treats a path without a trailing slash as a file.
        if !base.path().ends_with('/') {
            base.set_path(&format!("{}/", base.path()));
        }
        Self {
            http: reqwest::Client::new(),
            base,
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base
            .join(path)
            .with_context(|| format!("invalid endpoint path: {path}"))
    }
}

#[async_trait]
impl MailBackend for HttpBackend {
    async fn fetch_folder(&self, folder: Folder) -> Result<Vec<Message>> {
        let url = self.endpoint("api/emails")?;
        let wire: Vec<WireMessage> = self
            .http
            .get(url)
            .query(&[("folder", folder.as_str())])
            .send()
            .await
            .with_context(|| format!("fetching folder {folder}"))?
            .error_for_status()
            .with_context(|| format!("fetching folder {folder}"))?
            .json()
            .await
            .with_context(|| format!("decoding folder {folder}"))?;
        Ok(ingest(wire))
    }

    async fn dispatch(&self, id: &MessageId, action: MessageAction) -> Result<()> {
        let url = self.endpoint("action")?;
        self.http
            .post(url)
            .json(&ActionRequest { id: &id.0, action })
            .send()
            .await
            .context("dispatching message action")?
            .error_for_status()
            .context("dispatching message action")?;
        Ok(())
    }

    async fn send(&self, outgoing: &OutgoingMail) -> Result<()> {
        let url = self.endpoint("send")?;
        self.http
            .post(url)
            .form(&[
                ("to_addr", outgoing.to.as_str()),
                ("subject", outgoing.subject.as_str()),
                ("body", outgoing.body.as_str()),
            ])
            .send()
            .await
            .context("sending message")?
            .error_for_status()
            .context("sending message")?;
        Ok(())
    }
}
