//! Compose window lifecycle state.
//!
//! Tracks the field buffers, the open/closed flag, and the in-flight send
//! state that disables and relabels the submit affordance. Validation is
//! local and runs before any network traffic: a send with a missing field
//! is rejected here and never reaches the backend.

use thiserror::Error;

use crate::backend::OutgoingMail;
use crate::view::ComposeView;

/// Why a compose submission was rejected locally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComposeError {
    /// One of to/subject/body is empty after trimming.
    #[error("Please fill in all fields")]
    MissingFields,
    /// A previous send is still in flight.
    #[error("a send is already in progress")]
    SendInFlight,
    /// The backend rejected or failed the send.
    #[error("failed to send message")]
    SendFailed,
}

/// Mutable compose window state.
#[derive(Debug, Clone, Default)]
pub struct ComposeState {
    open: bool,
    to: String,
    subject: String,
    body: String,
    sending: bool,
}

impl ComposeState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_sending(&self) -> bool {
        self.sending
    }

    /// Opens the compose window, keeping any previously entered text.
    pub fn open(&mut self) {
        self.open = true;
    }

    /// Closes the window and clears the field buffers.
    pub fn close(&mut self) {
        self.open = false;
        self.to.clear();
        self.subject.clear();
        self.body.clear();
        self.sending = false;
    }

    /// Stores the latest field values from the input surfaces.
    pub fn set_fields(
        &mut self,
        to: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) {
        self.to = to.into();
        self.subject = subject.into();
        self.body = body.into();
    }

    /// Validates the buffers and, if complete, marks the send in flight.
    ///
    /// All three fields are required; values are trimmed before both the
    /// check and the outgoing payload.
    pub fn begin_send(&mut self) -> Result<OutgoingMail, ComposeError> {
        if self.sending {
            return Err(ComposeError::SendInFlight);
        }
        let to = self.to.trim();
        let subject = self.subject.trim();
        let body = self.body.trim();
        if to.is_empty() || subject.is_empty() || body.is_empty() {
            return Err(ComposeError::MissingFields);
        }
        self.sending = true;
        Ok(OutgoingMail {
            to: to.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        })
    }

    /// Send confirmed: close the window and drop the entered text.
    pub fn finish_send_success(&mut self) {
        self.close();
    }

    /// Send failed: stay open, keep the text, re-enable the submit button.
    pub fn finish_send_failure(&mut self) {
        self.sending = false;
    }

    /// Projects the state for the rendering boundary.
    pub fn view(&self) -> ComposeView {
        ComposeView {
            open: self.open,
            to: self.to.clone(),
            subject: self.subject.clone(),
            body: self.body.clone(),
            submit_disabled: self.sending,
            submit_label: if self.sending { "Sending..." } else { "Send" }.to_string(),
        }
    }
}
