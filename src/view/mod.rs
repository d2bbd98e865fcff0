//! View models and the rendering boundary.
//!
//! The client core never touches a widget or a DOM node. It projects store
//! state into the typed view models in this module and publishes them as
//! [`ViewEvent`]s on a broadcast channel; a renderer subscribes and paints.
//! This keeps everything in the core testable without a UI.

mod date;
mod list;
mod notice;

pub use date::{format_smart_date, format_smart_date_at, smart_label};
pub use list::{escape_html, render_folder, FolderListing, ListRow, RowAction};
pub use notice::{Notice, NoticeLevel};

use std::time::Duration;

use crate::domain::{Message, PhishingAlert};

/// How long the phishing banner stays on screen.
pub const BANNER_DURATION: Duration = Duration::from_secs(9);

/// The reading pane view model.
///
/// Body text is delivered raw; the rendering boundary shows it as plain
/// text (never as markup), which is why no escaping is applied here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageView {
    pub subject: String,
    /// "From: <sender>" line.
    pub sender_line: String,
    pub body: String,
}

impl MessageView {
    pub fn of(message: &Message) -> Self {
        Self {
            subject: message.subject.clone(),
            sender_line: format!("From: {}", message.sender),
            body: message.body.clone(),
        }
    }
}

/// Placeholder shown for sidebar targets outside the folder set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderView {
    /// Capitalized target name.
    pub title: String,
    /// "<Target> coming soon..." body text.
    pub text: String,
}

impl PlaceholderView {
    pub fn coming_soon(target: &str) -> Self {
        let mut title = String::new();
        let mut chars = target.trim().chars();
        if let Some(first) = chars.next() {
            title.extend(first.to_uppercase());
            title.push_str(chars.as_str());
        }
        let text = format!("{title} coming soon...");
        Self { title, text }
    }
}

/// The phishing banner view model, escaped and ready to display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BannerView {
    pub title: String,
    /// Classifier confidence label, e.g. "High Confidence".
    pub confidence_label: String,
    /// "From: <name> <email>" line, escaped.
    pub from_line: String,
    /// Quoted subject, escaped.
    pub subject_quote: String,
    /// Escaped reason bullet texts, in classifier order.
    pub reasons: Vec<String>,
    /// Display duration before auto-dismissal.
    pub duration: Duration,
}

impl BannerView {
    pub fn of(alert: &PhishingAlert) -> Self {
        Self {
            title: "Phishing Email Blocked".to_string(),
            confidence_label: format!("{} Confidence", alert.confidence),
            from_line: format!(
                "From: {} <{}>",
                escape_html(&alert.sender),
                escape_html(&alert.sender_email)
            ),
            subject_quote: format!("\u{201c}{}\u{201d}", escape_html(&alert.subject)),
            reasons: alert.reasons.iter().map(|r| escape_html(r)).collect(),
            duration: BANNER_DURATION,
        }
    }
}

/// Compose window state as seen by the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposeView {
    pub open: bool,
    pub to: String,
    pub subject: String,
    pub body: String,
    /// Whether the submit affordance is disabled (send in flight).
    pub submit_disabled: bool,
    /// Submit button label ("Send" or "Sending...").
    pub submit_label: String,
}

/// Events published to the rendering boundary.
#[derive(Debug, Clone)]
pub enum ViewEvent {
    /// Show the list view for a folder.
    FolderView(FolderListing),
    /// Show the reading pane.
    MessageView(MessageView),
    /// Dismiss the reading pane and return to list mode.
    MessageClosed,
    /// Show a "coming soon" placeholder for an unknown sidebar target.
    Placeholder(PlaceholderView),
    /// Compose window state changed.
    Compose(ComposeView),
    /// Show a transient notice toast.
    Notice(Notice),
    /// Show the phishing banner.
    Banner(BannerView),
    /// The sidebar highlight moved to a folder.
    ActiveFolderChanged(crate::domain::Folder),
}
