//! Transient user notices.
//!
//! Non-blocking toasts for action failures, validation errors, and
//! lifecycle messages. Nothing here blocks input; errors stay on screen
//! until dismissed, everything else auto-dismisses.

use uuid::Uuid;

/// Notice severity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoticeLevel {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

/// A transient, non-blocking user notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Unique id so the rendering boundary can dismiss a specific toast.
    pub id: String,
    /// Short message text.
    pub text: String,
    /// Severity level.
    pub level: NoticeLevel,
    /// Auto-dismiss after this many milliseconds; `None` stays until closed.
    pub auto_dismiss_ms: Option<u64>,
}

impl Notice {
    fn new(text: impl Into<String>, level: NoticeLevel, auto_dismiss_ms: Option<u64>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            level,
            auto_dismiss_ms,
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(text, NoticeLevel::Info, Some(5000))
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(text, NoticeLevel::Success, Some(3000))
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(text, NoticeLevel::Warning, Some(8000))
    }

    /// Errors persist until the user dismisses them.
    pub fn error(text: impl Into<String>) -> Self {
        Self::new(text, NoticeLevel::Error, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_and_dismissal() {
        let info = Notice::info("hello");
        assert_eq!(info.level, NoticeLevel::Info);
        assert_eq!(info.auto_dismiss_ms, Some(5000));

        let error = Notice::error("boom");
        assert_eq!(error.level, NoticeLevel::Error);
        assert_eq!(error.auto_dismiss_ms, None);
    }

    #[test]
    fn ids_are_unique() {
        assert_ne!(Notice::info("a").id, Notice::info("a").id);
    }
}
