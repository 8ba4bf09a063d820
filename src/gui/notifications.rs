//! Status messages and the notification history for the GUI.
//!
//! The history widget reports export outcomes as `StatusMessage`s through its
//! message callback; the app shell turns them into timestamped notification
//! entries shown in the toast and the history popup.

use std::collections::VecDeque;

/// How a status message should be presented.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// A titled status message emitted by the history widget.
#[derive(Clone, Debug)]
pub struct StatusMessage {
    pub title: String,
    pub body: String,
    pub severity: Severity,
}

impl StatusMessage {
    pub fn info(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            severity: Severity::Info,
        }
    }

    pub fn error(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            severity: Severity::Error,
        }
    }
}

/// A notification entry with message and timestamp
#[derive(Clone)]
pub struct NotificationEntry {
    pub message: String,
    pub severity: Severity,
    pub timestamp: chrono::DateTime<chrono::Local>,
}

impl NotificationEntry {
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
            timestamp: chrono::Local::now(),
        }
    }

    pub fn from_status(message: &StatusMessage) -> Self {
        Self::new(
            format!("{}: {}", message.title, message.body),
            message.severity,
        )
    }

    /// The message clipped for the single-line toast. Counts characters,
    /// not bytes: export messages embed user-chosen paths, which may hold
    /// multi-byte text.
    pub fn toast_text(&self, max_chars: usize) -> String {
        match self.message.char_indices().nth(max_chars) {
            Some((cut, _)) => format!("{}...", &self.message[..cut]),
            None => self.message.clone(),
        }
    }

    pub fn time_ago(&self) -> String {
        let now = chrono::Local::now();
        let duration = now.signed_duration_since(self.timestamp);
        if duration.num_seconds() < 60 {
            "just now".to_string()
        } else if duration.num_minutes() < 60 {
            format!("{}m ago", duration.num_minutes())
        } else if duration.num_hours() < 24 {
            format!("{}h ago", duration.num_hours())
        } else {
            self.timestamp.format("%m/%d %H:%M").to_string()
        }
    }
}

/// Append a notification, keeping the history bounded.
pub fn push_notification(
    notifications: &mut VecDeque<NotificationEntry>,
    entry: NotificationEntry,
) {
    notifications.push_back(entry);
    while notifications.len() > 50 {
        notifications.pop_front();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_joins_title_and_body() {
        let status = StatusMessage::error("Export failed", "disk full");
        let entry = NotificationEntry::from_status(&status);
        assert_eq!(entry.message, "Export failed: disk full");
        assert_eq!(entry.severity, Severity::Error);
    }

    #[test]
    fn test_fresh_entry_is_just_now() {
        let entry = NotificationEntry::new("hello", Severity::Info);
        assert_eq!(entry.time_ago(), "just now");
    }

    #[test]
    fn test_toast_text_clips_long_messages() {
        let entry = NotificationEntry::new("a".repeat(80), Severity::Info);
        assert_eq!(entry.toast_text(60), format!("{}...", "a".repeat(60)));

        let short = NotificationEntry::new("short", Severity::Info);
        assert_eq!(short.toast_text(60), "short");
    }

    #[test]
    fn test_toast_text_clips_on_char_boundaries() {
        let message = format!(
            "There was an error trying to save the candy history to {}.",
            "/home/пользователь/данные/candy.csv"
        );
        let entry = NotificationEntry::new(message, Severity::Error);

        let clipped = entry.toast_text(60);
        assert!(clipped.ends_with("..."));
        assert_eq!(clipped.chars().count(), 63);
    }

    #[test]
    fn test_push_notification_caps_history() {
        let mut notifications = VecDeque::new();
        for i in 0..60 {
            push_notification(
                &mut notifications,
                NotificationEntry::new(format!("n{}", i), Severity::Info),
            );
        }
        assert_eq!(notifications.len(), 50);
        assert_eq!(notifications.front().unwrap().message, "n10");
    }
}
