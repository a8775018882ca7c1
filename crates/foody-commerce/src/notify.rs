//! User-facing notifications (toasts).
//!
//! The cart and checkout emit these through a [`Notifier`]; rendering is up
//! to the surrounding UI. Delivery is fire-and-forget.

use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::Serialize;

/// How long a toast stays on screen unless configured otherwise.
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(2000);

/// Kind of notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "SUCCESS"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

/// A single notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Display duration.
    #[serde(rename = "duration_ms", serialize_with = "serialize_millis")]
    pub duration: Duration,
}

fn serialize_millis<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
}

impl Notification {
    /// A success notification with the default duration.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
            icon: None,
            duration: DEFAULT_TOAST_DURATION,
        }
    }

    /// An error notification with the default duration.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
            icon: None,
            duration: DEFAULT_TOAST_DURATION,
        }
    }

    /// Set the icon.
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Set the display duration.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Format as JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| self.message.clone())
    }

    /// Format as human-readable string.
    pub fn to_human(&self) -> String {
        match &self.icon {
            Some(icon) => format!("[{}] {} {}", self.kind, icon, self.message),
            None => format!("[{}] {}", self.kind, self.message),
        }
    }
}

/// Sink for notifications.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Shared notifier handle, injected into the cart and checkout.
pub type SharedNotifier = Arc<dyn Notifier>;

/// Discards every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _notification: Notification) {}
}

/// Keeps every notification it receives, in order.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    history: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything received so far.
    pub fn history(&self) -> Vec<Notification> {
        self.history.lock().map(|h| h.clone()).unwrap_or_default()
    }

    /// Messages only, in order.
    pub fn messages(&self) -> Vec<String> {
        self.history().into_iter().map(|n| n.message).collect()
    }

    /// The most recent notification.
    pub fn last(&self) -> Option<Notification> {
        self.history.lock().ok().and_then(|h| h.last().cloned())
    }

    /// Drain the history.
    pub fn take(&self) -> Vec<Notification> {
        self.history
            .lock()
            .map(|mut h| std::mem::take(&mut *h))
            .unwrap_or_default()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        if let Ok(mut history) = self.history.lock() {
            history.push(notification);
        }
    }
}
