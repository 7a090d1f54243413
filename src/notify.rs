//! User-visible transient notifications.
//!
//! The layout store reports save results through a [`Notifier`]. The
//! terminal editor drains a [`QueueNotifier`] into its status line; headless
//! callers can use [`LogNotifier`], which only logs.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Mutex;

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    /// The operation completed.
    Success,
    /// The operation failed.
    Error,
}

impl fmt::Display for NotificationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NotificationLevel::Success => "success",
            NotificationLevel::Error => "error",
        };
        write!(f, "{}", s)
    }
}

/// A transient message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Severity.
    pub level: NotificationLevel,
    /// Text shown to the user.
    pub message: String,
}

impl Notification {
    /// A success message.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    /// A failure message.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }
}

/// Sink for user-visible notifications.
pub trait Notifier: Send + Sync {
    /// Delivers `notification` to the user.
    fn notify(&self, notification: Notification);
}

/// Notifier that logs every message through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Success => tracing::info!("{}", notification.message),
            NotificationLevel::Error => tracing::warn!("{}", notification.message),
        }
    }
}

/// Notifier that queues messages until the host drains them.
#[derive(Debug, Default)]
pub struct QueueNotifier {
    queue: Mutex<VecDeque<Notification>>,
}

impl QueueNotifier {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns every queued notification, oldest first.
    pub fn drain(&self) -> Vec<Notification> {
        self.queue
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .drain(..)
            .collect()
    }

    /// Count of queued notifications.
    pub fn len(&self) -> usize {
        self.queue.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Returns `true` if nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Notifier for QueueNotifier {
    fn notify(&self, notification: Notification) {
        tracing::debug!("notification ({}): {}", notification.level, notification.message);
        self.queue
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_drains_in_order() {
        let n = QueueNotifier::new();
        n.notify(Notification::success("saved"));
        n.notify(Notification::error("failed"));
        assert_eq!(n.len(), 2);

        let drained = n.drain();
        assert_eq!(drained[0], Notification::success("saved"));
        assert_eq!(drained[1].level, NotificationLevel::Error);
        assert!(n.is_empty());
    }

    #[test]
    fn log_notifier_accepts_both_levels() {
        LogNotifier.notify(Notification::success("ok"));
        LogNotifier.notify(Notification::error("not ok"));
    }

    #[test]
    fn notifier_is_object_safe_and_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn Notifier>();
        assert_send_sync::<QueueNotifier>();
    }
}
