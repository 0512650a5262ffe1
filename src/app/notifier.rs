use std::collections::VecDeque;
use std::time::{Duration, Instant};

const ERROR_TTL_SECS: u64 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Error,
    Info,
}

#[derive(Debug)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
    pub expires_at: Instant,
}

/// Short-lived toast messages surfaced over the active view.
#[derive(Default)]
pub struct Notifier {
    notifications: VecDeque<Notification>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn info(&mut self, message: impl Into<String>, duration_secs: u64) {
        self.push(message.into(), NotificationKind::Info, duration_secs);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(message.into(), NotificationKind::Error, ERROR_TTL_SECS);
    }

    /// The newest live notification, if any.
    pub fn recent(&self) -> Option<&Notification> {
        self.notifications.back()
    }

    pub fn prune_expired(&mut self) {
        let now = Instant::now();
        self.notifications.retain(|n| n.expires_at > now);
    }

    fn push(&mut self, message: String, kind: NotificationKind, duration_secs: u64) {
        self.notifications.push_back(Notification {
            message,
            kind,
            expires_at: Instant::now() + Duration::from_secs(duration_secs),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newest_notification_wins() {
        let mut notifier = Notifier::new();
        notifier.info("synced", 2);
        notifier.error("connection refused");
        assert_eq!(notifier.recent().map(|n| n.kind), Some(NotificationKind::Error));
    }

    #[test]
    fn prune_drops_expired_entries() {
        let mut notifier = Notifier::new();
        notifier.info("gone", 0);
        notifier.prune_expired();
        assert!(notifier.recent().is_none());
    }
}
