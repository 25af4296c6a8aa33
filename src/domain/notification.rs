use chrono::{DateTime, Duration, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Warning,
    Info,
}

/// Transient user feedback. Only one is shown at a time; it disappears once
/// `ttl` has elapsed.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    pub issued_at: DateTime<Utc>,
    pub ttl: Duration,
}

impl Notification {
    pub fn new(kind: NotificationKind, message: impl Into<String>, ttl: Duration) -> Self {
        Self {
            kind,
            message: message.into(),
            issued_at: Utc::now(),
            ttl,
        }
    }

    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        now < self.issued_at + self.ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_dismiss() {
        let n = Notification::new(NotificationKind::Info, "hi", Duration::seconds(5));
        assert!(n.is_active_at(n.issued_at));
        assert!(n.is_active_at(n.issued_at + Duration::seconds(4)));
        assert!(!n.is_active_at(n.issued_at + Duration::seconds(5)));
    }
}
