use std::time::{Duration, Instant};

use super::constants::NOTIFICATION_LIFETIME;

/// A dismissible banner that disappears on its own after its lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub message: String,
    created_at: Instant,
    lifetime: Duration,
}

impl Notification {
    pub fn new(title: impl Into<String>, message: impl Into<String>, now: Instant) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            created_at: now,
            lifetime: NOTIFICATION_LIFETIME,
        }
    }

    pub fn expires_at(&self) -> Instant {
        self.created_at + self.lifetime
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at()
    }
}
