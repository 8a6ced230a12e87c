//! Transient feedback messages
//!
//! At most one notification is live: presenting a new one replaces whatever is
//! on screen. Each one expires after a fixed delay unless closed first.

use std::time::{Duration, Instant};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationId(pub(crate) u64);

#[derive(Debug, Clone)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub severity: Severity,
    pub created_at: Instant,
}

pub struct NotificationCenter {
    current: Option<Notification>,
    next_id: u64,
    ttl: Duration,
}

impl NotificationCenter {
    pub fn new(ttl: Duration) -> Self {
        Self {
            current: None,
            next_id: 1,
            ttl,
        }
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    pub fn present(&mut self, message: impl Into<String>, severity: Severity) -> NotificationId {
        self.present_at(message, severity, Instant::now())
    }

    pub fn present_at(
        &mut self,
        message: impl Into<String>,
        severity: Severity,
        now: Instant,
    ) -> NotificationId {
        let id = NotificationId(self.next_id);
        self.next_id += 1;
        if let Some(old) = self.current.take() {
            debug!(id = old.id.0, "Notification replaced");
        }
        let message = message.into();
        debug!(id = id.0, ?severity, message = %message, "Notification presented");
        self.current = Some(Notification {
            id,
            message,
            severity,
            created_at: now,
        });
        id
    }

    /// Close a notification. A no-op when it is already gone.
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        match &self.current {
            Some(n) if n.id == id => {
                self.current = None;
                true
            }
            _ => false,
        }
    }

    /// Drop the live notification if it has outlived the ttl
    pub fn sweep(&mut self, now: Instant) -> Option<NotificationId> {
        let expired = self
            .current
            .as_ref()
            .filter(|n| now.saturating_duration_since(n.created_at) >= self.ttl)
            .map(|n| n.id)?;
        self.current = None;
        Some(expired)
    }

    /// Time left before the live notification expires
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.current
            .as_ref()
            .map(|n| self.ttl.saturating_sub(now.saturating_duration_since(n.created_at)))
    }
}
