//! Shared page state written by background tasks and read by the UI

use crate::display::{DisplaySlots, PageLayout};
use crate::notifications::NotificationCenter;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

pub struct PageState {
    pub slots: DisplaySlots,
    pub notifications: NotificationCenter,
}

pub type SharedPageState = Arc<Mutex<PageState>>;

impl PageState {
    pub fn new(layout: &PageLayout, notification_ttl: Duration) -> Self {
        Self {
            slots: DisplaySlots::new(layout.slots.iter().copied()),
            notifications: NotificationCenter::new(notification_ttl),
        }
    }

    pub fn shared(layout: &PageLayout, notification_ttl: Duration) -> SharedPageState {
        Arc::new(Mutex::new(Self::new(layout, notification_ttl)))
    }
}

/// Lock the page state, recovering the guard if a writer panicked
pub fn lock_state(state: &SharedPageState) -> MutexGuard<'_, PageState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
