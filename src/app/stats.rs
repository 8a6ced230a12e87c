//! Stats loading and slot rendering

use super::App;
use crate::constants::COUNT_UP_DURATION;
use crate::display::{sync_stats, DisplaySlot};
use crate::state::lock_state;
use crate::ui::components::{count_up_text, stat_card};
use eframe::egui;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::debug;

/// Count-up start time of each slot, keyed by the target it runs towards
#[derive(Debug, Default)]
pub struct CountUpClocks {
    started: HashMap<DisplaySlot, (Option<u64>, Instant)>,
}

impl CountUpClocks {
    /// How far `slot` is into its run towards `target`. `None` until the slot
    /// has been on screen with that target.
    pub fn elapsed(&self, slot: DisplaySlot, target: Option<u64>, now: Instant) -> Option<Duration> {
        self.started
            .get(&slot)
            .filter(|(running_to, _)| *running_to == target)
            .map(|(_, started)| now.saturating_duration_since(*started))
    }

    /// Note that `slot` is on screen showing `target`. Starts a new run when
    /// the slot is seen for the first time or its target changed.
    pub fn observe(&mut self, slot: DisplaySlot, target: Option<u64>, now: Instant) -> bool {
        if matches!(self.started.get(&slot), Some((running_to, _)) if *running_to == target) {
            return false;
        }
        self.started.insert(slot, (target, now));
        true
    }

    /// True while any run is still in progress
    pub fn running(&self, now: Instant) -> bool {
        self.started
            .values()
            .any(|(_, started)| now.saturating_duration_since(*started) < COUNT_UP_DURATION)
    }
}

impl App {
    /// Start the single stats fetch of this launch
    pub fn request_initial_stats(&mut self, ctx: &egui::Context) {
        if self.stats_requested {
            return;
        }
        self.stats_requested = true;

        let service = self.service.clone();
        let state = self.state.clone();
        let ctx = ctx.clone();
        debug!("Requesting initial stats");

        self.runtime.spawn(async move {
            sync_stats(service.as_ref(), &state).await;
            ctx.request_repaint();
        });
    }

    /// Draw a stat card for `slot` if the page has it. The count-up restarts
    /// whenever the card is on screen with a new target.
    pub fn render_slot(&mut self, ui: &mut egui::Ui, slot: DisplaySlot, now: Instant) {
        let Some(value) = lock_state(&self.state).slots.get(slot).cloned() else {
            return;
        };
        let elapsed = self.count_up.elapsed(slot, value.target, now);
        let text = count_up_text(slot, &value, elapsed);

        let response = stat_card(ui, slot.label(), &text);
        if ui.is_rect_visible(response.rect) && self.count_up.observe(slot, value.target, now) {
            debug!(slot = slot.id(), target = ?value.target, "Count-up started");
        }
    }

    /// True while any visible slot is still counting up
    pub fn counting_up(&self, now: Instant) -> bool {
        self.count_up.running(now)
    }
}
