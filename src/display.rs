//! Display slots and stats reconciliation
//!
//! The page never reads stats from anywhere but [`DisplaySlots`]. Every write
//! goes through [`DisplaySlots::apply_snapshot`] or
//! [`DisplaySlots::apply_download_count`], and only slots that the page layout
//! declares are ever written.

use crate::client::StatsService;
use crate::constants::POINTS_UNIT;
use crate::state::{lock_state, SharedPageState};
use crate::types::StatsSnapshot;
use crate::utils::{format_count, strip_unit};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{info, warn};

/// A named place on the page that shows one stat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DisplaySlot {
    DownloadCount,
    CardDownloadCount,
    TkEarned,
    TournamentCount,
}

/// How a slot renders the value written into it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotFormat {
    /// Integer with thousands separators
    Grouped,
    /// Service-provided string, verbatim
    PassThrough,
}

impl DisplaySlot {
    pub const ALL: [DisplaySlot; 4] = [
        DisplaySlot::DownloadCount,
        DisplaySlot::CardDownloadCount,
        DisplaySlot::TkEarned,
        DisplaySlot::TournamentCount,
    ];

    /// Stable identifier of the slot
    pub fn id(self) -> &'static str {
        match self {
            DisplaySlot::DownloadCount => "downloadCount",
            DisplaySlot::CardDownloadCount => "cardDownloadCount",
            DisplaySlot::TkEarned => "tkEarned",
            DisplaySlot::TournamentCount => "tournamentCount",
        }
    }

    pub fn format(self) -> SlotFormat {
        match self {
            DisplaySlot::TkEarned => SlotFormat::PassThrough,
            _ => SlotFormat::Grouped,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DisplaySlot::DownloadCount | DisplaySlot::CardDownloadCount => "Downloads",
            DisplaySlot::TkEarned => "TK Earned",
            DisplaySlot::TournamentCount => "Tournaments",
        }
    }

    fn is_download_count(self) -> bool {
        matches!(self, DisplaySlot::DownloadCount | DisplaySlot::CardDownloadCount)
    }
}

/// Which slots and controls exist on the page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageLayout {
    pub slots: Vec<DisplaySlot>,
    pub download_trigger: bool,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            slots: DisplaySlot::ALL.to_vec(),
            download_trigger: true,
        }
    }
}

/// Current content of one slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotValue {
    pub text: String,
    /// Number the count-up animation runs towards
    pub target: Option<u64>,
    /// Set once a service response has written the slot
    pub live: bool,
}

/// Where the values written by [`sync_stats`] came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsSource {
    Fallback,
    Live,
}

/// View-binding map: one entry per slot present on the page
#[derive(Debug, Clone)]
pub struct DisplaySlots {
    values: HashMap<DisplaySlot, SlotValue>,
}

impl DisplaySlots {
    /// Bind the given slots, starting from the fallback-zero values
    pub fn new(present: impl IntoIterator<Item = DisplaySlot>) -> Self {
        let placeholder = SlotValue {
            text: String::new(),
            target: None,
            live: false,
        };
        let mut slots = Self {
            values: present.into_iter().map(|s| (s, placeholder.clone())).collect(),
        };
        slots.apply_fallback();
        slots
    }

    pub fn get(&self, slot: DisplaySlot) -> Option<&SlotValue> {
        self.values.get(&slot)
    }

    pub fn text(&self, slot: DisplaySlot) -> Option<&str> {
        self.values.get(&slot).map(|v| v.text.as_str())
    }

    /// Write a full snapshot. Returns how many slots were written.
    pub fn apply_snapshot(&mut self, snapshot: &StatsSnapshot) -> usize {
        self.write_snapshot(snapshot, true)
    }

    /// Write the zero values used when the service is unavailable. Slots that
    /// already hold a service value keep it.
    pub fn apply_fallback(&mut self) -> usize {
        self.write_snapshot(&StatsSnapshot::fallback_zero(), false)
    }

    /// Targeted update of the download-count slots only
    pub fn apply_download_count(&mut self, total_downloads: u64) -> usize {
        let mut written = 0;
        for slot in DisplaySlot::ALL.into_iter().filter(|s| s.is_download_count()) {
            if self.write_number(slot, total_downloads, true) {
                written += 1;
            }
        }
        written
    }

    fn write_snapshot(&mut self, snapshot: &StatsSnapshot, live: bool) -> usize {
        let mut written = 0;
        for slot in DisplaySlot::ALL {
            let wrote = match slot {
                DisplaySlot::DownloadCount | DisplaySlot::CardDownloadCount => {
                    self.write_number(slot, snapshot.total_downloads, live)
                }
                DisplaySlot::TournamentCount => self.write_number(slot, snapshot.total_tournaments, live),
                DisplaySlot::TkEarned => self.write_points(&snapshot.total_points_earned, live),
            };
            if wrote {
                written += 1;
            }
        }
        written
    }

    /// Entry `slot` may be written with a value of the given liveness.
    /// Placeholders never overwrite a live value.
    fn writable(&mut self, slot: DisplaySlot, live: bool) -> Option<&mut SlotValue> {
        self.values.get_mut(&slot).filter(|entry| live || !entry.live)
    }

    fn write_number(&mut self, slot: DisplaySlot, value: u64, live: bool) -> bool {
        let Some(entry) = self.writable(slot, live) else {
            return false;
        };
        entry.text = format_count(value);
        entry.target = Some(value);
        entry.live = live;
        true
    }

    fn write_points(&mut self, points: &str, live: bool) -> bool {
        let Some(entry) = self.writable(DisplaySlot::TkEarned, live) else {
            return false;
        };
        entry.text = points.to_string();
        entry.target = strip_unit(points, POINTS_UNIT).replace(',', "").parse().ok();
        entry.live = live;
        true
    }
}

/// Number shown `elapsed` into a count-up animation towards `target`
pub fn count_up_value(target: u64, elapsed: Duration, duration: Duration) -> u64 {
    if duration.is_zero() || elapsed >= duration {
        return target;
    }
    let progress = elapsed.as_secs_f64() / duration.as_secs_f64();
    ((target as f64) * progress).floor() as u64
}

/// Fetch stats once and write them, or the zero fallback, into the page.
///
/// Never fails: an unreachable or unhappy service degrades to zeros.
pub async fn sync_stats<S: StatsService>(service: &S, state: &SharedPageState) -> StatsSource {
    match service.fetch_stats().await {
        Ok(snapshot) => {
            let written = lock_state(state).slots.apply_snapshot(&snapshot);
            info!(
                downloads = snapshot.total_downloads,
                points = %snapshot.total_points_earned,
                tournaments = snapshot.total_tournaments,
                slots = written,
                "Stats applied"
            );
            StatsSource::Live
        }
        Err(e) => {
            let written = lock_state(state).slots.apply_fallback();
            warn!(kind = ?e.kind(), error = %e, slots = written, "Stats unavailable, showing zeros");
            StatsSource::Fallback
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServiceError;
    use crate::state::PageState;
    use crate::types::DownloadEventRecord;

    fn snapshot() -> StatsSnapshot {
        StatsSnapshot {
            total_downloads: 1234,
            total_points_earned: "56 TK".into(),
            total_tournaments: 7,
        }
    }

    #[test]
    fn snapshot_fills_every_present_slot() {
        let mut slots = DisplaySlots::new(DisplaySlot::ALL);
        assert_eq!(slots.apply_snapshot(&snapshot()), 4);

        assert_eq!(slots.text(DisplaySlot::DownloadCount), Some("1,234"));
        assert_eq!(slots.text(DisplaySlot::CardDownloadCount), Some("1,234"));
        assert_eq!(slots.text(DisplaySlot::TkEarned), Some("56 TK"));
        assert_eq!(slots.text(DisplaySlot::TournamentCount), Some("7"));
    }

    #[test]
    fn points_target_drops_unit() {
        let mut slots = DisplaySlots::new([DisplaySlot::TkEarned]);
        slots.apply_snapshot(&snapshot());
        let value = slots.get(DisplaySlot::TkEarned).unwrap();
        assert_eq!(value.text, "56 TK");
        assert_eq!(value.target, Some(56));
    }

    #[test]
    fn absent_slots_are_skipped() {
        let mut slots = DisplaySlots::new([DisplaySlot::TournamentCount]);
        assert_eq!(slots.apply_snapshot(&snapshot()), 1);
        assert!(slots.get(DisplaySlot::DownloadCount).is_none());
        assert_eq!(slots.text(DisplaySlot::DownloadCount), None);
        assert_eq!(slots.text(DisplaySlot::TournamentCount), Some("7"));

        let mut empty = DisplaySlots::new([]);
        assert_eq!(empty.apply_snapshot(&snapshot()), 0);
        assert_eq!(empty.apply_download_count(9), 0);
    }

    #[test]
    fn new_slots_start_at_zero() {
        let slots = DisplaySlots::new(DisplaySlot::ALL);
        assert_eq!(slots.text(DisplaySlot::DownloadCount), Some("0"));
        assert_eq!(slots.text(DisplaySlot::TkEarned), Some("0 TK"));
        assert_eq!(slots.text(DisplaySlot::TournamentCount), Some("0"));
    }

    #[test]
    fn download_count_update_leaves_other_slots() {
        let mut slots = DisplaySlots::new(DisplaySlot::ALL);
        slots.apply_snapshot(&snapshot());
        assert_eq!(slots.apply_download_count(1235), 2);

        assert_eq!(slots.text(DisplaySlot::DownloadCount), Some("1,235"));
        assert_eq!(slots.text(DisplaySlot::CardDownloadCount), Some("1,235"));
        assert_eq!(slots.text(DisplaySlot::TkEarned), Some("56 TK"));
        assert_eq!(slots.text(DisplaySlot::TournamentCount), Some("7"));
    }

    #[test]
    fn fallback_keeps_live_values() {
        let mut slots = DisplaySlots::new(DisplaySlot::ALL);
        assert!(!slots.get(DisplaySlot::DownloadCount).unwrap().live);
        slots.apply_download_count(1235);

        assert_eq!(slots.apply_fallback(), 2);
        assert_eq!(slots.text(DisplaySlot::DownloadCount), Some("1,235"));
        assert_eq!(slots.text(DisplaySlot::CardDownloadCount), Some("1,235"));
        assert!(slots.get(DisplaySlot::CardDownloadCount).unwrap().live);
        assert_eq!(slots.text(DisplaySlot::TkEarned), Some("0 TK"));
        assert_eq!(slots.text(DisplaySlot::TournamentCount), Some("0"));
    }

    #[test]
    fn layout_reads_partial_json() {
        let layout: PageLayout =
            serde_json::from_str(r#"{"slots":["tkEarned","tournamentCount"],"download_trigger":false}"#)
                .unwrap();
        assert_eq!(layout.slots, vec![DisplaySlot::TkEarned, DisplaySlot::TournamentCount]);
        assert!(!layout.download_trigger);

        let layout: PageLayout = serde_json::from_str("{}").unwrap();
        assert_eq!(layout, PageLayout::default());
    }

    #[test]
    fn count_up_progresses_linearly_and_clamps() {
        let d = Duration::from_millis(2000);
        assert_eq!(count_up_value(1000, Duration::ZERO, d), 0);
        assert_eq!(count_up_value(1000, Duration::from_millis(500), d), 250);
        assert_eq!(count_up_value(1000, Duration::from_millis(2000), d), 1000);
        assert_eq!(count_up_value(1000, Duration::from_secs(10), d), 1000);
        assert_eq!(count_up_value(7, Duration::from_millis(1), Duration::ZERO), 7);
    }

    struct FixedStats(Option<StatsSnapshot>);

    impl StatsService for FixedStats {
        async fn fetch_stats(&self) -> Result<StatsSnapshot, ServiceError> {
            self.0.clone().ok_or(ServiceError::Status(503))
        }

        async fn record_download(&self, _record: DownloadEventRecord) -> Result<u64, ServiceError> {
            Err(ServiceError::Status(503))
        }
    }

    #[tokio::test]
    async fn sync_applies_live_snapshot() {
        let state = PageState::shared(&PageLayout::default(), Duration::from_secs(5));
        let source = sync_stats(&FixedStats(Some(snapshot())), &state).await;

        assert_eq!(source, StatsSource::Live);
        let s = lock_state(&state);
        assert_eq!(s.slots.text(DisplaySlot::DownloadCount), Some("1,234"));
        assert_eq!(s.slots.text(DisplaySlot::TkEarned), Some("56 TK"));
        assert_eq!(s.slots.text(DisplaySlot::TournamentCount), Some("7"));
    }

    #[tokio::test]
    async fn sync_failure_shows_zeros() {
        let state = PageState::shared(&PageLayout::default(), Duration::from_secs(5));
        let source = sync_stats(&FixedStats(None), &state).await;

        assert_eq!(source, StatsSource::Fallback);
        let s = lock_state(&state);
        assert_eq!(s.slots.text(DisplaySlot::DownloadCount), Some("0"));
        assert_eq!(s.slots.text(DisplaySlot::CardDownloadCount), Some("0"));
        assert_eq!(s.slots.text(DisplaySlot::TkEarned), Some("0 TK"));
        assert_eq!(s.slots.text(DisplaySlot::TournamentCount), Some("0"));
        assert!(s.notifications.current().is_none());
    }

    #[tokio::test]
    async fn failed_fetch_after_tracked_download_keeps_count() {
        let state = PageState::shared(&PageLayout::default(), Duration::from_secs(5));
        lock_state(&state).slots.apply_download_count(1235);

        let source = sync_stats(&FixedStats(None), &state).await;

        assert_eq!(source, StatsSource::Fallback);
        let s = lock_state(&state);
        assert_eq!(s.slots.text(DisplaySlot::DownloadCount), Some("1,235"));
        assert_eq!(s.slots.text(DisplaySlot::CardDownloadCount), Some("1,235"));
        assert_eq!(s.slots.text(DisplaySlot::TournamentCount), Some("0"));
    }
}
