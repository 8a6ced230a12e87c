//! Download event recording
//!
//! Each click on the download control sends exactly one record to the stats
//! service. Clicks are not debounced and overlapping calls are not ordered:
//! whichever response resolves last decides the displayed count.

use crate::client::StatsService;
use crate::constants::{TRACKED_MESSAGE, UNTRACKED_MESSAGE};
use crate::display::PageLayout;
use crate::notifications::Severity;
use crate::state::{lock_state, SharedPageState};
use crate::types::DownloadEventRecord;
use eframe::egui;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// What happened to one download click
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadOutcome {
    Tracked { total_downloads: u64 },
    Untracked,
}

pub struct DownloadRecorder<S> {
    service: Arc<S>,
    state: SharedPageState,
}

impl<S> Clone for DownloadRecorder<S> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            state: self.state.clone(),
        }
    }
}

impl<S: StatsService> DownloadRecorder<S> {
    /// Attach to the page's download control. `None` when the page has none.
    pub fn arm(service: Arc<S>, state: SharedPageState, layout: &PageLayout) -> Option<Self> {
        if !layout.download_trigger {
            debug!("No download control on page, recorder not armed");
            return None;
        }
        Some(Self { service, state })
    }

    /// Handle one click: record it in the background and return immediately.
    pub fn on_click(
        &self,
        runtime: &tokio::runtime::Handle,
        ctx: &egui::Context,
    ) -> JoinHandle<DownloadOutcome> {
        let record = DownloadEventRecord::capture(chrono::Utc::now());
        let recorder = self.clone();
        let ctx = ctx.clone();
        runtime.spawn(async move {
            let outcome = recorder.record(record).await;
            ctx.request_repaint();
            outcome
        })
    }

    /// Send one record and reflect the result on the page
    pub async fn record(&self, record: DownloadEventRecord) -> DownloadOutcome {
        match self.service.record_download(record).await {
            Ok(total_downloads) => {
                let written = {
                    let mut state = lock_state(&self.state);
                    let written = state.slots.apply_download_count(total_downloads);
                    state.notifications.present(TRACKED_MESSAGE, Severity::Success);
                    written
                };
                info!(total_downloads, slots = written, "Download tracked");
                DownloadOutcome::Tracked { total_downloads }
            }
            Err(e) => {
                warn!(kind = ?e.kind(), error = %e, "Download tracking failed");
                lock_state(&self.state)
                    .notifications
                    .present(UNTRACKED_MESSAGE, Severity::Info);
                DownloadOutcome::Untracked
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::TRACK_DOWNLOAD_PATH;
    use crate::display::DisplaySlot;
    use crate::error::ServiceError;
    use crate::notifications::NotificationId;
    use crate::state::PageState;
    use crate::types::StatsSnapshot;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    /// Replies to record calls in order, each after its own delay
    struct ScriptedService {
        replies: Mutex<VecDeque<(Duration, Option<u64>)>>,
        calls: AtomicUsize,
    }

    impl ScriptedService {
        fn new(replies: impl IntoIterator<Item = (Duration, Option<u64>)>) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(replies.into_iter().collect()),
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl StatsService for ScriptedService {
        async fn fetch_stats(&self) -> Result<StatsSnapshot, ServiceError> {
            Err(ServiceError::Status(503))
        }

        async fn record_download(&self, _record: DownloadEventRecord) -> Result<u64, ServiceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let (delay, reply) = self
                .replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or((Duration::ZERO, None));
            tokio::time::sleep(delay).await;
            reply.ok_or(ServiceError::Rejected {
                endpoint: TRACK_DOWNLOAD_PATH,
            })
        }
    }

    fn page_with_count(total: u64) -> SharedPageState {
        let state = PageState::shared(&PageLayout::default(), Duration::from_secs(5));
        lock_state(&state).slots.apply_snapshot(&StatsSnapshot {
            total_downloads: total,
            total_points_earned: "56 TK".into(),
            total_tournaments: 7,
        });
        state
    }

    fn record() -> DownloadEventRecord {
        DownloadEventRecord::capture(chrono::Utc::now())
    }

    #[test]
    fn not_armed_without_download_control() {
        let layout = PageLayout {
            download_trigger: false,
            ..PageLayout::default()
        };
        let state = PageState::shared(&layout, Duration::from_secs(5));
        assert!(DownloadRecorder::arm(ScriptedService::new([]), state, &layout).is_none());
    }

    #[tokio::test]
    async fn success_updates_download_slots_and_notifies() {
        let service = ScriptedService::new([(Duration::ZERO, Some(1235))]);
        let state = page_with_count(1234);
        let recorder = DownloadRecorder::arm(service.clone(), state.clone(), &PageLayout::default()).unwrap();

        let outcome = recorder.record(record()).await;

        assert_eq!(outcome, DownloadOutcome::Tracked { total_downloads: 1235 });
        assert_eq!(service.calls(), 1);
        let s = lock_state(&state);
        assert_eq!(s.slots.text(DisplaySlot::DownloadCount), Some("1,235"));
        assert_eq!(s.slots.text(DisplaySlot::CardDownloadCount), Some("1,235"));
        assert_eq!(s.slots.text(DisplaySlot::TkEarned), Some("56 TK"));
        let n = s.notifications.current().unwrap();
        assert_eq!(n.id, NotificationId(1));
        assert_eq!(n.severity, Severity::Success);
        assert_eq!(n.message, TRACKED_MESSAGE);
    }

    #[tokio::test]
    async fn failure_informs_and_keeps_count() {
        let service = ScriptedService::new([(Duration::ZERO, None)]);
        let state = page_with_count(1234);
        let recorder = DownloadRecorder::arm(service.clone(), state.clone(), &PageLayout::default()).unwrap();

        let outcome = recorder.record(record()).await;

        assert_eq!(outcome, DownloadOutcome::Untracked);
        let s = lock_state(&state);
        assert_eq!(s.slots.text(DisplaySlot::DownloadCount), Some("1,234"));
        assert_eq!(s.slots.text(DisplaySlot::CardDownloadCount), Some("1,234"));
        let n = s.notifications.current().unwrap();
        assert_eq!(n.id, NotificationId(1));
        assert_eq!(n.severity, Severity::Info);
        assert_eq!(n.message, UNTRACKED_MESSAGE);
    }

    #[tokio::test]
    async fn each_click_sends_its_own_record() {
        let service = ScriptedService::new([
            (Duration::ZERO, Some(10)),
            (Duration::ZERO, Some(11)),
            (Duration::ZERO, Some(12)),
        ]);
        let state = page_with_count(9);
        let recorder = DownloadRecorder::arm(service.clone(), state.clone(), &PageLayout::default()).unwrap();
        let ctx = egui::Context::default();
        let handle = tokio::runtime::Handle::current();

        let clicks: Vec<_> = (0..3).map(|_| recorder.on_click(&handle, &ctx)).collect();
        let outcomes = futures::future::join_all(clicks).await;

        assert_eq!(service.calls(), 3);
        assert!(outcomes
            .into_iter()
            .all(|o| matches!(o, Ok(DownloadOutcome::Tracked { .. }))));
    }

    #[tokio::test(start_paused = true)]
    async fn overlapping_clicks_last_response_wins() {
        // First click answers slowly, second answers quickly
        let service = ScriptedService::new([
            (Duration::from_millis(300), Some(1235)),
            (Duration::from_millis(100), Some(1236)),
        ]);
        let state = page_with_count(1234);
        let recorder = DownloadRecorder::arm(service.clone(), state.clone(), &PageLayout::default()).unwrap();
        let ctx = egui::Context::default();
        let handle = tokio::runtime::Handle::current();

        let first = recorder.on_click(&handle, &ctx);
        let second = recorder.on_click(&handle, &ctx);

        assert_eq!(
            second.await.unwrap(),
            DownloadOutcome::Tracked { total_downloads: 1236 }
        );
        assert_eq!(
            lock_state(&state).slots.text(DisplaySlot::DownloadCount),
            Some("1,236")
        );

        assert_eq!(
            first.await.unwrap(),
            DownloadOutcome::Tracked { total_downloads: 1235 }
        );
        assert_eq!(service.calls(), 2);
        let s = lock_state(&state);
        assert_eq!(s.slots.text(DisplaySlot::DownloadCount), Some("1,235"));
        assert_eq!(s.notifications.current().unwrap().id, NotificationId(2));
    }
}
