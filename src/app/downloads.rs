//! Download button and notification banner

use super::App;
use crate::client::StatsService;
use crate::notifications::Severity;
use crate::recorder::{DownloadOutcome, DownloadRecorder};
use crate::state::{lock_state, SharedPageState};
use crate::ui::components::notification_banner;
use eframe::egui;
use std::time::Instant;
use tokio::task::JoinHandle;
use tracing::{info, warn};

const OPEN_FAILED_MESSAGE: &str = "Could not open the download link";

/// Open the APK link, then record the click whether or not the link opened
pub(crate) fn handle_download_click<S: StatsService>(
    url: &str,
    open_link: impl FnOnce(&str) -> std::io::Result<()>,
    recorder: &DownloadRecorder<S>,
    state: &SharedPageState,
    runtime: &tokio::runtime::Handle,
    ctx: &egui::Context,
) -> JoinHandle<DownloadOutcome> {
    info!(url = %url, "Opening download link");
    if let Err(e) = open_link(url) {
        warn!(error = %e, url = %url, "Failed to open download link");
        lock_state(state)
            .notifications
            .present(OPEN_FAILED_MESSAGE, Severity::Error);
    }
    recorder.on_click(runtime, ctx)
}

impl App {
    pub fn start_download(&mut self, ctx: &egui::Context) {
        // The button only exists when both are set
        let (Some(url), Some(recorder)) = (&self.settings.apk_url, &self.recorder) else {
            return;
        };
        // Detached; the result lands in the page state
        drop(handle_download_click(
            url,
            |url| open::that_detached(url),
            recorder,
            &self.state,
            self.runtime.handle(),
            ctx,
        ));
    }

    /// Expire, draw and handle the close button of the live notification
    pub fn render_notification(&mut self, ctx: &egui::Context, now: Instant) {
        let (current, remaining) = {
            let mut state = lock_state(&self.state);
            state.notifications.sweep(now);
            (
                state.notifications.current().cloned(),
                state.notifications.remaining(now),
            )
        };

        let Some(notification) = current else {
            return;
        };
        if notification_banner(ctx, &notification, now) {
            lock_state(&self.state).notifications.dismiss(notification.id);
            ctx.request_repaint();
        } else if let Some(remaining) = remaining {
            ctx.request_repaint_after(remaining);
        }
    }
}
