//! App module - contains the main application state and logic

mod downloads;
mod stats;

use crate::client::StatsClient;
use crate::display::PageLayout;
use crate::recorder::DownloadRecorder;
use crate::settings::Settings;
use crate::state::{PageState, SharedPageState};
use crate::theme;
use eframe::egui;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

// ============================================================================
// APP STATE
// ============================================================================

pub struct App {
    pub(crate) runtime: tokio::runtime::Runtime,
    pub(crate) service: Arc<StatsClient>,
    // Written by background tasks, read every frame
    pub(crate) state: SharedPageState,
    // None when the page has no download control
    pub(crate) recorder: Option<DownloadRecorder<StatsClient>>,
    pub(crate) settings: Settings,
    // What the page shows, derived from settings at startup
    pub(crate) layout: PageLayout,
    pub(crate) data_dir: PathBuf,
    pub(crate) stats_requested: bool,
    pub(crate) count_up: stats::CountUpClocks,
    pub(crate) window_pos: Option<egui::Pos2>,
    pub(crate) window_size: Option<egui::Vec2>,
    pub(crate) needs_center: bool,
}

// ============================================================================
// APP INITIALIZATION & HELPERS
// ============================================================================

impl App {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings: Settings,
        data_dir: PathBuf,
        runtime: tokio::runtime::Runtime,
    ) -> Self {
        // Force dark theme
        cc.egui_ctx.set_theme(egui::Theme::Dark);

        // Phosphor icons for buttons
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        theme::apply_visuals(&cc.egui_ctx);

        let layout = settings.page_layout();
        if settings.layout.download_trigger && !layout.download_trigger {
            warn!("No apk_url configured, hiding the download button");
        }

        let service = Arc::new(StatsClient::new(settings.stats_base_url.clone()));
        let state = PageState::shared(&layout, settings.notification_ttl());
        let recorder = DownloadRecorder::arm(service.clone(), state.clone(), &layout);

        info!(
            base_url = %service.base_url(),
            slots = layout.slots.len(),
            recorder_armed = recorder.is_some(),
            "Landing page initialized"
        );

        Self {
            runtime,
            service,
            state,
            recorder,
            settings,
            layout,
            data_dir,
            stats_requested: false,
            count_up: stats::CountUpClocks::default(),
            window_pos: None,
            window_size: None,
            needs_center: false,
        }
    }

    pub fn save_settings(&self) {
        let settings = Settings {
            window_x: self.window_pos.map(|p| p.x),
            window_y: self.window_pos.map(|p| p.y),
            window_w: self.window_size.map(|s| s.x),
            window_h: self.window_size.map(|s| s.y),
            ..self.settings.clone()
        };
        settings.save(&self.data_dir);
    }
}
