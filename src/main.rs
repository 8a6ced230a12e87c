#![windows_subsystem = "windows"]
//! Epic Esports Landing - Main entry point

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

mod app;
mod client;
mod constants;
mod display;
mod error;
mod notifications;
mod recorder;
mod settings;
mod state;
mod theme;
mod types;
mod ui;
mod utils;

use app::App;
use constants::*;
use display::DisplaySlot;
use eframe::egui;
use std::time::Instant;
use tracing::{error, info};
use utils::get_data_dir;

/// Initialize file logging. Returns a guard that must be held for the app lifetime.
fn init_logging(data_dir: &std::path::Path) -> tracing_appender::non_blocking::WorkerGuard {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let logs_dir = data_dir.join("logs");
    std::fs::create_dir_all(&logs_dir).ok();

    let file_appender = tracing_appender::rolling::daily(&logs_dir, "epic-esports-landing.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,epic_esports_landing=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    guard
}

fn main() -> eframe::Result<()> {
    let data_dir = get_data_dir();
    std::fs::create_dir_all(&data_dir).ok();

    // Initialize logging - guard must live for entire app lifetime
    let _log_guard = init_logging(&data_dir);

    info!(version = APP_VERSION, "Epic Esports Landing starting");

    let settings = settings::Settings::load(&data_dir);

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            error!(error = %e, "Failed to start async runtime");
            return Err(eframe::Error::AppCreation(Box::new(e)));
        }
    };

    let win_pos = match (settings.window_x, settings.window_y) {
        (Some(x), Some(y)) => Some(egui::pos2(x, y)),
        _ => None,
    };
    let win_size = match (settings.window_w, settings.window_h) {
        (Some(w), Some(h)) => Some(egui::vec2(w, h)),
        _ => None,
    };

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size(win_size.unwrap_or(egui::vec2(1100.0, 720.0)))
        .with_min_inner_size([760.0, 560.0])
        .with_title(APP_NAME);

    if let Some((rgba, width, height)) = utils::rasterize_icon(64) {
        let icon = egui::IconData { rgba, width, height };
        viewport = viewport.with_icon(std::sync::Arc::new(icon));
    }

    let needs_center = win_pos.is_none();

    if let Some(pos) = win_pos {
        viewport = viewport.with_position(pos);
    }

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        APP_NAME,
        options,
        Box::new(move |cc| {
            let mut app = App::new(cc, settings, data_dir, runtime);
            app.needs_center = needs_center;
            Ok(Box::new(app))
        }),
    )
}

// ============================================================================
// MAIN UPDATE LOOP & UI RENDERING
// ============================================================================

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Track window position/size for saving on exit
        ctx.input(|i| {
            if let Some(rect) = i.viewport().outer_rect {
                self.window_pos = Some(rect.min);
            }
            if let Some(rect) = i.viewport().inner_rect {
                self.window_size = Some(rect.size());
            }
        });

        // Center window on first launch
        if self.needs_center {
            self.needs_center = false;
            if let Some(cmd) = egui::ViewportCommand::center_on_screen(ctx) {
                ctx.send_viewport_cmd(cmd);
            }
        }

        // Page ready: fetch stats once
        self.request_initial_stats(ctx);

        let now = Instant::now();

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(theme::SPACING_XL);
                        self.render_hero(ui);
                        ui.add_space(theme::SPACING_XL);
                        self.render_stats_row(ui, now);
                        ui.add_space(theme::SPACING_XL);
                        self.render_download_card(ui, ctx, now);
                        ui.add_space(theme::SPACING_XL);
                    });
                });
        });

        self.render_notification(ctx, now);

        if self.counting_up(now) {
            ctx.request_repaint();
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("Application shutting down");
        self.save_settings();
    }
}

// ============================================================================
// PAGE SECTIONS
// ============================================================================

impl App {
    fn render_hero(&mut self, ui: &mut egui::Ui) {
        ui.label(
            egui::RichText::new(format!("{}  Epic Esports", egui_phosphor::regular::TROPHY))
                .size(theme::FONT_HERO)
                .strong()
                .color(theme::TEXT_PRIMARY),
        );
        ui.add_space(theme::SPACING_SM);
        ui.label(
            egui::RichText::new("Join tournaments, climb the ladder and earn TK on every win.")
                .size(theme::FONT_HEADING)
                .color(theme::TEXT_SECONDARY),
        );
    }

    fn render_stats_row(&mut self, ui: &mut egui::Ui, now: Instant) {
        let row = [
            DisplaySlot::DownloadCount,
            DisplaySlot::TkEarned,
            DisplaySlot::TournamentCount,
        ];
        ui.horizontal_wrapped(|ui| {
            ui.spacing_mut().item_spacing.x = theme::SPACING_LG;
            for slot in row {
                self.render_slot(ui, slot, now);
            }
        });
    }

    fn render_download_card(&mut self, ui: &mut egui::Ui, ctx: &egui::Context, now: Instant) {
        if !self.layout.download_trigger
            && !self.layout.slots.contains(&DisplaySlot::CardDownloadCount)
        {
            return;
        }

        theme::card_frame().show(ui, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(
                    egui::RichText::new("Get the app")
                        .size(theme::FONT_HEADING)
                        .strong()
                        .color(theme::TEXT_PRIMARY),
                );
                ui.label(
                    egui::RichText::new("Android APK · free")
                        .size(theme::FONT_LABEL)
                        .color(theme::TEXT_MUTED),
                );
                ui.add_space(theme::SPACING_MD);
                self.render_slot(ui, DisplaySlot::CardDownloadCount, now);

                if self.layout.download_trigger {
                    ui.add_space(theme::SPACING_LG);
                    let label = format!("{}  Download Now", egui_phosphor::regular::DOWNLOAD_SIMPLE);
                    if ui.add(theme::button_accent(label)).clicked() {
                        self.start_download(ctx);
                    }
                }
            });
        });
    }
}
