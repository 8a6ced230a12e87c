//! Reusable UI components
//!
//! Stat cards and the notification banner. Components only read values; all
//! state changes go back through the caller.

use crate::constants::{COUNT_UP_DURATION, POINTS_UNIT};
use crate::display::{count_up_value, DisplaySlot, SlotFormat, SlotValue};
use crate::notifications::Notification;
use crate::theme;
use crate::utils::format_count;
use eframe::egui;
use std::time::{Duration, Instant};

const SLIDE_IN: Duration = Duration::from_millis(300);

/// Text for a slot `elapsed` into its count-up (`None` = not on screen yet).
///
/// Once the animation has finished the slot text is shown verbatim.
pub fn count_up_text(slot: DisplaySlot, value: &SlotValue, elapsed: Option<Duration>) -> String {
    let Some(target) = value.target else {
        return value.text.clone();
    };
    let elapsed = elapsed.unwrap_or(Duration::ZERO);
    if elapsed >= COUNT_UP_DURATION {
        return value.text.clone();
    }
    let current = format_count(count_up_value(target, elapsed, COUNT_UP_DURATION));
    match slot.format() {
        SlotFormat::Grouped => current,
        SlotFormat::PassThrough => format!("{} {}", current, POINTS_UNIT),
    }
}

/// Big number with a caption underneath. Returns the card's response so the
/// caller can tell whether it is on screen.
pub fn stat_card(ui: &mut egui::Ui, label: &str, text: &str) -> egui::Response {
    theme::card_frame()
        .show(ui, |ui| {
            ui.set_width(theme::STAT_CARD_WIDTH);
            ui.vertical_centered(|ui| {
                ui.label(
                    egui::RichText::new(text)
                        .size(theme::FONT_STAT)
                        .strong()
                        .color(theme::ACCENT),
                );
                ui.label(
                    egui::RichText::new(label)
                        .size(theme::FONT_LABEL)
                        .color(theme::TEXT_MUTED),
                );
            });
        })
        .response
}

/// Fixed top-right banner for the live notification. Returns true when the
/// close button was clicked.
pub fn notification_banner(ctx: &egui::Context, notification: &Notification, now: Instant) -> bool {
    let age = now.saturating_duration_since(notification.created_at);
    let slide = (age.as_secs_f32() / SLIDE_IN.as_secs_f32()).min(1.0);
    let offset = (1.0 - slide) * theme::NOTIFICATION_MAX_WIDTH;
    if slide < 1.0 {
        ctx.request_repaint();
    }

    let screen = ctx.screen_rect();
    let pos = egui::pos2(screen.right() - 20.0 + offset, screen.top() + 20.0);
    let mut closed = false;

    egui::Area::new(egui::Id::new(("notification", notification.id)))
        .order(egui::Order::Foreground)
        .fixed_pos(pos)
        .pivot(egui::Align2::RIGHT_TOP)
        .show(ctx, |ui| {
            egui::Frame::new()
                .fill(theme::severity_color(notification.severity))
                .corner_radius(theme::RADIUS_DEFAULT)
                .shadow(egui::epaint::Shadow {
                    offset: [0, 2],
                    blur: 10,
                    spread: 0,
                    color: egui::Color32::from_black_alpha(50),
                })
                .inner_margin(egui::Margin::symmetric(20, 12))
                .show(ui, |ui| {
                    ui.set_max_width(theme::NOTIFICATION_MAX_WIDTH);
                    ui.horizontal(|ui| {
                        ui.label(
                            egui::RichText::new(&notification.message)
                                .size(theme::FONT_BODY)
                                .color(theme::TEXT_PRIMARY),
                        );
                        ui.add_space(theme::SPACING_MD);
                        let close = ui.add(
                            egui::Button::new(
                                egui::RichText::new(egui_phosphor::regular::X)
                                    .size(theme::FONT_HEADING)
                                    .color(theme::TEXT_PRIMARY),
                            )
                            .frame(false),
                        );
                        if close.clicked() {
                            closed = true;
                        }
                    });
                });
        });

    closed
}
