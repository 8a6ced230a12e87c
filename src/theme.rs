//! Centralized theme constants for the Epic Esports landing page
//! All colors, sizes, and styling should reference these constants

use crate::notifications::Severity;
use egui::Color32;

// =============================================================================
// COLORS - Backgrounds
// =============================================================================
pub const BG_BASE: Color32 = Color32::from_rgb(0x0b, 0x0b, 0x12); // night
pub const BG_ELEVATED: Color32 = Color32::from_rgb(0x16, 0x16, 0x22);

// =============================================================================
// COLORS - Accent (Orange)
// =============================================================================
pub const ACCENT: Color32 = Color32::from_rgb(0xff, 0xa5, 0x00); // brand orange
pub const ACCENT_TEXT: Color32 = Color32::from_rgb(0x1a, 0x10, 0x00); // text on orange

// =============================================================================
// COLORS - Text
// =============================================================================
pub const TEXT_PRIMARY: Color32 = Color32::WHITE;
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(0xe4, 0xe4, 0xe7);
pub const TEXT_MUTED: Color32 = Color32::from_rgb(0xa1, 0xa1, 0xaa);

// =============================================================================
// COLORS - Borders
// =============================================================================
pub const BORDER_SUBTLE: Color32 = Color32::from_rgb(0x2a, 0x2a, 0x38);

// =============================================================================
// COLORS - Notifications
// =============================================================================
pub const NOTIFY_SUCCESS: Color32 = Color32::from_rgb(0x4c, 0xaf, 0x50); // green
pub const NOTIFY_INFO: Color32 = Color32::from_rgb(0x21, 0x96, 0xf3); // blue
pub const NOTIFY_ERROR: Color32 = Color32::from_rgb(0xf4, 0x43, 0x36); // red

pub fn severity_color(severity: Severity) -> Color32 {
    match severity {
        Severity::Success => NOTIFY_SUCCESS,
        Severity::Info => NOTIFY_INFO,
        Severity::Error => NOTIFY_ERROR,
    }
}

// =============================================================================
// TYPOGRAPHY - Font Sizes
// =============================================================================
pub const FONT_HERO: f32 = 40.0;
pub const FONT_STAT: f32 = 32.0;
pub const FONT_HEADING: f32 = 18.0;
pub const FONT_BODY: f32 = 14.0;
pub const FONT_LABEL: f32 = 13.0;

// =============================================================================
// SIZES
// =============================================================================
pub const STAT_CARD_WIDTH: f32 = 220.0;
pub const NOTIFICATION_MAX_WIDTH: f32 = 300.0;
pub const BUTTON_HEIGHT_LARGE: f32 = 44.0;

pub const RADIUS_DEFAULT: f32 = 4.0;
pub const RADIUS_LARGE: f32 = 10.0;

pub const STROKE_DEFAULT: f32 = 1.0;

pub const SPACING_SM: f32 = 4.0;
pub const SPACING_MD: f32 = 8.0;
pub const SPACING_LG: f32 = 16.0;
pub const SPACING_XL: f32 = 32.0;

// =============================================================================
// HELPER - Apply global visuals
// =============================================================================
pub fn apply_visuals(ctx: &egui::Context) {
    ctx.set_visuals(egui::Visuals {
        dark_mode: true,
        panel_fill: BG_BASE,
        window_fill: BG_ELEVATED,
        extreme_bg_color: BG_BASE,
        faint_bg_color: BG_ELEVATED,
        hyperlink_color: ACCENT,
        interact_cursor: Some(egui::CursorIcon::PointingHand),
        window_stroke: egui::Stroke::new(STROKE_DEFAULT, BORDER_SUBTLE),
        window_corner_radius: egui::CornerRadius::same(8),
        ..egui::Visuals::dark()
    });

    ctx.style_mut(|style| {
        style.interaction.selectable_labels = false;
        style.spacing.item_spacing = egui::vec2(SPACING_MD, 6.0);
        style.spacing.button_padding = egui::vec2(18.0, 8.0);
    });
}

// =============================================================================
// HELPER - Card frame
// =============================================================================
pub fn card_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(BG_ELEVATED)
        .stroke(egui::Stroke::new(STROKE_DEFAULT, BORDER_SUBTLE))
        .corner_radius(RADIUS_LARGE)
        .inner_margin(egui::Margin::same(SPACING_LG as i8))
}

// =============================================================================
// HELPER - Button styles
// =============================================================================

/// Accent orange button (primary call to action)
pub fn button_accent(text: impl Into<String>) -> egui::Button<'static> {
    egui::Button::new(
        egui::RichText::new(text.into())
            .size(FONT_HEADING)
            .color(ACCENT_TEXT),
    )
    .fill(ACCENT)
    .corner_radius(RADIUS_DEFAULT)
    .min_size(egui::vec2(0.0, BUTTON_HEIGHT_LARGE))
}
