//! Utility functions

use crate::constants::APP_NAME;
use std::path::PathBuf;

// Medal mark, square viewBox, for window/taskbar icons
pub const ICON_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 64 64"><path fill="#ff6b3d" d="M14 2h14l6 18h-14z"/><path fill="#ffa500" d="M50 2H36l-6 18h14z"/><circle cx="32" cy="40" r="20" fill="#ffa500" stroke="#09090b" stroke-width="2"/><circle cx="32" cy="40" r="13" fill="#ffd166"/><path fill="#09090b" d="M29 33h5v14h-5z"/></svg>"##;

/// Rasterize the icon SVG to a square RGBA image.
pub fn rasterize_icon(size: u32) -> Option<(Vec<u8>, u32, u32)> {
    let tree = resvg::usvg::Tree::from_str(ICON_SVG, &resvg::usvg::Options::default()).ok()?;
    let scale = size as f32 / tree.size().width();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size, size)?;
    resvg::render(
        &tree,
        resvg::usvg::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    Some((premul_to_straight(&pixmap), size, size))
}

fn premul_to_straight(pixmap: &resvg::tiny_skia::Pixmap) -> Vec<u8> {
    pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let a = p.alpha();
            if a == 0 {
                [0, 0, 0, 0]
            } else {
                let r = (p.red() as u16 * 255 / a as u16) as u8;
                let g = (p.green() as u16 * 255 / a as u16) as u8;
                let b = (p.blue() as u16 * 255 / a as u16) as u8;
                [r, g, b, a]
            }
        })
        .collect()
}

/// Get the app data directory (settings, logs)
pub fn get_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Format an integer with `,` thousands separators (1234 -> "1,234")
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Strip a trailing " <unit>" label, e.g. "56 TK" -> "56"
pub fn strip_unit<'a>(value: &'a str, unit: &str) -> &'a str {
    let trimmed = value.trim();
    trimmed
        .strip_suffix(unit)
        .map(str::trim_end)
        .unwrap_or(trimmed)
}
