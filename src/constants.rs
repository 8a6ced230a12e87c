//! Application constants and configuration defaults

use std::time::Duration;

pub const APP_NAME: &str = "Epic Esports Landing";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Stats service host used when settings.json does not override it
pub const DEFAULT_STATS_BASE_URL: &str = "https://count1.onrender.com";
pub const STATS_PATH: &str = "/api/stats";
pub const TRACK_DOWNLOAD_PATH: &str = "/api/track-download";

/// Unit label the service appends to the points total ("56 TK")
pub const POINTS_UNIT: &str = "TK";

pub const NOTIFICATION_SECS: u64 = 5;
pub const COUNT_UP_DURATION: Duration = Duration::from_millis(2000);

pub const TRACKED_MESSAGE: &str = "Download started! 🥇";
pub const UNTRACKED_MESSAGE: &str = "Download started! (Tracking failed)";
