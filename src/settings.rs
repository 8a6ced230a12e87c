//! User settings stored as settings.json in the app data directory

use crate::constants::{DEFAULT_STATS_BASE_URL, NOTIFICATION_SECS};
use crate::display::PageLayout;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Window geometry
    pub window_x: Option<f32>,
    pub window_y: Option<f32>,
    pub window_w: Option<f32>,
    pub window_h: Option<f32>,

    // Stats service
    pub stats_base_url: String,

    // Where the download button sends the user
    pub apk_url: Option<String>,

    pub notification_secs: u64,

    pub layout: PageLayout,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_x: None,
            window_y: None,
            window_w: None,
            window_h: None,
            stats_base_url: DEFAULT_STATS_BASE_URL.to_string(),
            apk_url: None,
            notification_secs: NOTIFICATION_SECS,
            layout: PageLayout::default(),
        }
    }
}

impl Settings {
    pub fn load(data_dir: &Path) -> Self {
        let path = data_dir.join("settings.json");
        match std::fs::read_to_string(&path) {
            Ok(s) => match serde_json::from_str(&s) {
                Ok(settings) => {
                    debug!(path = %path.display(), "Settings loaded");
                    settings
                }
                Err(e) => {
                    warn!(error = %e, "Failed to parse settings, using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                debug!("No settings file found, using defaults");
                Self::default()
            }
        }
    }

    pub fn save(&self, data_dir: &Path) {
        let path = data_dir.join("settings.json");
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&path, json) {
                    warn!(error = %e, "Failed to save settings");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialize settings"),
        }
    }

    pub fn notification_ttl(&self) -> Duration {
        Duration::from_secs(self.notification_secs)
    }

    /// Layout the page is built from. The download control needs a link to
    /// open, so it is dropped while `apk_url` is unset.
    pub fn page_layout(&self) -> PageLayout {
        PageLayout {
            download_trigger: self.layout.download_trigger && self.apk_url.is_some(),
            ..self.layout.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::DisplaySlot;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(dir.path());
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.stats_base_url, DEFAULT_STATS_BASE_URL);
        assert_eq!(settings.notification_ttl(), Duration::from_secs(5));
    }

    #[test]
    fn malformed_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("settings.json"), "{ not json").unwrap();
        assert_eq!(Settings::load(dir.path()), Settings::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("settings.json"),
            r#"{"stats_base_url":"http://127.0.0.1:9000","layout":{"slots":["tournamentCount"]}}"#,
        )
        .unwrap();
        let settings = Settings::load(dir.path());
        assert_eq!(settings.stats_base_url, "http://127.0.0.1:9000");
        assert_eq!(settings.layout.slots, vec![DisplaySlot::TournamentCount]);
        assert!(settings.layout.download_trigger);
        assert_eq!(settings.notification_secs, NOTIFICATION_SECS);
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings {
            window_w: Some(1280.0),
            window_h: Some(800.0),
            apk_url: Some("https://example.com/app.apk".into()),
            ..Settings::default()
        };
        settings.save(dir.path());
        assert_eq!(Settings::load(dir.path()), settings);
    }

    #[test]
    fn download_control_needs_a_link() {
        let settings = Settings::default();
        assert!(settings.layout.download_trigger);
        assert!(!settings.page_layout().download_trigger);
        assert_eq!(settings.page_layout().slots, settings.layout.slots);

        let settings = Settings {
            apk_url: Some("https://example.com/app.apk".into()),
            ..Settings::default()
        };
        assert!(settings.page_layout().download_trigger);

        let settings = Settings {
            apk_url: Some("https://example.com/app.apk".into()),
            layout: PageLayout {
                download_trigger: false,
                ..PageLayout::default()
            },
            ..Settings::default()
        };
        assert!(!settings.page_layout().download_trigger);
    }
}
