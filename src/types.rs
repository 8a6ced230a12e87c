//! Common types and data structures

use crate::constants::{APP_VERSION, POINTS_UNIT};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Aggregate counters reported by the stats service
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    pub total_downloads: u64,
    /// Already formatted by the service, e.g. "56 TK"
    #[serde(rename = "totalTkEarned")]
    pub total_points_earned: String,
    pub total_tournaments: u64,
}

impl StatsSnapshot {
    /// Values shown when no fetch has succeeded
    pub fn fallback_zero() -> Self {
        Self {
            total_downloads: 0,
            total_points_earned: format!("0 {}", POINTS_UNIT),
            total_tournaments: 0,
        }
    }
}

/// Response body of `GET /api/stats`
#[derive(Debug, Deserialize)]
pub struct StatsEnvelope {
    pub success: bool,
    #[serde(default)]
    pub stats: Option<StatsSnapshot>,
}

/// Response body of `POST /api/track-download`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackDownloadResponse {
    pub success: bool,
    #[serde(default)]
    pub total_downloads: Option<u64>,
}

/// One download click, sent once to the stats service
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadEventRecord {
    pub timestamp: DateTime<Utc>,
    pub platform: String,
    pub user_agent: String,
    pub language: String,
    pub referrer: String,
}

impl DownloadEventRecord {
    /// Build a record from the running environment
    pub fn capture(timestamp: DateTime<Utc>) -> Self {
        let language = std::env::var("LANG")
            .ok()
            .and_then(|lang| lang.split('.').next().map(|l| l.replace('_', "-")))
            .filter(|l| !l.is_empty() && l != "C" && l != "POSIX")
            .unwrap_or_else(|| "en-US".to_string());

        Self {
            timestamp,
            platform: std::env::consts::OS.to_string(),
            user_agent: format!(
                "epic-esports-landing/{} ({}; {})",
                APP_VERSION,
                std::env::consts::OS,
                std::env::consts::ARCH
            ),
            language,
            // Desktop shell has no referring page
            referrer: String::new(),
        }
    }
}
