//! Remote stats service client

use crate::constants::{STATS_PATH, TRACK_DOWNLOAD_PATH};
use crate::error::ServiceError;
use crate::types::*;
use std::future::Future;
use tracing::{debug, warn};

/// The two calls the landing page makes against the stats service.
///
/// Every call is a single attempt. Implementations must not retry.
pub trait StatsService: Send + Sync + 'static {
    fn fetch_stats(&self) -> impl Future<Output = Result<StatsSnapshot, ServiceError>> + Send;

    /// Returns the service's updated download total.
    fn record_download(
        &self,
        record: DownloadEventRecord,
    ) -> impl Future<Output = Result<u64, ServiceError>> + Send;
}

/// HTTP implementation backed by reqwest
#[derive(Clone)]
pub struct StatsClient {
    http: reqwest::Client,
    base_url: String,
}

impl StatsClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Reject non-2xx statuses, then read the whole body
    async fn read_body(response: reqwest::Response) -> Result<Vec<u8>, ServiceError> {
        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::Status(status.as_u16()));
        }
        Ok(response.bytes().await?.to_vec())
    }
}

impl StatsService for StatsClient {
    async fn fetch_stats(&self) -> Result<StatsSnapshot, ServiceError> {
        let url = self.endpoint(STATS_PATH);
        debug!(url = %url, "Fetching stats");

        let response = self.http.get(&url).send().await.inspect_err(|e| {
            warn!(url = %url, error = %e, "Stats request failed");
        })?;
        debug!(status = %response.status(), "Stats response received");

        let body = Self::read_body(response).await?;
        let envelope: StatsEnvelope = serde_json::from_slice(&body)?;
        if !envelope.success {
            return Err(ServiceError::Rejected { endpoint: STATS_PATH });
        }
        envelope
            .stats
            .ok_or_else(|| ServiceError::Decode("success without stats".into()))
    }

    async fn record_download(&self, record: DownloadEventRecord) -> Result<u64, ServiceError> {
        let url = self.endpoint(TRACK_DOWNLOAD_PATH);
        debug!(url = %url, timestamp = %record.timestamp, "Recording download");

        let response = self.http.post(&url).json(&record).send().await.inspect_err(|e| {
            warn!(url = %url, error = %e, "Track-download request failed");
        })?;
        debug!(status = %response.status(), "Track-download response received");

        let body = Self::read_body(response).await?;
        let parsed: TrackDownloadResponse = serde_json::from_slice(&body)?;
        if !parsed.success {
            return Err(ServiceError::Rejected {
                endpoint: TRACK_DOWNLOAD_PATH,
            });
        }
        parsed
            .total_downloads
            .ok_or_else(|| ServiceError::Decode("success without totalDownloads".into()))
    }
}
