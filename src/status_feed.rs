// Fetching the service-status feed: live MTA endpoint first, bundled sample
// file second. One attempt per tier per request, nothing is cached.

use std::path::PathBuf;

use tracing::{error, info, warn};

use crate::errors::FeedError;
use crate::feed_tree::FeedNode;
use crate::settings::Settings;
use crate::status_models::{normalize_service_status, Source, StatusReport};

const API_KEY_HEADER: &str = "x-api-key";

#[derive(Debug, Clone)]
pub struct StatusFetcher {
    client: reqwest::Client,
    service_status_url: String,
    api_key: Option<String>,
    sample_status_path: PathBuf,
}

impl StatusFetcher {
    pub fn new(settings: &Settings) -> Result<Self, FeedError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(FeedError::ClientBuild)?;

        Ok(StatusFetcher {
            client,
            service_status_url: settings.service_status_url.clone(),
            api_key: settings.api_key().map(str::to_string),
            sample_status_path: settings.sample_status_path.clone(),
        })
    }

    /// Live feed, falling back to the sample file. The error returned is the
    /// sample path's, the live failure is only logged.
    pub async fn load_status(&self) -> Result<StatusReport, FeedError> {
        match self.fetch_live_status().await {
            Ok(report) => Ok(report),
            Err(e) => {
                warn!("⚠️  Falling back to sample service status: {}", e);
                self.fetch_sample_status().await.inspect_err(|e| {
                    error!("❌ Sample data failed: {}", e);
                })
            }
        }
    }

    pub async fn fetch_live_status(&self) -> Result<StatusReport, FeedError> {
        let mut request = self.client.get(&self.service_status_url);
        if let Some(api_key) = &self.api_key {
            request = request.header(API_KEY_HEADER, api_key);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(FeedError::UpstreamHttp(response.status()));
        }

        let xml = response.text().await?;
        let report = parse_status(&xml, Source::Live)?;
        info!("📡 Live status loaded: {} lines", report.lines.len());
        Ok(report)
    }

    pub async fn fetch_sample_status(&self) -> Result<StatusReport, FeedError> {
        let xml = tokio::fs::read_to_string(&self.sample_status_path)
            .await
            .map_err(|source| FeedError::SampleFile {
                path: self.sample_status_path.clone(),
                source,
            })?;

        let report = parse_status(&xml, Source::Sample)?;
        info!("📁 Sample status loaded: {} lines", report.lines.len());
        Ok(report)
    }
}

fn parse_status(xml: &str, source: Source) -> Result<StatusReport, FeedError> {
    let tree = FeedNode::parse_document(xml)?;
    Ok(normalize_service_status(&tree, source))
}
