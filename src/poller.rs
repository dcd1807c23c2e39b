use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time;
use tracing::{debug, error};

use crate::errors::ClientFetchError;
use crate::render::{render_status, StatusBoard};
use crate::status_models::StatusReport;

pub const POLL_INTERVAL: Duration = Duration::from_secs(90);

/// Keeps a status board in sync with the `/api/status` endpoint.
pub struct StatusPoller {
    client: reqwest::Client,
    endpoint: String,
}

impl StatusPoller {
    pub fn new(endpoint: impl Into<String>) -> Self {
        StatusPoller {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub async fn fetch_report(&self) -> Result<StatusReport, ClientFetchError> {
        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(ClientFetchError::Network)?;

        if !response.status().is_success() {
            return Err(ClientFetchError::Http(response.status()));
        }

        response
            .json::<StatusReport>()
            .await
            .map_err(ClientFetchError::Decode)
    }

    /// One poll cycle. Failures end up as the empty state; the refresh
    /// control is released whatever happens.
    pub async fn refresh(&self, board: &mut StatusBoard) {
        board.refresh.begin();

        match self.fetch_report().await {
            Ok(report) => {
                debug!("Status received: {} lines from {:?}", report.lines.len(), report.source);
                render_status(board, Some(&report));
            }
            Err(e) => {
                error!("❌ Failed to load status: {}", e);
                board.show_empty_state();
            }
        }

        board.refresh.finish();
    }

    /// Polls immediately, then every [`POLL_INTERVAL`] and whenever a manual
    /// refresh arrives on `manual`. Runs until the task is dropped.
    pub async fn run<F>(&self, board: &mut StatusBoard, mut manual: mpsc::Receiver<()>, mut on_render: F)
    where
        F: FnMut(&StatusBoard),
    {
        let mut interval = time::interval(POLL_INTERVAL);
        let mut manual_open = true;

        loop {
            tokio::select! {
                _ = interval.tick() => {}
                request = manual.recv(), if manual_open => {
                    if request.is_none() {
                        manual_open = false;
                        continue;
                    }
                    debug!("🔄 Manual refresh requested");
                }
            }

            self.refresh(board).await;
            on_render(board);
        }
    }
}
