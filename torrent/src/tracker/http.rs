use std::time::Duration;

use super::{AnnounceRequest, QueryMode, Result, TrackerResponse};

pub struct HttpTracker {

    client: reqwest::Client,

    query_mode: QueryMode,

    id: Option<String>,

    interval: Option<Duration>,

    min_interval: Option<Duration>,

}

impl HttpTracker {

    pub fn new(client: reqwest::Client, query_mode: QueryMode) -> Self {
        Self {
            client,
            query_mode,
            id: None,
            interval: None,
            min_interval: None,
        }
    }

    pub async fn announce(&mut self, req: &AnnounceRequest) -> Result<TrackerResponse> {
        let url = req.url(self.query_mode);
        tracing::info!("announcing to {}", req.announce());

        let raw_resp = self.client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        let resp = TrackerResponse::from_bytes(&raw_resp)?;

        if let Some(interval) = resp.interval {
            self.interval = Some(Duration::from_secs(interval));
        }
        if let Some(min_interval) = resp.min_interval {
            self.min_interval = Some(Duration::from_secs(min_interval));
        }
        if let Some(tracker_id) = &resp.tracker_id {
            self.id = Some(tracker_id.clone());
        }

        tracing::info!("tracker returned {} peers", resp.peers.len());
        Ok(resp)
    }

    pub fn tracker_id(&self) -> Option<&str> { self.id.as_deref() }

    pub fn interval(&self) -> Option<Duration> { self.interval }

    pub fn min_interval(&self) -> Option<Duration> { self.min_interval }
}
