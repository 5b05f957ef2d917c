//! HTTP client for the NeoWs feed endpoint.
//!
//! One call to [`FeedClient::fetch`] issues exactly one GET. There is no
//! caching, retry, or backoff; a failure is returned to the caller as is.

use std::time::Duration;

use neowatch_config::FeedConfig;
use tracing::{debug, info};

use crate::date::FeedRequest;
use crate::error::{FeedError, FetchError};
use crate::normalize::{FeedBatch, normalize_feed};

/// Path of the feed endpoint relative to the base URL.
pub const FEED_PATH: &str = "/neo/rest/v1/feed";

/// Client for the near-earth-object feed.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct FeedClient {
    agent: ureq::Agent,
    base_url: String,
    api_key: String,
}

impl FeedClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            agent,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    pub fn from_config(config: &FeedConfig) -> Self {
        Self::new(
            config.base_url.clone(),
            config.api_key.clone(),
            Duration::from_secs(u64::from(config.timeout_seconds)),
        )
    }

    /// Full endpoint URL, without query parameters.
    pub fn feed_url(&self) -> String {
        format!("{}{}", self.base_url, FEED_PATH)
    }

    /// Validate `date` and fetch its records.
    ///
    /// Validation failures return before any request is made.
    pub async fn submit(&self, date: &str) -> Result<FeedBatch, FeedError> {
        let request = FeedRequest::single(date)?;
        Ok(self.fetch(&request).await?)
    }

    /// Fetch and normalize the records for `request`.
    ///
    /// The blocking HTTP call runs on tokio's blocking pool so the caller's
    /// runtime thread stays free.
    pub async fn fetch(&self, request: &FeedRequest) -> Result<FeedBatch, FetchError> {
        let agent = self.agent.clone();
        let url = self.feed_url();
        let start = request.start().to_string();
        let end = request.end().to_string();
        let api_key = self.api_key.clone();

        debug!(%url, %start, %end, "requesting feed");
        let body = tokio::task::spawn_blocking(move || {
            get_feed_body(&agent, &url, &start, &end, &api_key)
        })
        .await
        .map_err(|e| FetchError::TaskJoin(e.to_string()))??;

        let batch = normalize_feed(&body)?;
        info!(
            date = batch.date.as_deref().unwrap_or("-"),
            records = batch.records.len(),
            skipped = batch.skipped.len(),
            "feed batch received"
        );
        Ok(batch)
    }
}

fn get_feed_body(
    agent: &ureq::Agent,
    url: &str,
    start: &str,
    end: &str,
    api_key: &str,
) -> Result<String, FetchError> {
    let response = agent
        .get(url)
        .query("start_date", start)
        .query("end_date", end)
        .query("api_key", api_key)
        .call()
        .map_err(|e| match e {
            ureq::Error::Status(code, response) => FetchError::Status {
                code,
                text: response.status_text().to_string(),
            },
            ureq::Error::Transport(transport) => FetchError::Transport(transport.to_string()),
        })?;

    response
        .into_string()
        .map_err(|e| FetchError::Transport(e.to_string()))
}
