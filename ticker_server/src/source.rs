//! Market-data fetch collaborator.
//!
//! `SnapshotSource` is the seam between the server and the provider: the handler asks for
//! an [`UpstreamOutcome`] and never sees transport errors. `PolygonSource` is the real
//! implementation; tests plug in canned sources.
use async_trait::async_trait;
use log::{debug, error};
use std::time::Duration;
use ticker_common::net::SNAPSHOT_PATH;
use ticker_common::{FrameError, Symbol, UpstreamOutcome};

use crate::error::Result;

/// Something that can produce a snapshot outcome for a list of symbols.
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Fetch and classify one snapshot. Never fails; failures become outcomes.
    async fn fetch(&self, symbols: &[Symbol]) -> UpstreamOutcome;
}

/// Polygon multi-ticker snapshot over HTTP.
pub struct PolygonSource {
    client: reqwest::Client,
    url: String,
    api_key: String,
}

impl PolygonSource {
    /// Build a client for `base_url` with a request timeout.
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        let base_url = base_url.trim().trim_end_matches('/');
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(FrameError::Config(format!(
                "Invalid base_url: must start with http:// or https://, got: '{}'",
                base_url
            ))
            .into());
        }
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: format!("{}{}", base_url, SNAPSHOT_PATH),
            api_key: api_key.to_string(),
        })
    }

    async fn request(&self, symbols: &[Symbol]) -> reqwest::Result<(u16, Vec<u8>)> {
        let tickers = symbols
            .iter()
            .map(Symbol::as_str)
            .collect::<Vec<_>>()
            .join(",");
        debug!("Fetching snapshot for {} from {}", tickers, self.url);
        let response = self
            .client
            .get(&self.url)
            .query(&[("tickers", tickers.as_str()), ("apiKey", self.api_key.as_str())])
            .send()
            .await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();
        Ok((status, body))
    }
}

#[async_trait]
impl SnapshotSource for PolygonSource {
    async fn fetch(&self, symbols: &[Symbol]) -> UpstreamOutcome {
        match self.request(symbols).await {
            Ok((status, body)) => UpstreamOutcome::classify(status, &body),
            // The URL carries the API key; keep it out of logs.
            Err(e) if e.is_timeout() => {
                error!("Snapshot request timed out: {}", e.without_url());
                UpstreamOutcome::unavailable("Upstream timeout")
            }
            Err(e) => {
                error!("Snapshot request failed: {}", e.without_url());
                UpstreamOutcome::Unavailable { message: None }
            }
        }
    }
}
