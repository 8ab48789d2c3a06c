//! Where the client gets its frames from.
//!
//! `FrameSource::Remote` polls a running server the way the device does;
//! `FrameSource::Offline` pushes a saved provider snapshot through the same pipeline the
//! server uses, which is handy for checking a captured payload.
use log::debug;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use ticker_common::pipeline::respond;
use ticker_common::{DisplayConfig, FrameResponse, UpstreamOutcome};

use crate::error::Result;

/// Request timeout for server polls.
const POLL_TIMEOUT: Duration = Duration::from_secs(15);

/// A supplier of frame documents.
pub enum FrameSource {
    /// A frames server reachable over HTTP.
    Remote {
        /// Blocking HTTP client.
        client: reqwest::blocking::Client,
        /// Full frames URL.
        url: String,
    },
    /// A Polygon snapshot document on disk.
    Offline {
        /// Snapshot file path.
        path: PathBuf,
        /// Pipeline configuration.
        config: DisplayConfig,
    },
}

impl FrameSource {
    /// Poll `url`.
    pub fn remote(url: &str) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(POLL_TIMEOUT)
            .build()?;
        Ok(FrameSource::Remote {
            client,
            url: url.to_string(),
        })
    }

    /// Render the snapshot at `path`.
    pub fn offline(path: PathBuf, config: DisplayConfig) -> Self {
        FrameSource::Offline { path, config }
    }

    /// Fetch or build the current frames.
    pub fn next_frames(&self) -> Result<FrameResponse> {
        match self {
            FrameSource::Remote { client, url } => {
                debug!("GET {}", url);
                let response = client.get(url).send()?;
                Ok(response.json::<FrameResponse>()?)
            }
            FrameSource::Offline { path, config } => {
                let raw = fs::read(path)?;
                Ok(render_document(&raw, config))
            }
        }
    }
}

/// Run raw snapshot bytes through the pipeline as if the provider had sent them.
pub fn render_document(raw: &[u8], config: &DisplayConfig) -> FrameResponse {
    let outcome = match serde_json::from_slice::<Value>(raw) {
        Ok(document) => UpstreamOutcome::classify_document(200, &document),
        Err(e) => UpstreamOutcome::unavailable(format!("Bad snapshot file: {}", e)),
    };
    respond(&outcome, config)
}
