//! Command-line arguments for the ticker client.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use ticker_common::net::{DEFAULT_CLIENT_HOST, HTTP_PORT, frames_url};

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Frames endpoint to poll.
    #[clap(long, default_value_t = frames_url(DEFAULT_CLIENT_HOST, HTTP_PORT))]
    pub url: String,

    /// Render a saved Polygon snapshot file locally instead of polling a server.
    #[clap(long)]
    pub snapshot: Option<PathBuf>,

    /// Symbols to render in offline mode, comma separated.
    #[clap(long)]
    pub symbols: Option<String>,

    /// Character budget used in offline mode.
    #[clap(long, default_value_t = 25)]
    pub max_text_length: usize,

    /// Seconds between polls.
    #[clap(long, default_value_t = 60)]
    pub interval_secs: u64,

    /// Milliseconds each frame stays on screen.
    #[clap(long, default_value_t = 2000)]
    pub dwell_ms: u64,

    /// Show one rotation and exit.
    #[clap(long)]
    pub once: bool,
}

impl Args {
    /// Delay between polls.
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    /// Time a single frame is shown.
    pub fn dwell(&self) -> Duration {
        Duration::from_millis(self.dwell_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_poll_local_server() {
        let args = Args::try_parse_from(["ticker_client"]).unwrap();
        assert_eq!(args.url, "http://127.0.0.1:8080/frames");
        assert!(args.snapshot.is_none());
        assert_eq!(args.interval(), Duration::from_secs(60));
        assert_eq!(args.dwell(), Duration::from_millis(2000));
    }

    #[test]
    fn offline_flags() {
        let args = Args::try_parse_from([
            "ticker_client",
            "--snapshot",
            "snap.json",
            "--symbols",
            "AAPL,TSLA",
            "--once",
        ])
        .unwrap();
        assert_eq!(args.snapshot, Some(PathBuf::from("snap.json")));
        assert!(args.once);
    }
}
