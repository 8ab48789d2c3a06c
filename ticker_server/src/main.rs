//! Ticker frames HTTP server.
//!
//! Serves the rotating-display document for a fixed set of tickers. Each poll from the
//! device triggers one provider snapshot fetch and one pass through the pure
//! resolve/render pipeline in `ticker_common`; nothing is cached between polls.
//!
//! Building blocks:
//!
//! - `server::router` wires `/`, `/frames` and `/health` onto the shared `AppState`, with
//!   a catch-all that turns handler panics into a `Server error` frame.
//! - `PolygonSource` performs the outbound snapshot request; without an API key the
//!   server still answers, with a single configuration frame.
//!
//! Usage example:
//! ```bash
//! POLYGON_API_KEY=... ticker_server --symbols AAPL,NVDA,TSLA --icon-up 120 --icon-down 121
//! ```
#![warn(missing_docs)]
use crate::args::Args;
use crate::error::Result;
use crate::server::AppState;
use crate::source::{PolygonSource, SnapshotSource};
use clap::Parser;
use log::{info, warn};
use std::sync::Arc;

mod args;
mod error;
mod handler;
mod server;
mod source;

#[tokio::main]
async fn main() -> Result<()> {
    init_logger();
    let args = Args::parse();
    let config = args.display_config()?;
    info!(
        "Serving {} symbols, max text length {}",
        config.symbols.len(),
        config.max_frame_text_length
    );

    let source: Option<Arc<dyn SnapshotSource>> = match args.api_key() {
        Some(key) => Some(Arc::new(PolygonSource::new(&args.base_url, key, args.timeout())?)),
        None => {
            warn!("POLYGON_API_KEY is not set; every poll gets a configuration frame");
            None
        }
    };

    server::serve(AppState::new(config, source), &args.bind).await
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
