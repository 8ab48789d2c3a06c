//!
//! Price/trend resolution and frame rendering shared by the frames server and client.
//!
//! This crate aggregates:
//! - `error` — unified error type `FrameError` used across the workspace.
//! - `result` — handy `Result<T, FrameError>` alias.
//! - `symbols` — ticker symbols and parsing helpers.
//! - `snapshot` — raw provider records with tri-state field presence.
//! - `quote` — resolved price, change and trend.
//! - `normalizer` — ordered fallback tables turning snapshots into quotes.
//! - `frame` — display frames, icons and the device document.
//! - `render` — bounded frame text and the market-status frame.
//! - `config` — display configuration passed in per call.
//! - `upstream` — classification of provider replies.
//! - `pipeline` — provider reply to device document, end to end.
//! - `net` — networking constants and small helpers.
#![warn(missing_docs)]
pub mod config;
pub mod error;
pub mod frame;
pub mod net;
pub mod normalizer;
pub mod pipeline;
pub mod quote;
pub mod render;
pub mod result;
pub mod snapshot;
pub mod symbols;
pub mod upstream;

pub use config::DisplayConfig;
pub use error::FrameError;
pub use frame::{DisplayFrame, FrameResponse, IconId, IconMap};
pub use quote::{ChangePercent, Price, ResolvedQuote, Trend};
pub use result::Result;
pub use symbols::Symbol;
pub use upstream::UpstreamOutcome;
