//! Error types used across the frames server crate.
//!
//! `ServerError` wraps the shared `FrameError` (configuration, symbols files) plus the
//! failures only the server can hit: binding the listener and building the outbound
//! HTTP client. Per-request provider failures never surface here; they are folded into
//! an `UpstreamOutcome` and shown on the device.
use std::io;

use thiserror::Error;
use ticker_common::FrameError;

/// Unified error type for server startup and shutdown.
#[derive(Error, Debug)]
pub enum ServerError {
    /// Listener bind/accept failure.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Configuration or symbols file rejected.
    #[error(transparent)]
    Frame(#[from] FrameError),

    /// The provider HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Convenient alias for `std::result::Result<T, ServerError>`.
pub type Result<T, E = ServerError> = std::result::Result<T, E>;
