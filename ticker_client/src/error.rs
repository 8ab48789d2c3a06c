//! Error types used across the ticker client crate.
use std::io;

use thiserror::Error;
use ticker_common::FrameError;

/// Unified error type for polling, snapshot files and startup.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Snapshot file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Invalid symbols or display settings.
    #[error(transparent)]
    Frame(#[from] FrameError),

    /// Polling the frames server failed (connect, timeout, body decode).
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// The Ctrl+C handler could not be installed.
    #[error("Signal handler error: {0}")]
    Signal(#[from] ctrlc::Error),
}

/// Convenient alias for `std::result::Result<T, ClientError>`.
pub type Result<T, E = ClientError> = std::result::Result<T, E>;
