//! Error types shared between the frames server and the device client.
//!
//! The `FrameError` enum unifies the failure cases of the plumbing around the
//! pipeline: file I/O, JSON encoding, symbol parsing and configuration. Transport errors
//! belong to the binaries that own a transport. The pipeline itself is total and never
//! produces one of these.
use std::io;

use thiserror::Error;

/// Unified error type shared by server and client.
#[derive(Error, Debug)]
pub enum FrameError {
    /// I/O error originating from the standard library or sockets/files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Failure while encoding/decoding JSON via serde_json.
    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// A ticker symbol did not pass validation.
    #[error("Invalid symbol: {0}")]
    InvalidSymbol(String),

    /// Error while reading a symbols file into `Symbol` values.
    #[error("Parse symbols file error: {0}")]
    ParseSymbolsFile(String),

    /// Configuration value rejected at load time.
    #[error("Config error: {0}")]
    Config(String),
}
