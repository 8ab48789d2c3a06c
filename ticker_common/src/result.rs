//! Result type alias shared across the workspace.
//!
//! Defaults the error type to `FrameError`, so functions can simply return `Result<T>`.
use crate::error::FrameError;

/// Workspace-wide `Result` alias with `FrameError` as the default error.
pub type Result<T, E = FrameError> = std::result::Result<T, E>;
