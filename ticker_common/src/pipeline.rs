//! End-to-end transform: provider outcome plus configuration to the device document.
//!
//! Always returns a well-formed `FrameResponse`. Upstream failures and empty replies
//! short-circuit to a single message frame; only a usable snapshot reaches the
//! normalizer and renderer.

use log::warn;

use crate::config::DisplayConfig;
use crate::frame::FrameResponse;
use crate::normalizer::FallbackTable;
use crate::render::{render, render_with_status};
use crate::snapshot::RawTickerSnapshot;
use crate::upstream::UpstreamOutcome;

/// Text of the frame shown when the server itself fails.
pub const SERVER_ERROR_TEXT: &str = "Server error";

/// Resolve and render a snapshot with the default fallback table.
pub fn build_frames(raw: &RawTickerSnapshot, config: &DisplayConfig) -> FrameResponse {
    build_frames_with(&FallbackTable::default(), raw, config)
}

/// Resolve and render a snapshot with an explicit fallback table.
pub fn build_frames_with(
    table: &FallbackTable,
    raw: &RawTickerSnapshot,
    config: &DisplayConfig,
) -> FrameResponse {
    let quotes = table.resolve(raw, &config.symbols);
    let frames = if config.status_frame {
        render_with_status(&quotes, config.max_frame_text_length, &config.icons)
    } else {
        render(&quotes, config.max_frame_text_length, &config.icons)
    };
    FrameResponse::new(frames)
}

/// Turn any provider outcome into the document for the device.
pub fn respond(outcome: &UpstreamOutcome, config: &DisplayConfig) -> FrameResponse {
    match outcome {
        UpstreamOutcome::Snapshot(raw) => build_frames(raw, config),
        other => {
            let text = other.message_text().unwrap_or_default();
            warn!("Upstream gave no usable snapshot: {}", text);
            message_frame(&text, config)
        }
    }
}

/// A single message frame with the default icon, trimmed to the budget.
pub fn message_frame(text: &str, config: &DisplayConfig) -> FrameResponse {
    FrameResponse::single(text, config.icons.default, config.max_frame_text_length)
}
