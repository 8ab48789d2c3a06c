//! Terminal stand-in for the rotating display.
use chrono::{DateTime, Local};
use ticker_common::DisplayFrame;

/// One console line for `frame`, e.g. `[09:30:02] #1 (icon 42844) AAPL 191.25 ▲+0.66%`.
pub fn frame_line(frame: &DisplayFrame, at: DateTime<Local>) -> String {
    format!(
        "[{}] #{} (icon {}) {}",
        at.format("%H:%M:%S"),
        frame.order,
        frame.icon.get(),
        frame.text
    )
}
