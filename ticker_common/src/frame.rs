//! Display frames and the JSON document the device polls.
//!
//! The device expects `{"frames":[{"text":..,"icon":..,"index":..}]}`. `index` is the
//! device's name for a frame's position in the rotation; in Rust it is `order`.

use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;

use crate::error::FrameError;
use crate::quote::Trend;

/// Icon shown when nothing more specific is configured.
pub const DEFAULT_ICON: IconId = IconId(match NonZeroU32::new(42844) {
    Some(id) => id,
    None => panic!("default icon id must be non-zero"),
});

/// Positive icon identifier understood by the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IconId(NonZeroU32);

impl IconId {
    /// `None` for zero, which the device does not accept and which means "unset" in
    /// configuration.
    pub fn new(id: u32) -> Option<Self> {
        NonZeroU32::new(id).map(IconId)
    }

    /// Raw identifier.
    pub fn get(&self) -> u32 {
        self.0.get()
    }
}

impl Default for IconId {
    fn default() -> Self {
        DEFAULT_ICON
    }
}

/// Trend to icon mapping with a mandatory fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IconMap {
    /// Icon for rising tickers.
    #[serde(rename = "iconForUp")]
    pub up: Option<IconId>,
    /// Icon for falling tickers.
    #[serde(rename = "iconForDown")]
    pub down: Option<IconId>,
    /// Icon for unchanged tickers.
    #[serde(rename = "iconForFlat")]
    pub flat: Option<IconId>,
    /// Icon for tickers with no known change.
    #[serde(rename = "iconForUnknown")]
    pub unknown: Option<IconId>,
    /// Used whenever the trend has no icon of its own.
    #[serde(rename = "defaultIcon")]
    pub default: IconId,
}

impl IconMap {
    /// Map with only a default icon.
    pub fn with_default(default: IconId) -> Self {
        Self {
            default,
            ..Self::default()
        }
    }

    /// Icon for `trend`, or the default when none was configured.
    pub fn icon_for(&self, trend: Trend) -> IconId {
        let specific = match trend {
            Trend::Up => self.up,
            Trend::Down => self.down,
            Trend::Flat => self.flat,
            Trend::Unknown => self.unknown,
        };
        specific.unwrap_or(self.default)
    }
}

/// One unit of rotating display content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayFrame {
    /// Bounded-length text line.
    pub text: String,
    /// Icon shown beside the text.
    pub icon: IconId,
    /// Position in the rotation, dense and zero-based.
    #[serde(rename = "index")]
    pub order: usize,
}

/// Top-level document served to the device.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FrameResponse {
    /// Frames in rotation order.
    pub frames: Vec<DisplayFrame>,
}

impl FrameResponse {
    /// Wrap already-ordered frames.
    pub fn new(frames: Vec<DisplayFrame>) -> Self {
        Self { frames }
    }

    /// A response carrying one message frame at index 0.
    pub fn single(message: &str, icon: IconId, max_len: usize) -> Self {
        Self::new(vec![DisplayFrame {
            text: truncate_chars(message.trim(), max_len),
            icon,
            order: 0,
        }])
    }

    /// Encode the response to JSON bytes.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, FrameError> {
        let json = serde_json::to_vec(self)?;
        Ok(json)
    }
}

/// First `max_len` characters of `text`.
pub fn truncate_chars(text: &str, max_len: usize) -> String {
    text.chars().take(max_len).collect()
}
