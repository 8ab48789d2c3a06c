//! Display configuration passed into the pipeline on every call.
//!
//! Loading (CLI flags, environment, files) happens in the binaries; this type only
//! carries already-parsed values and checks them once via [`DisplayConfig::validate`].

use serde::{Deserialize, Serialize};

use crate::error::FrameError;
use crate::frame::IconMap;
use crate::symbols::Symbol;

/// Character budget of the stock LaMetric Time text line.
pub const DEFAULT_MAX_FRAME_TEXT_LENGTH: usize = 25;

/// Everything the pipeline needs besides the snapshot itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DisplayConfig {
    /// Tickers to show, in rotation order.
    pub symbols: Vec<Symbol>,
    /// Trend icons and the fallback icon.
    #[serde(flatten)]
    pub icons: IconMap,
    /// Upper bound on every frame's text, in characters.
    pub max_frame_text_length: usize,
    /// Prepend the market-status frame.
    pub status_frame: bool,
    /// Ask clients and proxies not to cache the response.
    pub no_cache: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            symbols: Symbol::defaults(),
            icons: IconMap::default(),
            max_frame_text_length: DEFAULT_MAX_FRAME_TEXT_LENGTH,
            status_frame: true,
            no_cache: true,
        }
    }
}

impl DisplayConfig {
    /// Reject settings that would make every frame empty or the request pointless.
    pub fn validate(&self) -> Result<(), FrameError> {
        if self.symbols.is_empty() {
            return Err(FrameError::Config("at least one symbol is required".to_string()));
        }
        if self.max_frame_text_length == 0 {
            return Err(FrameError::Config(
                "maxFrameTextLength must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
