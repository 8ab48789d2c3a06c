//! Command-line and environment configuration for the frames server.
//!
//! Every flag can also come from the environment, so the server runs unchanged under a
//! process manager or container that only sets variables.
use clap::Parser;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::time::Duration;
use ticker_common::net::{DEFAULT_BIND_HOST, HTTP_PORT, POLYGON_BASE_URL, addr};
use ticker_common::symbols::SymbolParser;
use ticker_common::{DisplayConfig, FrameError, IconId, IconMap, Symbol};

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Address to listen on.
    #[clap(long, env = "TICKER_BIND", default_value_t = addr(DEFAULT_BIND_HOST, HTTP_PORT))]
    pub bind: String,

    /// Polygon API key. Without it the server only serves a configuration frame.
    #[clap(long, env = "POLYGON_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Provider base URL.
    #[clap(long, env = "POLYGON_BASE_URL", default_value = POLYGON_BASE_URL)]
    pub base_url: String,

    /// Comma separated symbols, in rotation order.
    #[clap(long, env = "TICKER_SYMBOLS")]
    pub symbols: Option<String>,

    /// File with one symbol per line; takes precedence over `--symbols`.
    #[clap(long, env = "TICKER_SYMBOLS_FILE")]
    pub symbols_file: Option<PathBuf>,

    /// Icon for rising tickers (0 = unset).
    #[clap(long, env = "LAMETRIC_ICON_UP", default_value_t = 0)]
    pub icon_up: u32,

    /// Icon for falling tickers (0 = unset).
    #[clap(long, env = "LAMETRIC_ICON_DOWN", default_value_t = 0)]
    pub icon_down: u32,

    /// Icon for unchanged tickers (0 = unset).
    #[clap(long, env = "LAMETRIC_ICON_FLAT", default_value_t = 0)]
    pub icon_flat: u32,

    /// Icon for tickers without a known change (0 = unset).
    #[clap(long, env = "LAMETRIC_ICON_UNKNOWN", default_value_t = 0)]
    pub icon_unknown: u32,

    /// Fallback icon for everything else.
    #[clap(long, env = "LAMETRIC_ICON_DEFAULT", default_value_t = 42844)]
    pub icon_default: u32,

    /// Device character budget per frame.
    #[clap(long, env = "TICKER_MAX_TEXT_LENGTH", default_value_t = 25)]
    pub max_text_length: usize,

    /// Do not prepend the market-status frame.
    #[clap(long)]
    pub no_status_frame: bool,

    /// Leave out the `Cache-Control: no-store` header.
    #[clap(long)]
    pub allow_cache: bool,

    /// Timeout for the provider request, in seconds.
    #[clap(long, env = "POLYGON_TIMEOUT_SECS", default_value_t = 10)]
    pub timeout_secs: u64,
}

impl Args {
    /// Symbols from the file, the list flag, or the built-in rotation, in that order.
    pub fn resolve_symbols(&self) -> Result<Vec<Symbol>, FrameError> {
        if let Some(path) = &self.symbols_file {
            let file = File::open(path)?;
            return Symbol::parse_from_file(BufReader::new(file));
        }
        match &self.symbols {
            Some(list) => Symbol::parse_list(list),
            None => Ok(Symbol::defaults()),
        }
    }

    /// Build and validate the pipeline configuration.
    pub fn display_config(&self) -> Result<DisplayConfig, FrameError> {
        let default = IconId::new(self.icon_default)
            .ok_or_else(|| FrameError::Config("icon-default must be a positive id".to_string()))?;
        let config = DisplayConfig {
            symbols: self.resolve_symbols()?,
            icons: IconMap {
                up: IconId::new(self.icon_up),
                down: IconId::new(self.icon_down),
                flat: IconId::new(self.icon_flat),
                unknown: IconId::new(self.icon_unknown),
                default,
            },
            max_frame_text_length: self.max_text_length,
            status_frame: !self.no_status_frame,
            no_cache: !self.allow_cache,
        };
        config.validate()?;
        Ok(config)
    }

    /// The API key, unless blank.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    /// Provider request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
