//! Resolved quote model: the normalizer's output and the renderer's input.
//!
//! `ResolvedQuote` derives its `Trend` from its `ChangePercent` at construction, so the
//! two can never disagree: `Unknown` change means `Unknown` trend, exactly zero change
//! means `Flat`.

use serde::Serialize;
use strum_macros::{AsRefStr, Display, EnumString};

use crate::symbols::Symbol;

/// Best-available price for a ticker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "lowercase", tag = "state", content = "value")]
pub enum Price {
    /// A finite price taken from one of the fallback fields.
    Quoted(f64),
    /// No candidate field held a number.
    Unavailable,
}

impl Price {
    /// The number, if any.
    pub fn value(&self) -> Option<f64> {
        match self {
            Price::Quoted(value) => Some(*value),
            Price::Unavailable => None,
        }
    }

    /// Whether no price could be resolved.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Price::Unavailable)
    }
}

/// Session change in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "lowercase", tag = "state", content = "value")]
pub enum ChangePercent {
    /// A finite percent change.
    Known(f64),
    /// Neither the provider nor the close prices gave a usable change.
    Unknown,
}

impl ChangePercent {
    /// Keep finite numbers, turn everything else into `Unknown`.
    pub fn from_finite(value: f64) -> Self {
        if value.is_finite() {
            ChangePercent::Known(value)
        } else {
            ChangePercent::Unknown
        }
    }

    /// The number, if known.
    pub fn value(&self) -> Option<f64> {
        match self {
            ChangePercent::Known(value) => Some(*value),
            ChangePercent::Unknown => None,
        }
    }
}

/// Direction shown on the device.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Trend {
    Up,
    Down,
    Flat,
    Unknown,
}

impl Trend {
    /// Classify a change. Never looks at the price.
    pub fn from_change(change: ChangePercent) -> Self {
        match change {
            ChangePercent::Unknown => Trend::Unknown,
            ChangePercent::Known(value) if value > 0.0 => Trend::Up,
            ChangePercent::Known(value) if value < 0.0 => Trend::Down,
            ChangePercent::Known(_) => Trend::Flat,
        }
    }

    /// Leading glyph of the change suffix; `None` for `Unknown`, which has no suffix.
    pub fn glyph(&self) -> Option<char> {
        match self {
            Trend::Up => Some('▲'),
            Trend::Down => Some('▼'),
            Trend::Flat => Some('='),
            Trend::Unknown => None,
        }
    }
}

/// One ticker after normalization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedQuote {
    symbol: Symbol,
    price: Price,
    change_percent: ChangePercent,
    trend: Trend,
}

impl ResolvedQuote {
    /// Build a quote; the trend follows from `change_percent`.
    pub fn new(symbol: Symbol, price: Price, change_percent: ChangePercent) -> Self {
        Self {
            symbol,
            price,
            change_percent,
            trend: Trend::from_change(change_percent),
        }
    }

    /// A requested symbol the provider said nothing usable about.
    pub fn unavailable(symbol: Symbol) -> Self {
        Self::new(symbol, Price::Unavailable, ChangePercent::Unknown)
    }

    /// Ticker this quote belongs to.
    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    /// Resolved price.
    pub fn price(&self) -> Price {
        self.price
    }

    /// Resolved session change.
    pub fn change_percent(&self) -> ChangePercent {
        self.change_percent
    }

    /// Direction derived from the change.
    pub fn trend(&self) -> Trend {
        self.trend
    }
}
