//! Snapshot normalizer: raw provider records to [`ResolvedQuote`]s.
//!
//! Precedence is data, not control flow. A [`FallbackTable`] holds
//!
//! - an ordered price chain (`PriceField`s, first finite number wins), with optional
//!   per-symbol overrides, and
//! - an ordered change chain (`ChangeRule`s, first rule producing a finite number wins).
//!
//! The default price chain goes from freshest to stalest proxy for "current price":
//! last trade, last quote, intraday close, previous close. The default change chain prefers
//! the provider's own figure, then day close against previous close, then the live price
//! against previous close.

use log::debug;
use std::collections::HashMap;
use strum_macros::{AsRefStr, Display};

use crate::quote::{ChangePercent, Price, ResolvedQuote};
use crate::snapshot::{RawTickerRecord, RawTickerSnapshot};
use crate::symbols::Symbol;

/// A snapshot field that can stand in for the current price.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
pub enum PriceField {
    #[strum(serialize = "lastTradePrice")]
    LastTrade,
    #[strum(serialize = "lastQuotePrice")]
    LastQuote,
    #[strum(serialize = "dayClosePrice")]
    DayClose,
    #[strum(serialize = "prevDayClosePrice")]
    PrevDayClose,
}

/// Default price precedence.
pub const DEFAULT_PRICE_CHAIN: [PriceField; 4] = [
    PriceField::LastTrade,
    PriceField::LastQuote,
    PriceField::DayClose,
    PriceField::PrevDayClose,
];

/// One way of obtaining the session change percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
pub enum ChangeRule {
    /// The provider's `todaysChangePerc`.
    Precomputed,
    /// `(dayClose - prevDayClose) / prevDayClose * 100`.
    DayCloseVsPrevClose,
    /// Same formula with the last trade (or, failing that, last quote) in place of the
    /// day close. Covers pre-market and sessions where the day bar is still empty.
    LivePriceVsPrevClose,
}

/// Default change precedence.
pub const DEFAULT_CHANGE_CHAIN: [ChangeRule; 3] = [
    ChangeRule::Precomputed,
    ChangeRule::DayCloseVsPrevClose,
    ChangeRule::LivePriceVsPrevClose,
];

/// Percent change from `previous` to `current`; `Unknown` when `previous` is zero or the
/// result is not finite.
pub fn percent_change(current: f64, previous: f64) -> ChangePercent {
    if previous == 0.0 {
        return ChangePercent::Unknown;
    }
    ChangePercent::from_finite((current - previous) / previous * 100.0)
}

/// Ordered precedence tables used to resolve quotes.
#[derive(Debug, Clone, PartialEq)]
pub struct FallbackTable {
    price_chain: Vec<PriceField>,
    overrides: HashMap<Symbol, Vec<PriceField>>,
    change_chain: Vec<ChangeRule>,
}

impl Default for FallbackTable {
    fn default() -> Self {
        Self::new(DEFAULT_PRICE_CHAIN.to_vec(), DEFAULT_CHANGE_CHAIN.to_vec())
    }
}

impl FallbackTable {
    /// Table with the given chains and no per-symbol overrides.
    pub fn new(price_chain: Vec<PriceField>, change_chain: Vec<ChangeRule>) -> Self {
        Self {
            price_chain,
            overrides: HashMap::new(),
            change_chain,
        }
    }

    /// Use a different price chain for one symbol.
    pub fn with_override(mut self, symbol: Symbol, chain: Vec<PriceField>) -> Self {
        self.overrides.insert(symbol, chain);
        self
    }

    /// Price candidates for `symbol`, in evaluation order.
    pub fn price_chain(&self, symbol: &Symbol) -> &[PriceField] {
        self.overrides
            .get(symbol)
            .map(Vec::as_slice)
            .unwrap_or(self.price_chain.as_slice())
    }

    /// Change rules, in evaluation order.
    pub fn change_chain(&self) -> &[ChangeRule] {
        &self.change_chain
    }

    /// First numeric candidate in the symbol's chain, with the field it came from.
    pub fn resolve_price(
        &self,
        symbol: &Symbol,
        record: &RawTickerRecord,
    ) -> (Price, Option<PriceField>) {
        self.price_chain(symbol)
            .iter()
            .find_map(|field| {
                record
                    .price_field(*field)
                    .as_number()
                    .map(|value| (Price::Quoted(value), Some(*field)))
            })
            .unwrap_or((Price::Unavailable, None))
    }

    /// First change rule that yields a finite percent.
    pub fn resolve_change(&self, record: &RawTickerRecord) -> (ChangePercent, Option<ChangeRule>) {
        self.change_chain
            .iter()
            .find_map(|rule| match apply_rule(*rule, record) {
                ChangePercent::Known(value) => Some((ChangePercent::Known(value), Some(*rule))),
                ChangePercent::Unknown => None,
            })
            .unwrap_or((ChangePercent::Unknown, None))
    }

    /// Resolve one symbol; a missing record resolves to an unavailable quote.
    pub fn resolve_record(&self, symbol: &Symbol, record: Option<&RawTickerRecord>) -> ResolvedQuote {
        let Some(record) = record else {
            debug!("{}: not in snapshot", symbol);
            return ResolvedQuote::unavailable(symbol.clone());
        };
        let (price, price_source) = self.resolve_price(symbol, record);
        let (change, change_source) = self.resolve_change(record);
        debug!(
            "{}: price {:?} from {:?}, change {:?} via {:?}",
            symbol, price, price_source, change, change_source
        );
        ResolvedQuote::new(symbol.clone(), price, change)
    }

    /// One quote per requested symbol, in request order.
    pub fn resolve(&self, raw: &RawTickerSnapshot, symbols: &[Symbol]) -> Vec<ResolvedQuote> {
        symbols
            .iter()
            .map(|symbol| self.resolve_record(symbol, raw.get(symbol.as_str())))
            .collect()
    }
}

fn apply_rule(rule: ChangeRule, record: &RawTickerRecord) -> ChangePercent {
    let prev_close = record.prev_day_close_price.as_number();
    match rule {
        ChangeRule::Precomputed => record
            .precomputed_change_percent
            .as_number()
            .map(ChangePercent::from_finite)
            .unwrap_or(ChangePercent::Unknown),
        ChangeRule::DayCloseVsPrevClose => match (record.day_close_price.as_number(), prev_close) {
            (Some(day_close), Some(prev_close)) => percent_change(day_close, prev_close),
            _ => ChangePercent::Unknown,
        },
        ChangeRule::LivePriceVsPrevClose => {
            let live = record
                .last_trade_price
                .as_number()
                .or_else(|| record.last_quote_price.as_number());
            match (live, prev_close) {
                (Some(live), Some(prev_close)) => percent_change(live, prev_close),
                _ => ChangePercent::Unknown,
            }
        }
    }
}

/// Resolve `symbols` against `raw` with the default tables.
pub fn resolve(raw: &RawTickerSnapshot, symbols: &[Symbol]) -> Vec<ResolvedQuote> {
    FallbackTable::default().resolve(raw, symbols)
}
