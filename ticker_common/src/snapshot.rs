//! Raw, untrusted per-ticker snapshot records.
//!
//! The provider's snapshot payload is inconsistent: depending on the session (pre-market,
//! open, halted, closed) and the subscription plan, any of the price fields may be missing,
//! `null`, a string, or a perfectly legitimate `0`. Every field is therefore captured as a
//! [`FieldValue`] tri-state instead of an `Option`, so that a zero price is never confused
//! with an absent one and garbage never reaches arithmetic.
//!
//! Polygon shape consumed by [`RawTickerSnapshot::from_polygon`]:
//!
//! ```json
//! { "status": "OK", "tickers": [
//!     { "ticker": "AAPL", "todaysChangePerc": 0.66,
//!       "lastTrade": { "p": 191.25 }, "lastQuote": { "p": 191.2 },
//!       "day": { "c": 191.1 }, "prevDay": { "c": 190.0 } } ] }
//! ```

use serde_json::Value;
use std::collections::HashMap;

use crate::normalizer::PriceField;

/// Presence state of one snapshot field.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum FieldValue {
    /// Present and a finite number (zero included).
    Numeric(f64),
    /// Present but `null`, a string, an object, or a non-finite number.
    NonNumeric,
    /// Not present in the payload at all.
    #[default]
    Absent,
}

impl FieldValue {
    /// The number, when this field is usable for arithmetic.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Numeric(value) => Some(*value),
            FieldValue::NonNumeric | FieldValue::Absent => None,
        }
    }

    /// Classify a JSON value found (or not found) at some path.
    pub fn from_json(value: Option<&Value>) -> Self {
        match value {
            None => FieldValue::Absent,
            Some(value) => value
                .as_f64()
                .map(FieldValue::from)
                .unwrap_or(FieldValue::NonNumeric),
        }
    }

    /// Walk `path` through nested objects.
    ///
    /// A missing key anywhere yields `Absent`; a parent that exists but is not an object
    /// (e.g. `"lastTrade": null`) yields `NonNumeric`.
    pub fn at_path(root: &Value, path: &[&str]) -> Self {
        let mut current = root;
        for key in path {
            match current {
                Value::Object(map) => match map.get(*key) {
                    Some(next) => current = next,
                    None => return FieldValue::Absent,
                },
                _ => return FieldValue::NonNumeric,
            }
        }
        FieldValue::from_json(Some(current))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        if value.is_finite() {
            FieldValue::Numeric(value)
        } else {
            FieldValue::NonNumeric
        }
    }
}

/// The fields of one ticker that the normalizer may consult.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RawTickerRecord {
    /// Most recent executed trade.
    pub last_trade_price: FieldValue,
    /// Most recent quote.
    pub last_quote_price: FieldValue,
    /// Intraday running close.
    pub day_close_price: FieldValue,
    /// Prior session close.
    pub prev_day_close_price: FieldValue,
    /// The provider's own change percent for the session.
    pub precomputed_change_percent: FieldValue,
}

impl RawTickerRecord {
    /// Read the field a price candidate refers to.
    pub fn price_field(&self, field: PriceField) -> FieldValue {
        match field {
            PriceField::LastTrade => self.last_trade_price,
            PriceField::LastQuote => self.last_quote_price,
            PriceField::DayClose => self.day_close_price,
            PriceField::PrevDayClose => self.prev_day_close_price,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_price(mut self, field: PriceField, value: impl Into<FieldValue>) -> Self {
        let value = value.into();
        match field {
            PriceField::LastTrade => self.last_trade_price = value,
            PriceField::LastQuote => self.last_quote_price = value,
            PriceField::DayClose => self.day_close_price = value,
            PriceField::PrevDayClose => self.prev_day_close_price = value,
        }
        self
    }

    #[cfg(test)]
    pub(crate) fn with_change_percent(mut self, value: impl Into<FieldValue>) -> Self {
        self.precomputed_change_percent = value.into();
        self
    }

    /// Extract one entry of the Polygon `tickers` array.
    pub fn from_polygon_entry(entry: &Value) -> Self {
        RawTickerRecord {
            last_trade_price: FieldValue::at_path(entry, &["lastTrade", "p"]),
            last_quote_price: FieldValue::at_path(entry, &["lastQuote", "p"]),
            day_close_price: FieldValue::at_path(entry, &["day", "c"]),
            prev_day_close_price: FieldValue::at_path(entry, &["prevDay", "c"]),
            precomputed_change_percent: FieldValue::at_path(entry, &["todaysChangePerc"]),
        }
    }
}

/// Records keyed by the symbol the provider reported them under.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTickerSnapshot {
    records: HashMap<String, RawTickerRecord>,
}

impl RawTickerSnapshot {
    /// Empty snapshot; every lookup misses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a record.
    pub fn insert(&mut self, symbol: impl Into<String>, record: RawTickerRecord) {
        self.records.insert(symbol.into().to_ascii_uppercase(), record);
    }

    /// Look a symbol up, case-insensitively.
    pub fn get(&self, symbol: &str) -> Option<&RawTickerRecord> {
        self.records.get(&symbol.to_ascii_uppercase())
    }

    /// Number of distinct symbols carried.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the provider returned no usable entries.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Build from the `tickers` array of a Polygon snapshot document.
    ///
    /// Entries without a string `ticker` are skipped. When the provider repeats a symbol,
    /// the first entry wins. A missing or non-array `tickers` gives an empty snapshot.
    pub fn from_polygon(document: &Value) -> Self {
        let mut snapshot = Self::new();
        let Some(entries) = document.get("tickers").and_then(Value::as_array) else {
            return snapshot;
        };
        for entry in entries {
            let Some(symbol) = entry.get("ticker").and_then(Value::as_str) else {
                continue;
            };
            snapshot
                .records
                .entry(symbol.to_ascii_uppercase())
                .or_insert_with(|| RawTickerRecord::from_polygon_entry(entry));
        }
        snapshot
    }
}

impl<S: Into<String>> FromIterator<(S, RawTickerRecord)> for RawTickerSnapshot {
    fn from_iter<I: IntoIterator<Item = (S, RawTickerRecord)>>(iter: I) -> Self {
        let mut snapshot = Self::new();
        for (symbol, record) in iter {
            snapshot.insert(symbol, record);
        }
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn zero_is_numeric_not_missing() {
        assert_eq!(FieldValue::from_json(Some(&json!(0))), FieldValue::Numeric(0.0));
    }

    #[test]
    fn tri_state_classification() {
        assert_eq!(FieldValue::from_json(None), FieldValue::Absent);
        assert_eq!(FieldValue::from_json(Some(&Value::Null)), FieldValue::NonNumeric);
        assert_eq!(FieldValue::from_json(Some(&json!("191.2"))), FieldValue::NonNumeric);
        assert_eq!(FieldValue::from(f64::NAN), FieldValue::NonNumeric);
        assert_eq!(FieldValue::from(f64::INFINITY), FieldValue::NonNumeric);
    }

    #[test]
    fn nested_paths_distinguish_null_parent_from_missing_parent() {
        let entry = json!({ "lastTrade": null, "day": {} });
        assert_eq!(FieldValue::at_path(&entry, &["lastTrade", "p"]), FieldValue::NonNumeric);
        assert_eq!(FieldValue::at_path(&entry, &["day", "c"]), FieldValue::Absent);
        assert_eq!(FieldValue::at_path(&entry, &["prevDay", "c"]), FieldValue::Absent);
    }

    #[test]
    fn polygon_entry_maps_every_field() {
        let entry = json!({
            "ticker": "AAPL",
            "todaysChangePerc": -0.5,
            "lastTrade": { "p": 191.25 },
            "lastQuote": { "p": 191.2, "P": 191.3 },
            "day": { "c": 0 },
            "prevDay": { "c": 190.0 }
        });
        let record = RawTickerRecord::from_polygon_entry(&entry);
        assert_eq!(record.last_trade_price, FieldValue::Numeric(191.25));
        assert_eq!(record.last_quote_price, FieldValue::Numeric(191.2));
        assert_eq!(record.day_close_price, FieldValue::Numeric(0.0));
        assert_eq!(record.prev_day_close_price, FieldValue::Numeric(190.0));
        assert_eq!(record.precomputed_change_percent, FieldValue::Numeric(-0.5));
    }

    #[test]
    fn snapshot_skips_entries_without_ticker_and_keeps_first_duplicate() {
        let doc = json!({ "tickers": [
            { "lastTrade": { "p": 1.0 } },
            { "ticker": "msft", "lastTrade": { "p": 410.0 } },
            { "ticker": "MSFT", "lastTrade": { "p": 999.0 } }
        ]});
        let snapshot = RawTickerSnapshot::from_polygon(&doc);
        assert_eq!(snapshot.len(), 1);
        let record = snapshot.get("MSFT").unwrap();
        assert_eq!(record.last_trade_price, FieldValue::Numeric(410.0));
    }

    #[test]
    fn snapshot_without_tickers_array_is_empty() {
        assert!(RawTickerSnapshot::from_polygon(&json!({ "status": "OK" })).is_empty());
        assert!(RawTickerSnapshot::from_polygon(&json!({ "tickers": "nope" })).is_empty());
    }
}
