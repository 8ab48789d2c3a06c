//! Ticker symbols and helpers shared between server and client.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::BufRead;
use std::str::FromStr;

use crate::error::FrameError;

/// Symbols shown when the operator configures none.
pub const DEFAULT_SYMBOLS: [&str; 8] = ["AAPL", "NVDA", "MSFT", "NFLX", "GME", "TSLA", "GOOGL", "AMD"];

/// Longest symbol accepted; anything longer cannot be a listed ticker.
const MAX_SYMBOL_LEN: usize = 16;

/// Trait providing file parsing for symbols.
pub trait SymbolParser {
    /// Parses symbols from a buffered reader.
    ///
    /// Each non-empty line is parsed as a single `Symbol` value using `FromStr`.
    /// Returns an error if any line cannot be parsed.
    fn parse_from_file<R: BufRead>(reader: R) -> Result<Vec<Symbol>, FrameError>;
}

impl SymbolParser for Symbol {
    fn parse_from_file<R: BufRead>(reader: R) -> Result<Vec<Self>, FrameError> {
        let mut symbols = Vec::new();

        for line_result in reader.lines() {
            let line = line_result.map_err(FrameError::Io)?;
            let trimmed_line = line.trim();
            if trimmed_line.is_empty() || trimmed_line.starts_with('#') {
                continue;
            }

            match trimmed_line.parse::<Self>() {
                Ok(symbol) => symbols.push(symbol),
                Err(e) => return Err(FrameError::ParseSymbolsFile(e.to_string())),
            }
        }
        Ok(symbols)
    }
}

/// An upper-cased exchange ticker, e.g. `AAPL` or `BRK.B`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Borrow the symbol text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The built-in rotation used when nothing is configured.
    pub fn defaults() -> Vec<Symbol> {
        DEFAULT_SYMBOLS
            .iter()
            .map(|s| Symbol((*s).to_string()))
            .collect()
    }

    /// Parse a comma and/or whitespace separated list such as `"AAPL, MSFT TSLA"`.
    pub fn parse_list(raw: &str) -> Result<Vec<Symbol>, FrameError> {
        raw.split(|c: char| c == ',' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .map(str::parse)
            .collect()
    }
}

impl FromStr for Symbol {
    type Err = FrameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(FrameError::InvalidSymbol("empty symbol".to_string()));
        }
        if trimmed.chars().count() > MAX_SYMBOL_LEN {
            return Err(FrameError::InvalidSymbol(format!("{trimmed}: too long")));
        }
        if let Some(bad) = trimmed
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(*c, '.' | '-' | ':')))
        {
            return Err(FrameError::InvalidSymbol(format!(
                "{trimmed}: unexpected character {bad:?}"
            )));
        }
        Ok(Symbol(trimmed.to_ascii_uppercase()))
    }
}

impl TryFrom<String> for Symbol {
    type Error = FrameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Symbol> for String {
    fn from(symbol: Symbol) -> Self {
        symbol.0
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
