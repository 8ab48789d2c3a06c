//! Frame renderer: resolved quotes to bounded display frames.
//!
//! A ticker line reads `"{symbol} {price}{change}"`, e.g. `AAPL 191.25 ▲+0.66%`. When the
//! device's character budget is too small the line degrades in steps, never cutting a
//! number in half:
//!
//! 1. full line,
//! 2. without the change suffix,
//! 3. with the price rounded to a whole number,
//! 4. the symbol alone, cut to the budget.

use crate::frame::{DisplayFrame, IconMap, truncate_chars};
use crate::quote::{ChangePercent, Price, ResolvedQuote, Trend};

/// Marker shown in place of a price that could not be resolved.
pub const UNAVAILABLE_MARKER: &str = "N/A";

/// Aggregate over one invocation's quotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarketStatus {
    /// Quotes whose price is unavailable.
    pub unavailable: usize,
    /// All quotes considered.
    pub total: usize,
}

impl MarketStatus {
    /// Count unavailable prices.
    pub fn from_quotes(quotes: &[ResolvedQuote]) -> Self {
        Self {
            unavailable: quotes.iter().filter(|q| q.price().is_unavailable()).count(),
            total: quotes.len(),
        }
    }

    /// Summary line: `Market: OK` or `Market: {n} N/A`.
    pub fn text(&self) -> String {
        if self.unavailable == 0 {
            "Market: OK".to_string()
        } else {
            format!("Market: {} {}", self.unavailable, UNAVAILABLE_MARKER)
        }
    }
}

fn price_text(price: Price) -> String {
    match price {
        Price::Quoted(value) => format!("{:.2}", value),
        Price::Unavailable => UNAVAILABLE_MARKER.to_string(),
    }
}

fn change_text(change: ChangePercent, trend: Trend) -> String {
    let (Some(value), Some(glyph)) = (change.value(), trend.glyph()) else {
        return String::new();
    };
    match trend {
        Trend::Flat => format!(" {}0.00%", glyph),
        _ => format!(" {}{:+.2}%", glyph, value),
    }
}

fn fits(text: &str, max_len: usize) -> bool {
    text.chars().count() <= max_len
}

/// The ticker line for `quote`, at most `max_len` characters long.
pub fn frame_text(quote: &ResolvedQuote, max_len: usize) -> String {
    let symbol = quote.symbol().as_str();
    let head = format!("{} {}", symbol, price_text(quote.price()));
    let full = format!("{}{}", head, change_text(quote.change_percent(), quote.trend()));
    if fits(&full, max_len) {
        return full;
    }
    if fits(&head, max_len) {
        return head;
    }
    if let Price::Quoted(value) = quote.price() {
        let whole = format!("{} {:.0}", symbol, value);
        if fits(&whole, max_len) {
            return whole;
        }
    }
    truncate_chars(symbol, max_len)
}

fn ticker_frames(quotes: &[ResolvedQuote], max_len: usize, icons: &IconMap, offset: usize) -> Vec<DisplayFrame> {
    quotes
        .iter()
        .enumerate()
        .map(|(i, quote)| DisplayFrame {
            text: frame_text(quote, max_len),
            icon: icons.icon_for(quote.trend()),
            order: i + offset,
        })
        .collect()
}

/// One frame per quote, `order` starting at 0.
pub fn render(quotes: &[ResolvedQuote], max_len: usize, icons: &IconMap) -> Vec<DisplayFrame> {
    ticker_frames(quotes, max_len, icons, 0)
}

/// A market-status frame at `order` 0 followed by one frame per quote.
pub fn render_with_status(quotes: &[ResolvedQuote], max_len: usize, icons: &IconMap) -> Vec<DisplayFrame> {
    let status = MarketStatus::from_quotes(quotes);
    let mut frames = Vec::with_capacity(quotes.len() + 1);
    frames.push(DisplayFrame {
        text: truncate_chars(&status.text(), max_len),
        icon: icons.default,
        order: 0,
    });
    frames.extend(ticker_frames(quotes, max_len, icons, 1));
    frames
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{DEFAULT_ICON, IconId};
    use crate::symbols::Symbol;

    fn quote(symbol: &str, price: Price, change: ChangePercent) -> ResolvedQuote {
        ResolvedQuote::new(symbol.parse::<Symbol>().unwrap(), price, change)
    }

    fn icons() -> IconMap {
        IconMap {
            up: IconId::new(100),
            down: IconId::new(200),
            flat: IconId::new(300),
            unknown: None,
            default: DEFAULT_ICON,
        }
    }

    #[test]
    fn full_line_with_up_change() {
        let q = quote("AAPL", Price::Quoted(191.25), ChangePercent::Known(0.6578));
        assert_eq!(frame_text(&q, 25), "AAPL 191.25 ▲+0.66%");
    }

    #[test]
    fn down_and_flat_suffixes() {
        let down = quote("TSLA", Price::Quoted(250.0), ChangePercent::Known(-1.234));
        assert_eq!(frame_text(&down, 25), "TSLA 250.00 ▼-1.23%");
        let flat = quote("MSFT", Price::Quoted(410.5), ChangePercent::Known(-0.0));
        assert_eq!(frame_text(&flat, 25), "MSFT 410.50 =0.00%");
    }

    #[test]
    fn unavailable_price_has_no_suffix() {
        let q = ResolvedQuote::unavailable("NVDA".parse().unwrap());
        assert_eq!(frame_text(&q, 25), "NVDA N/A");
    }

    #[test]
    fn known_change_with_unavailable_price_keeps_suffix() {
        let q = quote("AMD", Price::Unavailable, ChangePercent::Known(2.0));
        assert_eq!(frame_text(&q, 25), "AMD N/A ▲+2.00%");
    }

    #[test]
    fn change_suffix_dropped_first() {
        let q = quote("GOOGL", Price::Quoted(1234.56), ChangePercent::Known(12.345));
        assert_eq!(frame_text(&q, 14), "GOOGL 1234.56");
    }

    #[test]
    fn decimals_dropped_before_cutting_symbol() {
        let q = quote("GOOGL", Price::Quoted(1234.56), ChangePercent::Known(1.0));
        assert_eq!(frame_text(&q, 11), "GOOGL 1235");
        assert_eq!(frame_text(&q, 7), "GOOGL");
        assert_eq!(frame_text(&q, 3), "GOO");
        assert_eq!(frame_text(&q, 0), "");
    }

    #[test]
    fn icons_follow_trend_with_default_for_unknown() {
        let quotes = vec![
            quote("AAPL", Price::Quoted(1.0), ChangePercent::Known(1.0)),
            quote("TSLA", Price::Quoted(1.0), ChangePercent::Known(-1.0)),
            quote("MSFT", Price::Quoted(1.0), ChangePercent::Known(0.0)),
            ResolvedQuote::unavailable("GME".parse().unwrap()),
        ];
        let frames = render(&quotes, 25, &icons());
        let ids: Vec<u32> = frames.iter().map(|f| f.icon.get()).collect();
        assert_eq!(ids, [100, 200, 300, 42844]);
        let orders: Vec<usize> = frames.iter().map(|f| f.order).collect();
        assert_eq!(orders, [0, 1, 2, 3]);
    }

    #[test]
    fn status_frame_is_first_and_shifts_tickers() {
        let quotes = vec![
            quote("AAPL", Price::Quoted(1.0), ChangePercent::Known(1.0)),
            ResolvedQuote::unavailable("GME".parse().unwrap()),
        ];
        let frames = render_with_status(&quotes, 25, &icons());
        assert_eq!(frames.len(), 3);
        assert_eq!(frames[0].text, "Market: 1 N/A");
        assert_eq!(frames[0].icon, DEFAULT_ICON);
        let orders: Vec<usize> = frames.iter().map(|f| f.order).collect();
        assert_eq!(orders, [0, 1, 2]);
        assert!(frames[1].text.starts_with("AAPL"));
    }

    #[test]
    fn status_ok_when_all_prices_present() {
        let quotes = vec![quote("AAPL", Price::Quoted(0.0), ChangePercent::Unknown)];
        assert_eq!(MarketStatus::from_quotes(&quotes).text(), "Market: OK");
        let frames = render_with_status(&quotes, 6, &icons());
        assert_eq!(frames[0].text, "Market");
    }

    #[test]
    fn every_frame_respects_budget() {
        let quotes = vec![
            quote("BRK.B", Price::Quoted(412_345.678), ChangePercent::Known(-12.5)),
            quote("AAPL", Price::Quoted(191.25), ChangePercent::Known(0.66)),
            ResolvedQuote::unavailable("NFLX".parse().unwrap()),
        ];
        for max_len in 0..30 {
            for frame in render_with_status(&quotes, max_len, &icons()) {
                assert!(frame.text.chars().count() <= max_len, "{:?} over {}", frame.text, max_len);
            }
        }
    }
}
