//! Canonical in-memory representation of a daily price row.
//!
//! This struct is the standard output of every [`DataProvider`](crate::providers::DataProvider)
//! implementation and the input to the metrics engine.

use chrono::{DateTime, Utc};

use crate::models::pair::CoinPair;

/// A single synthesized OHLC row for a given timestamp.
///
/// These bars are derived from a plain close-price series: `open` is the
/// previous row's close, and `high`/`low` are the max/min of the current and
/// previous close. They are a smoothing artifact, not true intraday extremes,
/// so `high >= close >= low` does NOT hold in general.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceBar {
    /// The timestamp for this bar (UTC). Strictly increasing within a series.
    pub timestamp: DateTime<Utc>,

    /// Previous row's closing price.
    pub open: f64,

    /// Max of the current and previous close.
    pub high: f64,

    /// Min of the current and previous close.
    pub low: f64,

    /// Closing price.
    pub close: f64,
}

/// A complete, self-describing price series for a single trading pair.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    /// The pair this data represents (e.g. `bitcoin/usd`).
    pub pair: CoinPair,
    /// The collection of synthesized OHLC bars, oldest first.
    pub bars: Vec<PriceBar>,
}

impl PriceSeries {
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}
