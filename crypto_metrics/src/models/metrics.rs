//! Derived rolling-window metrics for a price series.

use thiserror::Error;

use crate::models::bar::PriceBar;
use crate::models::pair::CoinPair;

#[derive(Debug, Error)]
pub enum WindowConfigError {
    #[error("Invalid {name} window: must be at least 1, got {amount}")]
    InvalidAmount { name: &'static str, amount: usize },
}

/// Window sizes the metrics are parameterized by.
///
/// `lookback` is the trailing window (W1), `lookahead` the forward window
/// (W2). Both must be strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowConfig {
    lookback: usize,
    lookahead: usize,
}

impl WindowConfig {
    pub fn new(lookback: usize, lookahead: usize) -> Result<Self, WindowConfigError> {
        if lookback == 0 {
            return Err(WindowConfigError::InvalidAmount {
                name: "lookback",
                amount: lookback,
            });
        }
        if lookahead == 0 {
            return Err(WindowConfigError::InvalidAmount {
                name: "lookahead",
                amount: lookahead,
            });
        }
        Ok(Self { lookback, lookahead })
    }

    pub fn lookback(&self) -> usize {
        self.lookback
    }

    pub fn lookahead(&self) -> usize {
        self.lookahead
    }
}

impl Default for WindowConfig {
    /// The reference parameterization: 7 days back, 5 days ahead.
    fn default() -> Self {
        Self {
            lookback: 7,
            lookahead: 5,
        }
    }
}

/// A [`PriceBar`] together with its derived rolling-window metrics.
///
/// Fields that can be undefined at series boundaries (forward-looking
/// extrema) or through a zero denominator (percentage deviations) are
/// `Option`s; the engine never drops rows, callers decide what to do with
/// partially defined ones.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricBar {
    pub bar: PriceBar,

    /// Max `high` over the trailing lookback window (current row included).
    pub high_last: f64,
    /// Min `low` over the trailing lookback window (current row included).
    pub low_last: f64,

    /// Rows between the current row and the most recent occurrence of
    /// `high_last` within the trailing window; 0 means the current row.
    pub days_since_high: usize,
    /// Same, for `low_last`.
    pub days_since_low: usize,

    /// Max `high` over up to `lookahead` rows strictly after the current one;
    /// `None` when no rows follow.
    pub high_next: Option<f64>,
    /// Min `low` over the same forward window.
    pub low_next: Option<f64>,

    /// `(close - high_last) / high_last * 100`; `None` on a zero extremum.
    pub pct_from_high_last: Option<f64>,
    pub pct_from_low_last: Option<f64>,
    /// `None` where `high_next` is undefined or zero.
    pub pct_from_high_next: Option<f64>,
    pub pct_from_low_next: Option<f64>,
}

/// A metrics table for one pair, carrying the windows it was computed with.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSeries {
    pub pair: CoinPair,
    pub windows: WindowConfig,
    pub bars: Vec<MetricBar>,
}

impl MetricSeries {
    /// Column names in export order, window sizes embedded as in the
    /// reference workbook (e.g. `High_Last_7_Days`).
    pub fn column_headers(&self) -> Vec<String> {
        let w1 = self.windows.lookback();
        let w2 = self.windows.lookahead();
        vec![
            "Date".to_string(),
            "Open".to_string(),
            "High".to_string(),
            "Low".to_string(),
            "Close".to_string(),
            format!("High_Last_{w1}_Days"),
            format!("Low_Last_{w1}_Days"),
            format!("Days_Since_High_Last_{w1}_Days"),
            format!("Days_Since_Low_Last_{w1}_Days"),
            format!("High_Next_{w2}_Days"),
            format!("Low_Next_{w2}_Days"),
            format!("%_Diff_From_High_Last_{w1}_Days"),
            format!("%_Diff_From_Low_Last_{w1}_Days"),
            format!("%_Diff_From_High_Next_{w2}_Days"),
            format!("%_Diff_From_Low_Next_{w2}_Days"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_windows_match_reference() {
        let windows = WindowConfig::default();
        assert_eq!(windows.lookback(), 7);
        assert_eq!(windows.lookahead(), 5);
    }

    #[test]
    fn zero_windows_are_rejected() {
        assert!(matches!(
            WindowConfig::new(0, 5),
            Err(WindowConfigError::InvalidAmount { name: "lookback", .. })
        ));
        assert!(matches!(
            WindowConfig::new(7, 0),
            Err(WindowConfigError::InvalidAmount { name: "lookahead", .. })
        ));
        assert!(WindowConfig::new(1, 1).is_ok());
    }

    #[test]
    fn headers_embed_window_sizes() {
        let series = MetricSeries {
            pair: CoinPair::new("bitcoin", "usd"),
            windows: WindowConfig::new(7, 5).unwrap(),
            bars: Vec::new(),
        };
        let headers = series.column_headers();
        assert_eq!(headers.len(), 15);
        assert!(headers.contains(&"High_Last_7_Days".to_string()));
        assert!(headers.contains(&"%_Diff_From_Low_Next_5_Days".to_string()));
    }
}
