//! The rolling-window metrics engine.
//!
//! Everything here is pure: given an ordered slice of [`PriceBar`]s and the
//! window sizes, it produces one [`MetricBar`] per input row. Rows whose
//! derived fields cannot be computed (no rows after the last one, zero
//! denominators) carry `None` instead of being dropped; discarding them is
//! the caller's decision.

use crate::models::bar::PriceBar;
use crate::models::metrics::{MetricBar, MetricSeries, WindowConfig};
use crate::models::pair::CoinPair;

/// Computes the rolling-window metrics for every row of `bars`.
///
/// Output length always equals input length, in the same order.
///
/// Per row `i` (windows `W1` lookback, `W2` lookahead):
/// - `high_last`/`low_last`: extrema over rows `[max(0, i-W1+1), i]` — the
///   trailing window is right-anchored on the current row and left-clamped,
///   so early rows aggregate over however much history exists.
/// - `days_since_high`/`days_since_low`: backward distance from row `i` to
///   the most recent row attaining the trailing extremum; ties resolve to
///   the later row, so 0 means the extremum is the current row.
/// - `high_next`/`low_next`: extrema over rows `[i+1, min(i+W2, len-1)]`;
///   the forward window shrinks at the series end and is `None` only when
///   no rows follow at all.
/// - percentage deviations: `(close - x) / x * 100`, `None` wherever the
///   extremum is undefined or exactly zero.
pub fn calculate_metrics(bars: &[PriceBar], windows: &WindowConfig) -> Vec<MetricBar> {
    let w1 = windows.lookback();
    let w2 = windows.lookahead();
    let len = bars.len();

    bars.iter()
        .enumerate()
        .map(|(i, bar)| {
            let start = i.saturating_sub(w1 - 1);
            let (high_last, high_idx) = trailing_max(bars, start, i, |b| b.high);
            let (low_last, low_idx) = trailing_min(bars, start, i, |b| b.low);

            let forward = &bars[(i + 1).min(len)..(i + 1 + w2).min(len)];
            let high_next = forward.iter().map(|b| b.high).fold(None, fold_max);
            let low_next = forward.iter().map(|b| b.low).fold(None, fold_min);

            MetricBar {
                bar: bar.clone(),
                high_last,
                low_last,
                days_since_high: i - high_idx,
                days_since_low: i - low_idx,
                high_next,
                low_next,
                pct_from_high_last: pct_deviation(bar.close, Some(high_last)),
                pct_from_low_last: pct_deviation(bar.close, Some(low_last)),
                pct_from_high_next: pct_deviation(bar.close, high_next),
                pct_from_low_next: pct_deviation(bar.close, low_next),
            }
        })
        .collect()
}

/// Convenience wrapper keeping the series self-describing.
pub fn calculate_metric_series(
    pair: CoinPair,
    bars: &[PriceBar],
    windows: WindowConfig,
) -> MetricSeries {
    MetricSeries {
        pair,
        bars: calculate_metrics(bars, &windows),
        windows,
    }
}

/// Max of `field` over `bars[start..=end]`, returning the value and the index
/// of its most recent occurrence (later rows win ties).
fn trailing_max(
    bars: &[PriceBar],
    start: usize,
    end: usize,
    field: impl Fn(&PriceBar) -> f64,
) -> (f64, usize) {
    let mut best = field(&bars[start]);
    let mut best_idx = start;
    for (idx, bar) in bars.iter().enumerate().take(end + 1).skip(start + 1) {
        let value = field(bar);
        if value >= best {
            best = value;
            best_idx = idx;
        }
    }
    (best, best_idx)
}

/// Min counterpart of [`trailing_max`], same tie-break direction.
fn trailing_min(
    bars: &[PriceBar],
    start: usize,
    end: usize,
    field: impl Fn(&PriceBar) -> f64,
) -> (f64, usize) {
    let mut best = field(&bars[start]);
    let mut best_idx = start;
    for (idx, bar) in bars.iter().enumerate().take(end + 1).skip(start + 1) {
        let value = field(bar);
        if value <= best {
            best = value;
            best_idx = idx;
        }
    }
    (best, best_idx)
}

fn fold_max(acc: Option<f64>, value: f64) -> Option<f64> {
    Some(match acc {
        Some(best) => best.max(value),
        None => value,
    })
}

fn fold_min(acc: Option<f64>, value: f64) -> Option<f64> {
    Some(match acc {
        Some(best) => best.min(value),
        None => value,
    })
}

/// `(close - extremum) / extremum * 100`.
///
/// An undefined extremum propagates, and an extremum of exactly zero yields
/// `None` rather than a division error.
fn pct_deviation(close: f64, extremum: Option<f64>) -> Option<f64> {
    match extremum {
        Some(x) if x != 0.0 => Some((close - x) / x * 100.0),
        _ => None,
    }
}
