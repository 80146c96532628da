use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use shared_utils::env::env_var_or;
use snafu::ResultExt;

use crate::{
    models::{bar::PriceBar, bar::PriceSeries, request_params::RangeRequest},
    providers::{
        ApiSnafu, ClientBuildSnafu, DataProvider, DecodeSnafu, ProviderError, ProviderInitError,
        ReqwestSnafu,
        coingecko::response::{MarketChartResponse, PricePoint},
    },
};

const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// Environment variable overriding the API base URL (useful for pointing the
/// provider at a mock server in tests).
pub const BASE_URL_ENV: &str = "COINGECKO_BASE_URL";

/// The keyless range endpoint rejects long ranges, so the requested span is
/// clipped to this many days back from "now".
const MAX_SPAN_DAYS: i64 = 14;

/// At most this many synthesized rows are kept (the trailing ones).
const MAX_ROWS: usize = 14;

pub struct CoinGeckoProvider {
    client: Client,
    base_url: String,
}

impl CoinGeckoProvider {
    /// Creates a provider against the given API base URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProviderInitError> {
        let client = Client::builder().build().context(ClientBuildSnafu)?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Creates a provider against the public API, honoring the
    /// [`BASE_URL_ENV`] override when set.
    pub fn from_env() -> Result<Self, ProviderInitError> {
        Self::new(env_var_or(BASE_URL_ENV, DEFAULT_BASE_URL))
    }
}

#[async_trait]
impl DataProvider for CoinGeckoProvider {
    async fn fetch_daily(&self, request: RangeRequest) -> Result<PriceSeries, ProviderError> {
        let to = Utc::now().timestamp();
        let from = clamp_start(request.start.timestamp(), to);

        let url = format!(
            "{}/coins/{}/market_chart/range",
            self.base_url, request.pair.base
        );
        let query = [
            ("vs_currency", request.pair.quote.clone()),
            ("from", from.to_string()),
            ("to", to.to_string()),
        ];

        let response = self
            .client
            .get(&url)
            .query(&query)
            .send()
            .await
            .context(ReqwestSnafu)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown API error".to_string());
            return ApiSnafu {
                message: format!("{status}: {body}"),
            }
            .fail();
        }

        let chart = response
            .json::<MarketChartResponse>()
            .await
            .context(DecodeSnafu)?;

        Ok(PriceSeries {
            pair: request.pair,
            bars: synthesize_bars(&chart.prices),
        })
    }
}

/// Clips `start` so the requested span never exceeds [`MAX_SPAN_DAYS`]
/// counting back from `now` (both unix seconds).
fn clamp_start(start: i64, now: i64) -> i64 {
    let max_span = MAX_SPAN_DAYS * 86_400;
    if now - start > max_span {
        now - max_span
    } else {
        start
    }
}

/// Synthesizes OHLC bars from raw close-price points.
///
/// Each point pairs with its predecessor: open is the previous close, and
/// high/low are the max/min of the two closes (a 2-point rolling window).
/// The first point has no predecessor and is dropped; at most the trailing
/// [`MAX_ROWS`] bars are kept.
fn synthesize_bars(points: &[PricePoint]) -> Vec<PriceBar> {
    let mut bars: Vec<PriceBar> = points
        .windows(2)
        .filter_map(|pair| {
            let (prev, cur) = (pair[0], pair[1]);
            let timestamp = DateTime::<Utc>::from_timestamp_millis(cur.timestamp_ms())?;
            Some(PriceBar {
                timestamp,
                open: prev.price(),
                high: prev.price().max(cur.price()),
                low: prev.price().min(cur.price()),
                close: cur.price(),
            })
        })
        .collect();

    if bars.len() > MAX_ROWS {
        bars.drain(..bars.len() - MAX_ROWS);
    }
    bars
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(prices: &[f64]) -> Vec<PricePoint> {
        prices
            .iter()
            .enumerate()
            .map(|(i, &p)| PricePoint(1_672_531_200_000 + i as i64 * 86_400_000, p))
            .collect()
    }

    #[test]
    fn start_within_span_is_untouched() {
        let now = 1_700_000_000;
        let start = now - 3 * 86_400;
        assert_eq!(clamp_start(start, now), start);
    }

    #[test]
    fn start_beyond_span_is_clipped() {
        let now = 1_700_000_000;
        let start = now - 90 * 86_400;
        assert_eq!(clamp_start(start, now), now - 14 * 86_400);
    }

    #[test]
    fn bars_chain_open_to_previous_close() {
        let bars = synthesize_bars(&points(&[10.0, 12.0, 11.0]));
        assert_eq!(bars.len(), 2);

        assert_eq!(bars[0].open, 10.0);
        assert_eq!(bars[0].close, 12.0);
        assert_eq!(bars[0].high, 12.0);
        assert_eq!(bars[0].low, 10.0);

        assert_eq!(bars[1].open, 12.0);
        assert_eq!(bars[1].close, 11.0);
        assert_eq!(bars[1].high, 12.0);
        assert_eq!(bars[1].low, 11.0);

        assert!(bars[0].timestamp < bars[1].timestamp);
    }

    #[test]
    fn short_inputs_produce_no_bars() {
        assert!(synthesize_bars(&[]).is_empty());
        assert!(synthesize_bars(&points(&[10.0])).is_empty());
    }

    #[test]
    fn only_trailing_rows_are_kept() {
        let prices: Vec<f64> = (0..40).map(|i| 100.0 + i as f64).collect();
        let bars = synthesize_bars(&points(&prices));
        assert_eq!(bars.len(), 14);
        // Last bar closes at the last input price.
        assert_eq!(bars.last().unwrap().close, 139.0);
        // First kept bar still chains to the close before it.
        assert_eq!(bars[0].open, bars[0].close - 1.0);
    }
}
