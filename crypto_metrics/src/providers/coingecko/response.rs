use serde::Deserialize;

/// One `[timestamp_ms, price]` entry from the `prices` array.
///
/// The API encodes each point as a two-element JSON array, which serde maps
/// onto a tuple struct.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct PricePoint(pub i64, pub f64);

impl PricePoint {
    pub fn timestamp_ms(&self) -> i64 {
        self.0
    }

    pub fn price(&self) -> f64 {
        self.1
    }
}

/// Body of `GET /coins/{id}/market_chart/range`.
///
/// The endpoint also returns `market_caps` and `total_volumes` arrays; only
/// `prices` is consumed here.
#[derive(Deserialize, Debug)]
pub struct MarketChartResponse {
    pub prices: Vec<PricePoint>,
}
