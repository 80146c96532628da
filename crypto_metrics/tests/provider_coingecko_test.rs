#![cfg(test)]
use chrono::{Duration, Utc};
use crypto_metrics::{
    models::request_params::RangeRequest,
    providers::{DataProvider, coingecko::CoinGeckoProvider},
};

#[tokio::test]
#[ignore]
async fn test_coingecko_provider_fetch_daily() {
    // Hits the live public API; run with `cargo test -- --ignored`.
    let provider = CoinGeckoProvider::from_env().expect("Failed to create CoinGeckoProvider");

    let request = RangeRequest {
        pair: "bitcoin/usd".parse().unwrap(),
        start: Utc::now() - Duration::days(10),
    };

    let result = provider.fetch_daily(request).await;
    assert!(result.is_ok(), "fetch_daily returned an error: {:?}", result.err());

    let series = result.unwrap();
    assert_eq!(series.pair.base, "bitcoin");
    assert!(!series.bars.is_empty(), "Expected at least one bar for bitcoin");
    assert!(series.bars.len() <= 14, "Expected at most 14 synthesized rows");

    // Rows are ordered and chained: open equals the previous close.
    for pair in series.bars.windows(2) {
        assert!(pair[0].timestamp < pair[1].timestamp);
        assert_eq!(pair[1].open, pair[0].close);
        assert!(pair[1].high >= pair[1].low);
    }
}
