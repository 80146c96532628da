use chrono::{NaiveDate, NaiveTime};
use log::{error, info};

use crypto_metrics::errors::Error;
use crypto_metrics::io::sink::DataSink;
use crypto_metrics::io::workbook::XlsxSink;
use crypto_metrics::metrics::calculate_metric_series;
use crypto_metrics::models::bar::PriceSeries;
use crypto_metrics::models::metrics::WindowConfig;
use crypto_metrics::models::pair::CoinPair;
use crypto_metrics::models::request_params::RangeRequest;
use crypto_metrics::predict::trainer::{self, FeatureVector};
use crypto_metrics::providers::DataProvider;
use crypto_metrics::providers::coingecko::CoinGeckoProvider;

/// Fetches the price history for `pair` from `start_date` (clipped by the
/// provider to its maximum span) through now.
async fn fetch_prices(pair: &str, start_date: &str) -> Result<PriceSeries, Error> {
    let pair: CoinPair = pair.parse()?;
    let start = NaiveDate::parse_from_str(start_date, "%Y-%m-%d")?
        .and_time(NaiveTime::MIN)
        .and_utc();

    let provider = CoinGeckoProvider::from_env()?;
    let series = provider.fetch_daily(RangeRequest { pair, start }).await?;
    Ok(series)
}

#[tokio::main]
async fn main() {
    env_logger::init();

    // The reference invocation: bitcoin/usd from 2023-01-01 (the provider
    // clips this to the last 14 days), 7-day lookback, 5-day lookahead.
    let pair = "bitcoin/usd";
    let start_date = "2023-01-01";
    let windows = WindowConfig::default();
    let output = "Crypto_Historical_Data.xlsx";

    println!("\n--- Step 1: Fetching Price History ---");
    let series = match fetch_prices(pair, start_date).await {
        Ok(series) => series,
        Err(e) => {
            error!("Error retrieving data: {e}");
            return;
        }
    };
    if series.is_empty() {
        info!("No data available for {} since {start_date}", series.pair);
        return;
    }
    println!("Fetched {} rows for {}", series.bars.len(), series.pair);

    println!("\n--- Step 2: Calculating Metrics ---");
    let metrics = calculate_metric_series(series.pair.clone(), &series.bars, windows);
    println!(
        "Computed {} metric rows ({}-day lookback, {}-day lookahead)",
        metrics.bars.len(),
        windows.lookback(),
        windows.lookahead()
    );

    println!("\n--- Step 3: Saving Workbook ---");
    match XlsxSink::new(output).write(&metrics).await {
        Ok(path) => println!("Data successfully saved to {}", path.display()),
        Err(e) => error!("Error saving workbook: {e}"),
    }

    println!("\n--- Step 4: Training Model ---");
    match trainer::train_model(&metrics) {
        Ok(report) => {
            println!(
                "Fit on {} rows; held-out ({} rows) r² = {:.4}, mse = {:.4}",
                report.train_rows, report.test_rows, report.r_squared, report.mse
            );

            let sample = FeatureVector {
                days_since_high: 2.0,
                pct_from_high_last: -1.5,
                days_since_low: 4.0,
                pct_from_low_last: 3.0,
            };
            match trainer::predict_outcome(&report.model, &sample) {
                Ok(prediction) => println!(
                    "Sample prediction: {prediction:.4}% from the next {}-day high",
                    windows.lookahead()
                ),
                Err(e) => error!("Error predicting sample outcome: {e}"),
            }
        }
        Err(e) => error!("Error training model: {e}"),
    }
}
