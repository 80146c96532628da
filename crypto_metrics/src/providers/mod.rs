//! Provider abstraction for historical price data sources.
//!
//! This module defines the [`DataProvider`] trait, a unified interface for
//! fetching a pair's recent price history from any market-data vendor.
//!
//! Each concrete provider (currently only [`coingecko`]) implements
//! [`DataProvider`] to handle vendor-specific endpoint logic and the
//! synthesis of OHLC bars from the raw close-price points.
//!
//! The trait is designed for async usage and supports dynamic dispatch
//! (`dyn DataProvider`) for runtime selection of providers.
//!
//! # Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use crypto_metrics::models::{bar::PriceSeries, request_params::RangeRequest};
//! use crypto_metrics::providers::{DataProvider, ProviderError};
//!
//! struct MyProvider;
//!
//! #[async_trait]
//! impl DataProvider for MyProvider {
//!     async fn fetch_daily(
//!         &self,
//!         request: RangeRequest,
//!     ) -> Result<PriceSeries, ProviderError> {
//!         Ok(PriceSeries { pair: request.pair, bars: vec![] })
//!     }
//! }
//! ```

pub mod coingecko;

use async_trait::async_trait;
use snafu::{Backtrace, Snafu};

use crate::models::{bar::PriceSeries, request_params::RangeRequest};

/// Trait for fetching a historical price series from a market-data provider.
///
/// An `Ok` result with an empty series means "no data available for that
/// range" and is not an error.
#[async_trait]
pub trait DataProvider {
    /// Fetches the price history described by `request` and synthesizes the
    /// canonical OHLC bars from it.
    async fn fetch_daily(&self, request: RangeRequest) -> Result<PriceSeries, ProviderError>;
}

/// Errors that can occur during the creation of a provider instance.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderInitError {
    /// failed to init reqwest client
    #[snafu(display("Failed to build HTTP client: {source}"))]
    ClientBuild {
        source: reqwest::Error,
        backtrace: Backtrace,
    },
}

/// Errors that can occur within a `DataProvider` implementation.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderError {
    /// An error during an API request (e.g., network failure, timeout).
    #[snafu(display("API request failed: {source}"))]
    Reqwest {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// The provider's API returned a non-success status.
    #[snafu(display("API error: {message}"))]
    Api {
        message: String,
        backtrace: Backtrace,
    },

    /// The response body could not be decoded into the expected shape.
    #[snafu(display("Malformed API response: {source}"))]
    Decode {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// An error during provider configuration or initialization.
    #[snafu(display("Provider initialization error: {source}"))]
    Init {
        #[snafu(backtrace)]
        source: ProviderInitError,
    },
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use crate::models::pair::CoinPair;

    use super::*;

    struct CannedProvider;
    struct EmptyProvider;

    #[async_trait]
    impl DataProvider for CannedProvider {
        async fn fetch_daily(&self, request: RangeRequest) -> Result<PriceSeries, ProviderError> {
            Ok(PriceSeries {
                pair: request.pair,
                bars: vec![],
            })
        }
    }

    #[async_trait]
    impl DataProvider for EmptyProvider {
        async fn fetch_daily(&self, request: RangeRequest) -> Result<PriceSeries, ProviderError> {
            Ok(PriceSeries {
                pair: request.pair,
                bars: vec![],
            })
        }
    }

    fn get_provider(name: &str) -> Box<dyn DataProvider> {
        if name == "canned" {
            Box::new(CannedProvider)
        } else {
            Box::new(EmptyProvider)
        }
    }

    #[tokio::test]
    async fn providers_dispatch_dynamically() {
        let provider = get_provider("canned");

        let request = RangeRequest {
            pair: CoinPair::new("bitcoin", "usd"),
            start: Utc::now(),
        };

        let series = provider.fetch_daily(request).await.unwrap();
        assert!(series.is_empty());
    }
}
