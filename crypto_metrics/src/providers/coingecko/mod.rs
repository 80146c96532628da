//! CoinGecko implementation of [`DataProvider`](crate::providers::DataProvider).

pub mod provider;
pub mod response;

pub use provider::CoinGeckoProvider;
