//! Fetches historical cryptocurrency prices, derives rolling-window metrics,
//! persists them to an Excel workbook and fits a linear model over them.
//!
//! The interesting part lives in [`metrics::calculate_metrics`]; everything
//! else is a thin, typed layer over the CoinGecko API, the xlsx writer and an
//! ordinary least-squares fit.

pub mod errors;
pub mod io;
pub mod metrics;
pub mod models;
pub mod predict;
pub mod providers;
