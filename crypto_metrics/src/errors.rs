use thiserror::Error;

use crate::io::sink::SinkError;
use crate::models::metrics::WindowConfigError;
use crate::models::pair::PairParseError;
use crate::predict::ModelError;
use crate::providers::{ProviderError, ProviderInitError};

/// The unified error type for the `crypto_metrics` crate.
#[derive(Debug, Error)]
pub enum Error {
    /// An error originating from a data provider (network, API, decoding).
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Provider construction failed before any request was made.
    #[error("Provider setup error: {0}")]
    ProviderInit(#[from] ProviderInitError),

    /// An error originating from a data sink (e.g. workbook write).
    #[error("Sink error: {0}")]
    Sink(#[from] SinkError),

    /// An error while fitting or evaluating the prediction model.
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    /// A malformed trading-pair string.
    #[error("{0}")]
    Pair(#[from] PairParseError),

    /// A malformed start-date string.
    #[error("Invalid start date: {0}")]
    Date(#[from] chrono::ParseError),

    /// Rejected window sizes.
    #[error("{0}")]
    Window(#[from] WindowConfigError),
}
