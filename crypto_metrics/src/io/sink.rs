use async_trait::async_trait;
use snafu::{Backtrace, Snafu};

use crate::models::metrics::MetricSeries;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum SinkError {
    /// The workbook writer rejected the data or failed to save the file.
    #[snafu(display("Failed to write workbook: {source}"))]
    Workbook {
        source: rust_xlsxwriter::XlsxError,
        backtrace: Backtrace,
    },

    /// A generic I/O error (e.g. creating the destination directory).
    #[snafu(display("I/O error: {source}"))]
    Io {
        source: std::io::Error,
        backtrace: Backtrace,
    },
}

#[async_trait]
pub trait DataSink {
    /// The type of output returned after a successful write operation.
    ///
    /// This keeps the trait flexible: a file sink returns the path it wrote,
    /// a database sink might return the number of rows inserted.
    type Output;

    /// Persists a full metrics table to the destination.
    ///
    /// Writing the same destination twice replaces the previous contents.
    async fn write(&self, series: &MetricSeries) -> Result<Self::Output, SinkError>;
}
