//! Excel workbook sink for metrics tables.

use std::fs;
use std::path::PathBuf;

use async_trait::async_trait;
use rust_xlsxwriter::{Workbook, Worksheet};
use snafu::ResultExt;

use crate::io::sink::{DataSink, IoSnafu, SinkError, WorkbookSnafu};
use crate::models::metrics::{MetricBar, MetricSeries};

/// Writes a [`MetricSeries`] as a single worksheet in an xlsx workbook.
///
/// The sheet is named after the pair, carries one header row with the
/// window-parameterized column names, one data row per metric bar (undefined
/// fields stay blank), and columns sized to their content. An existing file
/// at the destination is overwritten.
pub struct XlsxSink {
    dest: PathBuf,
}

impl XlsxSink {
    pub fn new(dest: impl Into<PathBuf>) -> Self {
        Self { dest: dest.into() }
    }
}

#[async_trait]
impl DataSink for XlsxSink {
    type Output = PathBuf;

    async fn write(&self, series: &MetricSeries) -> Result<PathBuf, SinkError> {
        if let Some(parent) = self.dest.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).context(IoSnafu)?;
            }
        }

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(series.pair.slug())
            .context(WorkbookSnafu)?;

        for (col, header) in series.column_headers().iter().enumerate() {
            worksheet
                .write_string(0, col as u16, header)
                .context(WorkbookSnafu)?;
        }

        for (i, bar) in series.bars.iter().enumerate() {
            write_row(worksheet, i as u32 + 1, bar)?;
        }

        worksheet.autofit();
        workbook.save(&self.dest).context(WorkbookSnafu)?;

        Ok(self.dest.clone())
    }
}

fn write_row(worksheet: &mut Worksheet, row: u32, m: &MetricBar) -> Result<(), SinkError> {
    let date = m.bar.timestamp.format("%Y-%m-%d %H:%M:%S").to_string();
    worksheet.write_string(row, 0, &date).context(WorkbookSnafu)?;

    let required = [
        m.bar.open,
        m.bar.high,
        m.bar.low,
        m.bar.close,
        m.high_last,
        m.low_last,
        m.days_since_high as f64,
        m.days_since_low as f64,
    ];
    // Columns 5..9 interleave with the optional ones below, so the column
    // index is tracked explicitly against the header order.
    let cells: [(u16, Option<f64>); 14] = [
        (1, Some(required[0])),
        (2, Some(required[1])),
        (3, Some(required[2])),
        (4, Some(required[3])),
        (5, Some(required[4])),
        (6, Some(required[5])),
        (7, Some(required[6])),
        (8, Some(required[7])),
        (9, m.high_next),
        (10, m.low_next),
        (11, m.pct_from_high_last),
        (12, m.pct_from_low_last),
        (13, m.pct_from_high_next),
        (14, m.pct_from_low_next),
    ];

    for (col, value) in cells {
        if let Some(value) = value {
            worksheet.write_number(row, col, value).context(WorkbookSnafu)?;
        }
    }
    Ok(())
}
