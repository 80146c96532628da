//! Training and inference over metrics tables.
//!
//! The model predicts the deviation from the upcoming high
//! (`pct_from_high_next`) out of four trailing-window features. The
//! reference pipeline never trained a counterpart for the upcoming low, and
//! nothing here assumes the two would behave symmetrically.

use log::debug;
use ndarray::{Array1, Array2};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::models::metrics::{MetricBar, MetricSeries};
use crate::predict::ModelError;
use crate::predict::linear::LinearRegression;

/// Held-out fraction of the defined rows.
pub const TEST_FRACTION: f64 = 0.2;

/// Fixed shuffle seed so a given table always produces the same split.
pub const SPLIT_SEED: u64 = 42;

const FEATURE_COUNT: usize = 4;

/// One observation's features, in the fixed order the model was fitted with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector {
    pub days_since_high: f64,
    pub pct_from_high_last: f64,
    pub days_since_low: f64,
    pub pct_from_low_last: f64,
}

impl FeatureVector {
    pub fn as_array(&self) -> [f64; FEATURE_COUNT] {
        [
            self.days_since_high,
            self.pct_from_high_last,
            self.days_since_low,
            self.pct_from_low_last,
        ]
    }

    /// Extracts the features and target from one metric row; `None` when any
    /// of them is undefined (e.g. the final row's forward deviation).
    fn from_bar(bar: &MetricBar) -> Option<(Self, f64)> {
        let features = Self {
            days_since_high: bar.days_since_high as f64,
            pct_from_high_last: bar.pct_from_high_last?,
            days_since_low: bar.days_since_low as f64,
            pct_from_low_last: bar.pct_from_low_last?,
        };
        Some((features, bar.pct_from_high_next?))
    }
}

/// A fitted model together with its held-out evaluation.
#[derive(Debug)]
pub struct ModelReport {
    pub model: LinearRegression,
    /// Coefficient of determination on the held-out partition.
    pub r_squared: f64,
    /// Mean squared error on the held-out partition.
    pub mse: f64,
    pub train_rows: usize,
    pub test_rows: usize,
}

/// Fits a linear model predicting `pct_from_high_next` from the four
/// trailing-window features, on a seeded shuffled 80/20 split.
///
/// Rows with any undefined feature or target are excluded before the split.
pub fn train_model(series: &MetricSeries) -> Result<ModelReport, ModelError> {
    let rows: Vec<(FeatureVector, f64)> = series
        .bars
        .iter()
        .filter_map(FeatureVector::from_bar)
        .collect();

    let skipped = series.bars.len() - rows.len();
    if skipped > 0 {
        debug!("excluded {skipped} rows with undefined features or target from training");
    }

    let n = rows.len();
    if n < 2 {
        return Err(ModelError::InsufficientData { rows: n });
    }

    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(SPLIT_SEED);
    indices.shuffle(&mut rng);

    // At least one held-out row, and at least one training row.
    let n_test = ((n as f64 * TEST_FRACTION).ceil() as usize).clamp(1, n - 1);
    let (test_idx, train_idx) = indices.split_at(n_test);

    let (x_train, y_train) = to_arrays(&rows, train_idx);
    let (x_test, y_test) = to_arrays(&rows, test_idx);

    let model = LinearRegression::fit(&x_train, &y_train)?;
    let predictions = model.predict(&x_test)?;
    let r_squared = model.score(&x_test, &y_test)?;
    let mse = mean_squared_error(&y_test, &predictions);

    Ok(ModelReport {
        model,
        r_squared,
        mse,
        train_rows: train_idx.len(),
        test_rows: test_idx.len(),
    })
}

/// Predicts the deviation from the upcoming high for one feature vector.
pub fn predict_outcome(model: &LinearRegression, input: &FeatureVector) -> Result<f64, ModelError> {
    model.predict_one(&input.as_array())
}

fn to_arrays(rows: &[(FeatureVector, f64)], indices: &[usize]) -> (Array2<f64>, Array1<f64>) {
    let mut x = Array2::<f64>::zeros((indices.len(), FEATURE_COUNT));
    let mut y = Array1::<f64>::zeros(indices.len());
    for (row, &idx) in indices.iter().enumerate() {
        let (features, target) = &rows[idx];
        for (col, value) in features.as_array().into_iter().enumerate() {
            x[[row, col]] = value;
        }
        y[row] = *target;
    }
    (x, y)
}

fn mean_squared_error(actual: &Array1<f64>, predicted: &Array1<f64>) -> f64 {
    actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).powi(2))
        .sum::<f64>()
        / actual.len() as f64
}
