//! Ordinary least squares linear regression.
//!
//! Fits via the normal equations (`β = (X'X)^(-1) X'y`) with a Cholesky
//! factorization; a fitted model is a plain value, so "not fitted yet" is
//! unrepresentable.

use ndarray::{Array1, Array2, Axis, s};

use crate::predict::ModelError;

/// A fitted linear model with an intercept term.
#[derive(Debug, Clone)]
pub struct LinearRegression {
    coefficients: Array1<f64>,
    intercept: f64,
}

impl LinearRegression {
    /// Fits the model to the given feature matrix and targets.
    pub fn fit(x: &Array2<f64>, y: &Array1<f64>) -> Result<Self, ModelError> {
        if x.nrows() != y.len() {
            return Err(ModelError::DimensionMismatch {
                expected: x.nrows(),
                got: y.len(),
            });
        }
        if x.nrows() == 0 {
            return Err(ModelError::InsufficientData { rows: 0 });
        }

        // Prepend a column of ones for the intercept.
        let ones = Array2::ones((x.nrows(), 1));
        let design = ndarray::concatenate(Axis(1), &[ones.view(), x.view()])
            .map_err(|e| ModelError::Computation(e.to_string()))?;

        let mut xtx = design.t().dot(&design);
        let xty = design.t().dot(y);

        // Tiny ridge term for numerical stability on near-collinear inputs.
        for i in 0..xtx.nrows() {
            xtx[[i, i]] += 1e-10;
        }

        let beta = cholesky_solve(&xtx, &xty)?;

        Ok(Self {
            intercept: beta[0],
            coefficients: beta.slice(s![1..]).to_owned(),
        })
    }

    pub fn coefficients(&self) -> &Array1<f64> {
        &self.coefficients
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Predicts one value per row of `x`.
    pub fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>, ModelError> {
        if x.ncols() != self.coefficients.len() {
            return Err(ModelError::DimensionMismatch {
                expected: self.coefficients.len(),
                got: x.ncols(),
            });
        }
        Ok(x.dot(&self.coefficients) + self.intercept)
    }

    /// Predicts a single value from one feature vector.
    pub fn predict_one(&self, features: &[f64]) -> Result<f64, ModelError> {
        if features.len() != self.coefficients.len() {
            return Err(ModelError::DimensionMismatch {
                expected: self.coefficients.len(),
                got: features.len(),
            });
        }
        let dot: f64 = features
            .iter()
            .zip(self.coefficients.iter())
            .map(|(f, c)| f * c)
            .sum();
        Ok(dot + self.intercept)
    }

    /// Coefficient of determination (R²) on the given data.
    ///
    /// Returns 0.0 for a constant target, where R² has no variance to
    /// explain.
    pub fn score(&self, x: &Array2<f64>, y: &Array1<f64>) -> Result<f64, ModelError> {
        if x.nrows() != y.len() {
            return Err(ModelError::DimensionMismatch {
                expected: x.nrows(),
                got: y.len(),
            });
        }
        let predictions = self.predict(x)?;
        let y_mean = y
            .mean()
            .ok_or_else(|| ModelError::Computation("empty target vector".to_string()))?;

        let ss_tot: f64 = y.iter().map(|&yi| (yi - y_mean).powi(2)).sum();
        let ss_res: f64 = y
            .iter()
            .zip(predictions.iter())
            .map(|(&yi, &pi)| (yi - pi).powi(2))
            .sum();

        if ss_tot == 0.0 {
            return Ok(0.0);
        }
        Ok(1.0 - ss_res / ss_tot)
    }
}

/// Solves `A x = b` for symmetric positive-definite `A` via Cholesky
/// (`A = L L'`), forward then backward substitution.
fn cholesky_solve(a: &Array2<f64>, b: &Array1<f64>) -> Result<Array1<f64>, ModelError> {
    let n = a.nrows();
    let mut l = Array2::<f64>::zeros((n, n));

    for i in 0..n {
        for j in 0..=i {
            let mut sum = 0.0;
            for k in 0..j {
                sum += l[[i, k]] * l[[j, k]];
            }

            if i == j {
                let diag = a[[i, i]] - sum;
                if diag <= 0.0 {
                    return Err(ModelError::SingularMatrix);
                }
                l[[i, j]] = diag.sqrt();
            } else {
                l[[i, j]] = (a[[i, j]] - sum) / l[[j, j]];
            }
        }
    }

    // L z = b
    let mut z = Array1::<f64>::zeros(n);
    for i in 0..n {
        let mut sum = 0.0;
        for j in 0..i {
            sum += l[[i, j]] * z[j];
        }
        z[i] = (b[i] - sum) / l[[i, i]];
    }

    // L' x = z
    let mut x = Array1::<f64>::zeros(n);
    for i in (0..n).rev() {
        let mut sum = 0.0;
        for j in (i + 1)..n {
            sum += l[[j, i]] * x[j];
        }
        x[i] = (z[i] - sum) / l[[i, i]];
    }

    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recovers_a_simple_line() {
        // y = 2 + 3x
        let x = Array2::from_shape_vec((5, 1), vec![1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        let y = Array1::from_vec(vec![5.0, 8.0, 11.0, 14.0, 17.0]);

        let model = LinearRegression::fit(&x, &y).unwrap();
        assert!((model.intercept() - 2.0).abs() < 1e-6);
        assert!((model.coefficients()[0] - 3.0).abs() < 1e-6);
        assert!((model.score(&x, &y).unwrap() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn recovers_multiple_coefficients() {
        // y = 1 + 2a + 3b over a non-degenerate grid.
        let mut rows = Vec::new();
        let mut targets = Vec::new();
        for a in 0..4 {
            for b in 0..4 {
                rows.extend([a as f64, b as f64]);
                targets.push(1.0 + 2.0 * a as f64 + 3.0 * b as f64);
            }
        }
        let x = Array2::from_shape_vec((16, 2), rows).unwrap();
        let y = Array1::from_vec(targets);

        let model = LinearRegression::fit(&x, &y).unwrap();
        let predictions = model.predict(&x).unwrap();
        for (pred, actual) in predictions.iter().zip(y.iter()) {
            assert!((pred - actual).abs() < 1e-4);
        }
    }

    #[test]
    fn predict_one_matches_matrix_predict() {
        let x = Array2::from_shape_vec((5, 1), vec![1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        let y = Array1::from_vec(vec![5.0, 8.0, 11.0, 14.0, 17.0]);
        let model = LinearRegression::fit(&x, &y).unwrap();

        let single = model.predict_one(&[2.5]).unwrap();
        assert!((single - 9.5).abs() < 1e-6);
    }

    #[test]
    fn rejects_mismatched_dimensions() {
        let x = Array2::from_shape_vec((3, 1), vec![1.0, 2.0, 3.0]).unwrap();
        let y = Array1::from_vec(vec![1.0, 2.0]);
        assert!(matches!(
            LinearRegression::fit(&x, &y),
            Err(ModelError::DimensionMismatch { .. })
        ));

        let y = Array1::from_vec(vec![1.0, 2.0, 3.0]);
        let model = LinearRegression::fit(&x, &y).unwrap();
        assert!(matches!(
            model.predict_one(&[1.0, 2.0]),
            Err(ModelError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn empty_input_is_insufficient() {
        let x = Array2::<f64>::zeros((0, 2));
        let y = Array1::<f64>::zeros(0);
        assert!(matches!(
            LinearRegression::fit(&x, &y),
            Err(ModelError::InsufficientData { .. })
        ));
    }
}
