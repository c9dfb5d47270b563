//! Multi-output polynomial regression on a scalar time index.
//!
//! Expands `t` into `[1, u, u^2, ..., u^degree]` with
//! `u = (t - center) / scale` and fits every target column with one shared
//! least squares solve. The rescaling keeps year-sized inputs well
//! conditioned without changing the fitted polynomial.

use crate::error::{ForecastError, Result};
use crate::utils::ols::{ols_fit, ols_predict};

/// Fitted polynomial regression.
#[derive(Debug, Clone, PartialEq)]
pub struct PolynomialRegression {
    degree: usize,
    center: f64,
    scale: f64,
    /// coefficients[target][power], lowest power first
    coefficients: Vec<Vec<f64>>,
}

impl PolynomialRegression {
    /// Fit one polynomial per target column.
    ///
    /// # Arguments
    /// * `time` - Time index per training row
    /// * `targets` - Target columns, each aligned with `time`
    /// * `degree` - Polynomial degree (>= 1)
    pub fn fit(time: &[f64], targets: &[Vec<f64>], degree: usize) -> Result<Self> {
        if degree == 0 {
            return Err(ForecastError::InvalidParameter(
                "polynomial degree must be at least 1".into(),
            ));
        }
        if targets.is_empty() {
            return Err(ForecastError::InvalidParameter(
                "at least one target column is required".into(),
            ));
        }
        let needed = degree + 1;
        if time.len() < needed {
            return Err(ForecastError::InsufficientData {
                needed,
                got: time.len(),
            });
        }
        if time.iter().any(|t| !t.is_finite()) {
            return Err(ForecastError::InvalidParameter(
                "time values must be finite".into(),
            ));
        }

        let center = time.iter().sum::<f64>() / time.len() as f64;
        let spread = time.iter().map(|t| (t - center).abs()).fold(0.0, f64::max);
        let scale = if spread > 0.0 { spread } else { 1.0 };

        let mut model = Self {
            degree,
            center,
            scale,
            coefficients: Vec::new(),
        };
        let design = model.design(time);
        model.coefficients = ols_fit(&design, targets)?;
        Ok(model)
    }

    /// Predict every target at the given time values: result[target][row].
    ///
    /// Time values outside the training range are extrapolated.
    pub fn predict(&self, time: &[f64]) -> Vec<Vec<f64>> {
        let design = self.design(time);
        self.coefficients
            .iter()
            .map(|beta| ols_predict(&design, beta))
            .collect()
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn num_targets(&self) -> usize {
        self.coefficients.len()
    }

    fn design(&self, time: &[f64]) -> Vec<Vec<f64>> {
        time.iter()
            .map(|&t| {
                let u = (t - self.center) / self.scale;
                let mut row = Vec::with_capacity(self.degree + 1);
                let mut power = 1.0;
                for _ in 0..=self.degree {
                    row.push(power);
                    power *= u;
                }
                row
            })
            .collect()
    }
}
