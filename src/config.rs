//! Numeric policy for a forecasting run.

use crate::error::{ForecastError, Result};
use crate::transform::ShiftRule;
use serde::{Deserialize, Serialize};

/// Default lower bound applied to `lambda * y + 1` before inverting Box-Cox.
pub const DEFAULT_CLAMP_FLOOR: f64 = 1e-9;

/// Default smallest value a shifted target column is moved up to.
pub const DEFAULT_SHIFT_TARGET: f64 = 1.0;

/// Largest lambda magnitude accepted in `lambda_range`.
pub const MAX_LAMBDA_MAGNITUDE: f64 = 10.0;

/// Configuration for [`PolynomialForecaster`](crate::models::PolynomialForecaster).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecasterConfig {
    /// Floor for `lambda * y + 1` in the inverse transform.
    pub clamp_floor: f64,

    /// Minimum a shifted column is raised to.
    pub shift_target: f64,

    /// When a column gets shifted.
    pub shift_rule: ShiftRule,

    /// Inclusive search range for the Box-Cox lambda.
    pub lambda_range: (f64, f64),
}

impl Default for ForecasterConfig {
    fn default() -> Self {
        Self {
            clamp_floor: DEFAULT_CLAMP_FLOOR,
            shift_target: DEFAULT_SHIFT_TARGET,
            shift_rule: ShiftRule::default(),
            lambda_range: (-2.0, 2.0),
        }
    }
}

impl ForecasterConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the floor for `lambda * y + 1` in the inverse transform.
    pub fn with_clamp_floor(mut self, floor: f64) -> Self {
        self.clamp_floor = floor;
        self
    }

    /// Set the minimum a shifted column is raised to.
    pub fn with_shift_target(mut self, target: f64) -> Self {
        self.shift_target = target;
        self
    }

    /// Set when a column gets shifted.
    pub fn with_shift_rule(mut self, rule: ShiftRule) -> Self {
        self.shift_rule = rule;
        self
    }

    /// Set the inclusive lambda search range.
    pub fn with_lambda_range(mut self, low: f64, high: f64) -> Self {
        self.lambda_range = (low, high);
        self
    }

    /// Check that every constant is usable.
    pub fn validate(&self) -> Result<()> {
        if !(self.clamp_floor.is_finite() && self.clamp_floor > 0.0) {
            return Err(ForecastError::InvalidParameter(format!(
                "clamp_floor must be positive and finite, got {}",
                self.clamp_floor
            )));
        }
        if !(self.shift_target.is_finite() && self.shift_target > 0.0) {
            return Err(ForecastError::InvalidParameter(format!(
                "shift_target must be positive and finite, got {}",
                self.shift_target
            )));
        }
        let (low, high) = self.lambda_range;
        if !(low.is_finite() && high.is_finite() && low < high) {
            return Err(ForecastError::InvalidParameter(format!(
                "lambda_range must be an ordered finite interval, got ({}, {})",
                low, high
            )));
        }
        if low.abs() > MAX_LAMBDA_MAGNITUDE || high.abs() > MAX_LAMBDA_MAGNITUDE {
            return Err(ForecastError::InvalidParameter(format!(
                "lambda_range must lie within [-{m}, {m}], got ({}, {})",
                low,
                high,
                m = MAX_LAMBDA_MAGNITUDE
            )));
        }
        Ok(())
    }
}
