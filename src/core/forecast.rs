//! Forecast result structure for holding predictions.

use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};

/// Year-indexed predictions in the original scale of each target.
///
/// Deserializing goes through [`ForecastTable::new`], so a payload with
/// misaligned columns is rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawForecastTable")]
pub struct ForecastTable {
    years: Vec<i32>,
    names: Vec<String>,
    /// values[target][step]
    values: Vec<Vec<f64>>,
}

#[derive(Deserialize)]
struct RawForecastTable {
    years: Vec<i32>,
    names: Vec<String>,
    values: Vec<Vec<f64>>,
}

impl TryFrom<RawForecastTable> for ForecastTable {
    type Error = ForecastError;

    fn try_from(raw: RawForecastTable) -> Result<Self> {
        Self::new(raw.years, raw.names, raw.values)
    }
}

impl ForecastTable {
    /// Create a forecast table from aligned columns.
    pub fn new(years: Vec<i32>, names: Vec<String>, values: Vec<Vec<f64>>) -> Result<Self> {
        if names.len() != values.len() {
            return Err(ForecastError::DimensionMismatch {
                expected: names.len(),
                got: values.len(),
            });
        }
        if let Some(bad) = values.iter().find(|c| c.len() != years.len()) {
            return Err(ForecastError::DimensionMismatch {
                expected: years.len(),
                got: bad.len(),
            });
        }
        Ok(Self {
            years,
            names,
            values,
        })
    }

    /// Forecast years, ascending.
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    /// Target names in fit order.
    pub fn target_names(&self) -> &[String] {
        &self.names
    }

    /// Number of forecast rows.
    pub fn horizon(&self) -> usize {
        self.years.len()
    }

    /// Whether the table has no forecast rows.
    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    /// Predictions for a single target.
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| self.values[i].as_slice())
    }

    /// All prediction columns: values[target][step].
    pub fn columns(&self) -> &[Vec<f64>] {
        &self.values
    }

    /// Prediction for one target in one year.
    pub fn value(&self, year: i32, name: &str) -> Option<f64> {
        let step = self.years.iter().position(|&y| y == year)?;
        self.column(name).map(|c| c[step])
    }

    /// Row `index` as (year, values in target order).
    pub fn row(&self, index: usize) -> Option<(i32, Vec<f64>)> {
        let year = *self.years.get(index)?;
        Some((year, self.values.iter().map(|c| c[index]).collect()))
    }
}
