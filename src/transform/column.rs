//! Per-column reversible power transform.
//!
//! Each target column gets its own [`ColumnTransform`]. Constant columns
//! cannot be Box-Cox transformed, so they are encoded as zeros and decode
//! back to the recorded constant.

use super::boxcox::{boxcox, boxcox_lambda, inv_boxcox, LAMBDA_ZERO_TOL};
use serde::{Deserialize, Serialize};

/// How one target column was encoded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ColumnTransform {
    /// Zero-variance column; decodes to `value` everywhere.
    DegenerateConstant { value: f64 },
    /// Box-Cox transform with the fitted lambda.
    PowerTransform { lambda: f64 },
}

impl ColumnTransform {
    /// Lambda of a power-transformed column.
    pub fn lambda(&self) -> Option<f64> {
        match *self {
            ColumnTransform::PowerTransform { lambda } => Some(lambda),
            ColumnTransform::DegenerateConstant { .. } => None,
        }
    }

    /// Whether the column was constant and skipped the transform.
    pub fn is_degenerate(&self) -> bool {
        matches!(self, ColumnTransform::DegenerateConstant { .. })
    }

    /// Map encoded values back to the (shifted) input scale.
    ///
    /// `floor` bounds `lambda * y + 1` from below; see [`inv_boxcox`].
    pub fn decode(&self, encoded: &[f64], floor: f64) -> Vec<f64> {
        match *self {
            ColumnTransform::DegenerateConstant { value } => vec![value; encoded.len()],
            ColumnTransform::PowerTransform { lambda } => {
                let lambda = if lambda.abs() < LAMBDA_ZERO_TOL {
                    0.0
                } else {
                    lambda
                };
                inv_boxcox(encoded, lambda, floor)
            }
        }
    }
}

/// Encode a strictly positive column.
///
/// Columns with a single distinct value skip the transform and come back
/// as zeros tagged [`ColumnTransform::DegenerateConstant`].
pub fn encode(values: &[f64], lambda_range: (f64, f64)) -> (Vec<f64>, ColumnTransform) {
    let first = values.first().copied().unwrap_or(0.0);
    if values.iter().all(|&v| v == first) {
        return (
            vec![0.0; values.len()],
            ColumnTransform::DegenerateConstant { value: first },
        );
    }

    let lambda = boxcox_lambda(values, lambda_range.0, lambda_range.1);
    (boxcox(values, lambda), ColumnTransform::PowerTransform { lambda })
}

/// Ordered mapping from target name to its transform, fixed at fit time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransformParameters {
    entries: Vec<(String, ColumnTransform)>,
}

impl TransformParameters {
    pub(crate) fn from_entries(entries: Vec<(String, ColumnTransform)>) -> Self {
        Self { entries }
    }

    /// Transform recorded for `name`.
    pub fn get(&self, name: &str) -> Option<&ColumnTransform> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, t)| t)
    }

    /// Fitted lambda, or `None` for unknown or degenerate columns.
    pub fn lambda(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(ColumnTransform::lambda)
    }

    /// Entries in target order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ColumnTransform)> {
        self.entries.iter().map(|(n, t)| (n.as_str(), t))
    }

    /// Number of targets.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
