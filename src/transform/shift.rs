//! Additive offsets that make target columns strictly positive.

use serde::{Deserialize, Serialize};

/// When a column is shifted before the power transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShiftRule {
    /// Shift only columns whose minimum is `<= 0`, up to the target.
    #[default]
    NonPositive,
    /// Shift any column whose minimum is below the target.
    BelowTarget,
}

impl ShiftRule {
    /// Offset for a column with minimum `min`, given the shift target.
    pub fn offset(&self, min: f64, target: f64) -> f64 {
        match self {
            ShiftRule::NonPositive if min <= 0.0 => target - min,
            ShiftRule::NonPositive => 0.0,
            ShiftRule::BelowTarget => (target - min).max(0.0),
        }
    }
}

/// Smallest value in a column.
pub fn column_min(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::INFINITY, f64::min)
}

/// Ordered mapping from target name to its offset, fixed at fit time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetShiftMap {
    entries: Vec<(String, f64)>,
}

impl TargetShiftMap {
    pub(crate) fn from_entries(entries: Vec<(String, f64)>) -> Self {
        Self { entries }
    }

    /// Offset recorded for `name`.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|&(_, offset)| offset)
    }

    /// Offsets in target order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(n, o)| (n.as_str(), *o))
    }

    /// Number of targets.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
