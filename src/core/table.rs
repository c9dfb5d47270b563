//! Observation table: yearly rows with named numeric target columns.

use crate::error::{ForecastError, Result};
use serde::Serialize;
use std::collections::HashSet;

/// Parse a raw cell into a number.
///
/// Blank or unparseable cells become `NaN`, which is treated as missing.
pub fn parse_cell(cell: &str) -> f64 {
    cell.trim().parse::<f64>().unwrap_or(f64::NAN)
}

/// Ordered, year-indexed table of target observations.
///
/// Rows are always sorted ascending by year and years are unique.
/// Columns keep the order in which they were supplied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObservationTable {
    years: Vec<i32>,
    names: Vec<String>,
    /// values[column][row]
    values: Vec<Vec<f64>>,
}

impl ObservationTable {
    /// Create a table from a year list and named target columns.
    ///
    /// Rows may arrive in any order; they are sorted by year here.
    pub fn new(years: Vec<i32>, targets: Vec<(String, Vec<f64>)>) -> Result<Self> {
        if targets.is_empty() {
            return Err(ForecastError::InvalidParameter(
                "at least one target column is required".into(),
            ));
        }

        let mut seen = HashSet::new();
        for (name, column) in &targets {
            if name.trim().is_empty() {
                return Err(ForecastError::InvalidParameter(
                    "target column names must not be empty".into(),
                ));
            }
            if !seen.insert(name.as_str()) {
                return Err(ForecastError::InvalidParameter(format!(
                    "duplicate target column '{}'",
                    name
                )));
            }
            if column.len() != years.len() {
                return Err(ForecastError::DimensionMismatch {
                    expected: years.len(),
                    got: column.len(),
                });
            }
        }

        let mut order: Vec<usize> = (0..years.len()).collect();
        order.sort_by_key(|&i| years[i]);

        for pair in order.windows(2) {
            if years[pair[0]] == years[pair[1]] {
                return Err(ForecastError::DuplicateYear(years[pair[0]]));
            }
        }

        let sorted_years: Vec<i32> = order.iter().map(|&i| years[i]).collect();
        let (names, values): (Vec<String>, Vec<Vec<f64>>) = targets
            .into_iter()
            .map(|(name, column)| {
                let sorted: Vec<f64> = order.iter().map(|&i| column[i]).collect();
                (name, sorted)
            })
            .unzip();

        Ok(Self {
            years: sorted_years,
            names,
            values,
        })
    }

    /// Start building a table column by column.
    pub fn builder() -> ObservationTableBuilder {
        ObservationTableBuilder::default()
    }

    /// Years in ascending order.
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    /// Target names in supplied order.
    pub fn target_names(&self) -> &[String] {
        &self.names
    }

    /// Values of a target column, aligned with [`years`](Self::years).
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| self.values[i].as_slice())
    }

    /// All columns in supplied order.
    pub fn columns(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.names
            .iter()
            .zip(self.values.iter())
            .map(|(n, v)| (n.as_str(), v.as_slice()))
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    pub fn num_targets(&self) -> usize {
        self.names.len()
    }

    /// Most recent year in the table.
    pub fn last_year(&self) -> Option<i32> {
        self.years.last().copied()
    }

    /// Index of the first row with `year >= start_year`.
    pub(crate) fn window_start(&self, start_year: i32) -> usize {
        self.years.partition_point(|&y| y < start_year)
    }
}

/// Builder for [`ObservationTable`].
///
/// # Example
///
/// ```
/// use sectorcast::core::ObservationTable;
///
/// let table = ObservationTable::builder()
///     .years(vec![2021, 2020, 2022])
///     .target("energy", vec![11.0, 10.0, 12.5])
///     .raw_target("retail", &["3.1", " 2.9", "n/a"])
///     .build()
///     .unwrap();
///
/// assert_eq!(table.years(), &[2020, 2021, 2022]);
/// assert!(table.column("retail").unwrap()[2].is_nan());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ObservationTableBuilder {
    years: Vec<i32>,
    targets: Vec<(String, Vec<f64>)>,
}

impl ObservationTableBuilder {
    pub fn years(mut self, years: Vec<i32>) -> Self {
        self.years = years;
        self
    }

    pub fn target(mut self, name: impl Into<String>, values: Vec<f64>) -> Self {
        self.targets.push((name.into(), values));
        self
    }

    /// Add a column of raw cells, coercing each with [`parse_cell`].
    pub fn raw_target<S: AsRef<str>>(mut self, name: impl Into<String>, cells: &[S]) -> Self {
        let values = cells.iter().map(|c| parse_cell(c.as_ref())).collect();
        self.targets.push((name.into(), values));
        self
    }

    pub fn build(self) -> Result<ObservationTable> {
        ObservationTable::new(self.years, self.targets)
    }
}
