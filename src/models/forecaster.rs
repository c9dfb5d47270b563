//! Box-Cox polynomial forecaster.
//!
//! Fits a shared polynomial trend on year to per-column Box-Cox transformed
//! targets, then forecasts by inverting the transform and removing the
//! positivity shift.
//!
//! # Example
//!
//! ```
//! use sectorcast::core::ObservationTable;
//! use sectorcast::models::PolynomialForecaster;
//!
//! let table = ObservationTable::builder()
//!     .years((2015..=2024).collect())
//!     .target("industry", vec![10.0, 11.0, 13.0, 14.0, 16.0, 17.0, 19.0, 21.0, 22.0, 24.0])
//!     .build()
//!     .unwrap();
//!
//! let mut model = PolynomialForecaster::default();
//! model.fit(&table, 2015, 2).unwrap();
//!
//! let forecast = model.forecast(3).unwrap();
//! assert_eq!(forecast.years(), &[2025, 2026, 2027]);
//! ```

use crate::config::ForecasterConfig;
use crate::core::{ForecastTable, ObservationTable};
use crate::error::{ForecastError, Result};
use crate::models::polynomial::PolynomialRegression;
use crate::transform::{column_min, encode, TargetShiftMap, TransformParameters};
use tracing::{debug, info};

/// Everything a fit produces. Never mutated after construction.
#[derive(Debug, Clone)]
struct FittedState {
    train_start_year: i32,
    degree: usize,
    training_years: Vec<i32>,
    last_year: i32,
    names: Vec<String>,
    shifts: TargetShiftMap,
    transforms: TransformParameters,
    regression: PolynomialRegression,
}

#[derive(Debug, Clone)]
enum ForecasterState {
    Untrained,
    Fitted(Box<FittedState>),
}

/// Forecaster over an [`ObservationTable`].
///
/// Each instance is fitted exactly once; refitting needs a new instance.
#[derive(Debug, Clone)]
pub struct PolynomialForecaster {
    config: ForecasterConfig,
    state: ForecasterState,
}

impl Default for PolynomialForecaster {
    fn default() -> Self {
        Self::new(ForecasterConfig::default())
    }
}

impl PolynomialForecaster {
    pub fn new(config: ForecasterConfig) -> Self {
        Self {
            config,
            state: ForecasterState::Untrained,
        }
    }

    pub fn config(&self) -> &ForecasterConfig {
        &self.config
    }

    /// Fit on rows with `year >= train_start_year`.
    ///
    /// # Errors
    /// * [`ForecastError::AlreadyFitted`] - this instance was fitted before
    /// * [`ForecastError::EmptyTrainingWindow`] - no rows in the window
    /// * [`ForecastError::InvalidTargetData`] - a missing value inside the window
    /// * [`ForecastError::InsufficientData`] - fewer than `degree + 1` rows
    pub fn fit(
        &mut self,
        table: &ObservationTable,
        train_start_year: i32,
        degree: usize,
    ) -> Result<()> {
        if self.is_fitted() {
            return Err(ForecastError::AlreadyFitted);
        }
        self.config.validate()?;
        if degree == 0 {
            return Err(ForecastError::InvalidParameter(
                "polynomial degree must be at least 1".into(),
            ));
        }

        let start = table.window_start(train_start_year);
        let training_years = table.years()[start..].to_vec();
        let last_year = match table.last_year() {
            Some(year) if !training_years.is_empty() => year,
            latest_year => {
                return Err(ForecastError::EmptyTrainingWindow {
                    start_year: train_start_year,
                    latest_year,
                })
            }
        };

        info!(
            rows = training_years.len(),
            train_start_year,
            targets = table.num_targets(),
            "selected training window"
        );

        let mut names = Vec::with_capacity(table.num_targets());
        let mut shifts = Vec::with_capacity(table.num_targets());
        let mut transforms = Vec::with_capacity(table.num_targets());
        let mut encoded_columns = Vec::with_capacity(table.num_targets());

        for (name, values) in table.columns() {
            let window = &values[start..];
            if window.iter().any(|v| !v.is_finite()) {
                return Err(ForecastError::InvalidTargetData {
                    column: name.to_string(),
                });
            }

            let offset = self
                .config
                .shift_rule
                .offset(column_min(window), self.config.shift_target);
            let shifted: Vec<f64> = window.iter().map(|v| v + offset).collect();
            if shifted.iter().any(|&v| !(v > 0.0 && v.is_finite())) {
                return Err(ForecastError::ComputationError(format!(
                    "shift of {} did not make column '{}' strictly positive",
                    offset, name
                )));
            }

            let (encoded, transform) = encode(&shifted, self.config.lambda_range);
            match transform.lambda() {
                Some(lambda) => debug!(column = name, offset, lambda, "encoded column"),
                None => debug!(column = name, offset, "constant column, transform skipped"),
            }

            names.push(name.to_string());
            shifts.push((name.to_string(), offset));
            transforms.push((name.to_string(), transform));
            encoded_columns.push(encoded);
        }

        let time: Vec<f64> = training_years.iter().map(|&y| f64::from(y)).collect();
        let regression = PolynomialRegression::fit(&time, &encoded_columns, degree)?;

        info!(degree, "fitted polynomial model on Box-Cox transformed targets");

        self.state = ForecasterState::Fitted(Box::new(FittedState {
            train_start_year,
            degree,
            training_years,
            last_year,
            names,
            shifts: TargetShiftMap::from_entries(shifts),
            transforms: TransformParameters::from_entries(transforms),
            regression,
        }));
        Ok(())
    }

    /// Forecast `horizon` years after the latest year of the fitted table.
    pub fn forecast(&self, horizon: usize) -> Result<ForecastTable> {
        let fitted = self.fitted()?;
        if horizon == 0 {
            return Err(ForecastError::InvalidParameter(
                "horizon must be positive".into(),
            ));
        }
        let steps = i32::try_from(horizon).map_err(|_| {
            ForecastError::InvalidParameter(format!("horizon {} is too large", horizon))
        })?;
        let first = fitted.last_year.checked_add(1);
        let end = fitted.last_year.checked_add(steps);
        let (first, end) = first.zip(end).ok_or_else(|| {
            ForecastError::InvalidParameter(format!(
                "horizon {} overflows the year range",
                horizon
            ))
        })?;

        let years: Vec<i32> = (first..=end).collect();
        info!(horizon, first_year = first, "forecasting");
        self.project(fitted, years)
    }

    /// In-sample predictions for the training years, in original scale.
    pub fn fitted_values(&self) -> Result<ForecastTable> {
        let fitted = self.fitted()?;
        self.project(fitted, fitted.training_years.clone())
    }

    pub fn is_fitted(&self) -> bool {
        matches!(self.state, ForecasterState::Fitted(_))
    }

    /// Offsets added to each target before transforming.
    pub fn shifts(&self) -> Option<&TargetShiftMap> {
        self.fitted().ok().map(|f| &f.shifts)
    }

    /// Per-target transforms fixed at fit time.
    pub fn transforms(&self) -> Option<&TransformParameters> {
        self.fitted().ok().map(|f| &f.transforms)
    }

    pub fn training_years(&self) -> Option<&[i32]> {
        self.fitted().ok().map(|f| f.training_years.as_slice())
    }

    pub fn train_start_year(&self) -> Option<i32> {
        self.fitted().ok().map(|f| f.train_start_year)
    }

    /// Latest year of the fitted table; forecasts continue from here.
    pub fn last_year(&self) -> Option<i32> {
        self.fitted().ok().map(|f| f.last_year)
    }

    pub fn degree(&self) -> Option<usize> {
        self.fitted().ok().map(|f| f.degree)
    }

    pub fn target_names(&self) -> Option<&[String]> {
        self.fitted().ok().map(|f| f.names.as_slice())
    }

    fn fitted(&self) -> Result<&FittedState> {
        match &self.state {
            ForecasterState::Fitted(state) => Ok(&**state),
            ForecasterState::Untrained => Err(ForecastError::FitRequired),
        }
    }

    /// Predict, decode and unshift every target at `years`.
    fn project(&self, fitted: &FittedState, years: Vec<i32>) -> Result<ForecastTable> {
        let time: Vec<f64> = years.iter().map(|&y| f64::from(y)).collect();
        let encoded = fitted.regression.predict(&time);

        let values: Vec<Vec<f64>> = fitted
            .transforms
            .iter()
            .zip(fitted.shifts.iter())
            .zip(encoded.iter())
            .map(|(((_, transform), (_, offset)), column)| {
                transform
                    .decode(column, self.config.clamp_floor)
                    .into_iter()
                    .map(|v| v - offset)
                    .collect::<Vec<f64>>()
            })
            .collect();

        ForecastTable::new(years, fitted.names.clone(), values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::{ColumnTransform, ShiftRule};
    use approx::assert_relative_eq;

    fn table(years: Vec<i32>, columns: Vec<(&str, Vec<f64>)>) -> ObservationTable {
        ObservationTable::new(
            years,
            columns
                .into_iter()
                .map(|(n, v)| (n.to_string(), v))
                .collect(),
        )
        .unwrap()
    }

    fn trend_table() -> ObservationTable {
        table(
            (2012..=2024).collect(),
            vec![(
                "output",
                vec![
                    10.0, 12.0, 11.0, 15.0, 18.0, 20.0, 19.0, 22.0, 25.0, 28.0, 30.0, 33.0, 35.0,
                ],
            )],
        )
    }

    #[test]
    fn untrained_model_refuses_to_forecast() {
        let model = PolynomialForecaster::default();
        assert!(!model.is_fitted());
        assert_eq!(model.forecast(3).unwrap_err(), ForecastError::FitRequired);
        assert_eq!(
            model.fitted_values().unwrap_err(),
            ForecastError::FitRequired
        );
        assert!(model.shifts().is_none());
        assert!(model.transforms().is_none());
    }

    #[test]
    fn fit_transitions_once() {
        let data = trend_table();
        let mut model = PolynomialForecaster::default();

        model.fit(&data, 2012, 2).unwrap();
        assert!(model.is_fitted());
        assert_eq!(model.degree(), Some(2));
        assert_eq!(model.train_start_year(), Some(2012));

        assert_eq!(
            model.fit(&data, 2012, 2).unwrap_err(),
            ForecastError::AlreadyFitted
        );
    }

    #[test]
    fn forecast_continues_after_latest_year() {
        let data = table(
            (2018..=2024).collect(),
            vec![("a", vec![1.0, 2.0, 3.0, 5.0, 8.0, 13.0, 21.0])],
        );
        let mut model = PolynomialForecaster::default();
        model.fit(&data, 2018, 2).unwrap();

        let forecast = model.forecast(3).unwrap();
        assert_eq!(forecast.years(), &[2025, 2026, 2027]);
    }

    #[test]
    fn forecast_starts_after_table_not_window() {
        let data = table(
            (2010..=2020).collect(),
            vec![("a", (1..=11).map(|v| v as f64 * 2.0).collect())],
        );
        let mut model = PolynomialForecaster::default();
        model.fit(&data, 2015, 1).unwrap();

        assert_eq!(model.training_years().unwrap(), &[2015, 2016, 2017, 2018, 2019, 2020]);
        assert_eq!(model.last_year(), Some(2020));
        assert_eq!(model.forecast(2).unwrap().years(), &[2021, 2022]);
    }

    #[test]
    fn increasing_history_gives_increasing_forecast() {
        let mut model = PolynomialForecaster::default();
        model.fit(&trend_table(), 2012, 2).unwrap();

        let forecast = model.forecast(3).unwrap();
        let values = forecast.column("output").unwrap();
        assert_eq!(values.len(), 3);
        assert!(values.iter().all(|v| v.is_finite() && *v > 0.0));
        assert!(values.windows(2).all(|w| w[1] > w[0]));
        assert!(values[0] > 30.0);
    }

    #[test]
    fn negative_values_are_shifted_and_restored() {
        let data = table(
            (2015..=2022).collect(),
            vec![("balance", vec![-3.0, -1.0, 0.0, 2.0, 3.0, 5.0, 6.0, 8.0])],
        );
        let mut model = PolynomialForecaster::default();
        model.fit(&data, 2015, 1).unwrap();

        let shift = model.shifts().unwrap().get("balance").unwrap();
        assert!(shift >= 4.0);

        let fitted = model.fitted_values().unwrap();
        let in_sample = fitted.column("balance").unwrap();
        assert_eq!(fitted.years(), data.years());
        // Fitted values live in the original scale, so they bracket negatives too
        assert!(in_sample[0] < 0.0);
        assert!(in_sample[7] > 5.0);
    }

    #[test]
    fn constant_column_forecasts_its_constant() {
        let data = table(
            (2016..=2021).collect(),
            vec![
                ("flat", vec![5.0; 6]),
                ("growth", vec![1.0, 2.0, 4.0, 7.0, 11.0, 16.0]),
            ],
        );
        let mut model = PolynomialForecaster::default();
        model.fit(&data, 2016, 2).unwrap();

        assert_eq!(
            model.transforms().unwrap().get("flat"),
            Some(&ColumnTransform::DegenerateConstant { value: 5.0 })
        );

        let forecast = model.forecast(4).unwrap();
        for v in forecast.column("flat").unwrap() {
            assert_relative_eq!(*v, 5.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn constant_negative_column_round_trips_through_shift() {
        let data = table((2016..=2020).collect(), vec![("deficit", vec![-2.0; 5])]);
        let mut model = PolynomialForecaster::default();
        model.fit(&data, 2016, 1).unwrap();

        assert_eq!(model.shifts().unwrap().get("deficit"), Some(3.0));
        for v in model.forecast(2).unwrap().column("deficit").unwrap() {
            assert_relative_eq!(*v, -2.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn columns_keep_fit_order() {
        let data = table(
            (2014..=2020).collect(),
            vec![
                ("zeta", vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]),
                ("alpha", vec![7.0, 6.0, 5.0, 4.0, 3.0, 2.5, 2.0]),
            ],
        );
        let mut model = PolynomialForecaster::default();
        model.fit(&data, 2014, 1).unwrap();

        let forecast = model.forecast(1).unwrap();
        assert_eq!(
            forecast.target_names(),
            &["zeta".to_string(), "alpha".to_string()]
        );
    }

    #[test]
    fn empty_window_is_reported() {
        let mut model = PolynomialForecaster::default();
        let err = model.fit(&trend_table(), 2030, 2).unwrap_err();
        assert_eq!(
            err,
            ForecastError::EmptyTrainingWindow {
                start_year: 2030,
                latest_year: Some(2024),
            }
        );
        assert!(!model.is_fitted());
    }

    #[test]
    fn missing_value_in_window_names_column() {
        let data = table(
            (2018..=2022).collect(),
            vec![
                ("ok", vec![1.0, 2.0, 3.0, 4.0, 5.0]),
                ("gappy", vec![1.0, 2.0, f64::NAN, 4.0, 5.0]),
            ],
        );
        let mut model = PolynomialForecaster::default();
        assert_eq!(
            model.fit(&data, 2018, 1).unwrap_err(),
            ForecastError::InvalidTargetData {
                column: "gappy".to_string()
            }
        );
    }

    #[test]
    fn missing_value_outside_window_is_ignored() {
        let data = table(
            (2018..=2022).collect(),
            vec![("a", vec![f64::NAN, 2.0, 3.0, 4.0, 5.0])],
        );
        let mut model = PolynomialForecaster::default();
        assert!(model.fit(&data, 2019, 1).is_ok());
    }

    #[test]
    fn too_few_rows_for_degree() {
        let data = table((2023..=2024).collect(), vec![("a", vec![1.0, 2.0])]);
        let mut model = PolynomialForecaster::default();
        assert_eq!(
            model.fit(&data, 2023, 3).unwrap_err(),
            ForecastError::InsufficientData { needed: 4, got: 2 }
        );
    }

    #[test]
    fn zero_horizon_is_rejected() {
        let mut model = PolynomialForecaster::default();
        model.fit(&trend_table(), 2012, 2).unwrap();
        assert!(matches!(
            model.forecast(0),
            Err(ForecastError::InvalidParameter(_))
        ));
    }

    #[test]
    fn invalid_config_fails_fit() {
        let config = ForecasterConfig::new().with_clamp_floor(-1.0);
        let mut model = PolynomialForecaster::new(config);
        assert!(matches!(
            model.fit(&trend_table(), 2012, 2),
            Err(ForecastError::InvalidParameter(_))
        ));
    }

    #[test]
    fn below_target_rule_shifts_small_positive_minimum() {
        let data = table(
            (2015..=2020).collect(),
            vec![("a", vec![0.5, 0.7, 0.9, 1.2, 1.6, 2.0])],
        );

        let mut default_rule = PolynomialForecaster::default();
        default_rule.fit(&data, 2015, 1).unwrap();
        assert_eq!(default_rule.shifts().unwrap().get("a"), Some(0.0));

        let config = ForecasterConfig::new().with_shift_rule(ShiftRule::BelowTarget);
        let mut below_target = PolynomialForecaster::new(config);
        below_target.fit(&data, 2015, 1).unwrap();
        assert_relative_eq!(below_target.shifts().unwrap().get("a").unwrap(), 0.5);
    }

    #[test]
    fn forecast_is_repeatable() {
        let mut model = PolynomialForecaster::default();
        model.fit(&trend_table(), 2012, 2).unwrap();
        assert_eq!(model.forecast(5).unwrap(), model.forecast(5).unwrap());
    }

    #[test]
    fn forecaster_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PolynomialForecaster>();
    }
}
