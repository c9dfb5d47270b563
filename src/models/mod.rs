//! Forecasting models.

pub mod forecaster;
pub mod polynomial;

pub use forecaster::PolynomialForecaster;
pub use polynomial::PolynomialRegression;
