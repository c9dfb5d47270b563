//! # sectorcast
//!
//! Multi-target yearly forecasting for short annual histories.
//!
//! Each target column is shifted to be strictly positive, Box-Cox
//! transformed with its own lambda (constant columns are passed through),
//! and a shared polynomial trend in year is fitted to the transformed
//! targets. Forecasts invert the transform and remove the shift.

#![allow(clippy::needless_range_loop)]

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod transform;
pub mod utils;

pub use config::ForecasterConfig;
pub use error::{ForecastError, Result};

pub mod prelude {
    pub use crate::config::ForecasterConfig;
    pub use crate::core::{ForecastTable, ObservationTable};
    pub use crate::error::{ForecastError, Result};
    pub use crate::models::PolynomialForecaster;
    pub use crate::transform::{ColumnTransform, ShiftRule};
}
