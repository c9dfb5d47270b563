//! Core data structures for yearly forecasting.

mod forecast;
mod table;

pub use forecast::ForecastTable;
pub use table::{parse_cell, ObservationTable, ObservationTableBuilder};
