//! Numerical utilities shared by the models.

pub mod ols;

pub use ols::{ols_fit, ols_predict};
