//! Error types for the sectorcast library.

use thiserror::Error;

/// Result type alias for forecast operations.
pub type Result<T> = std::result::Result<T, ForecastError>;

/// Errors that can occur while building tables, fitting or forecasting.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    /// No observation falls at or after the training start year.
    #[error("empty training window: no rows at or after {start_year} (latest year: {latest_year:?})")]
    EmptyTrainingWindow {
        start_year: i32,
        latest_year: Option<i32>,
    },

    /// A target column holds a missing or non-numeric value inside the training window.
    #[error("invalid target data in column '{column}': missing or non-numeric value in training window")]
    InvalidTargetData { column: String },

    /// Insufficient data points for the operation.
    #[error("insufficient data: need at least {needed}, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Dimension mismatch between data structures.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// The same year appears more than once in an observation table.
    #[error("duplicate year: {0}")]
    DuplicateYear(i32),

    /// Model has not been fitted yet.
    #[error("model must be fitted before forecasting")]
    FitRequired,

    /// Model was already fitted; a new instance is needed to refit.
    #[error("model is already fitted; create a new instance to refit")]
    AlreadyFitted,

    /// Computation error (e.g., numerical issues).
    #[error("computation error: {0}")]
    ComputationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_are_descriptive() {
        let err = ForecastError::InsufficientData { needed: 4, got: 2 };
        assert_eq!(err.to_string(), "insufficient data: need at least 4, got 2");

        let err = ForecastError::InvalidTargetData {
            column: "mining".to_string(),
        };
        assert!(err.to_string().contains("'mining'"));

        let err = ForecastError::EmptyTrainingWindow {
            start_year: 2030,
            latest_year: Some(2024),
        };
        assert!(err.to_string().contains("2030"));
        assert!(err.to_string().contains("2024"));

        let err = ForecastError::DuplicateYear(2019);
        assert_eq!(err.to_string(), "duplicate year: 2019");

        let err = ForecastError::FitRequired;
        assert_eq!(err.to_string(), "model must be fitted before forecasting");
    }

    #[test]
    fn errors_are_clonable_and_comparable() {
        let err1 = ForecastError::AlreadyFitted;
        let err2 = err1.clone();
        assert_eq!(err1, err2);
        assert_ne!(err1, ForecastError::FitRequired);
    }
}
