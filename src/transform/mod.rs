//! Reversible target transforms.
//!
//! Provides the Box-Cox power transform, per-column encoding with
//! constant-column handling, and positivity shifts.
//!
//! # Example
//!
//! ```
//! use sectorcast::transform::{encode, ColumnTransform};
//!
//! let series = vec![1.0, 2.0, 3.0, 4.0, 5.0];
//! let (encoded, transform) = encode(&series, (-2.0, 2.0));
//! assert!(matches!(transform, ColumnTransform::PowerTransform { .. }));
//!
//! let decoded = transform.decode(&encoded, 1e-9);
//! assert!((decoded[4] - 5.0).abs() < 1e-6);
//! ```

pub mod boxcox;
pub mod column;
pub mod shift;

pub use boxcox::{boxcox, boxcox_lambda, boxcox_llf, inv_boxcox, LAMBDA_ZERO_TOL};
pub use column::{encode, ColumnTransform, TransformParameters};
pub use shift::{column_min, ShiftRule, TargetShiftMap};
