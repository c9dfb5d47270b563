//! Ordinary least squares with several right-hand sides.
//!
//! Solves `min ||X b - y||` for every target column `y` sharing one design
//! matrix `X`, using a Householder QR factorization of `X`.

use crate::error::{ForecastError, Result};

/// Pivots smaller than this fraction of the largest one mark a rank-deficient design.
const RANK_TOL: f64 = 1e-12;

/// Fit least squares coefficients for each target.
///
/// # Arguments
/// * `design` - Design matrix rows (n rows, p columns each)
/// * `targets` - Target columns (each length n)
///
/// # Returns
/// One coefficient vector (length p) per target, in target order.
pub fn ols_fit(design: &[Vec<f64>], targets: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
    let n = design.len();
    let p = design.first().map(|r| r.len()).unwrap_or(0);

    if p == 0 {
        return Err(ForecastError::InvalidParameter(
            "design matrix has no columns".into(),
        ));
    }
    if n < p {
        return Err(ForecastError::InsufficientData { needed: p, got: n });
    }
    if let Some(row) = design.iter().find(|r| r.len() != p) {
        return Err(ForecastError::DimensionMismatch {
            expected: p,
            got: row.len(),
        });
    }
    if let Some(col) = targets.iter().find(|c| c.len() != n) {
        return Err(ForecastError::DimensionMismatch {
            expected: n,
            got: col.len(),
        });
    }

    let mut a: Vec<Vec<f64>> = design.to_vec();
    let mut b: Vec<Vec<f64>> = targets.to_vec();

    // Householder QR: reduce `a` to upper-triangular R, applying Q' to `b`.
    for j in 0..p {
        let norm = (j..n).map(|i| a[i][j] * a[i][j]).sum::<f64>().sqrt();
        if norm == 0.0 {
            continue;
        }

        let alpha = if a[j][j] > 0.0 { -norm } else { norm };
        let mut v: Vec<f64> = (j..n).map(|i| a[i][j]).collect();
        v[0] -= alpha;

        let v_norm_sq: f64 = v.iter().map(|x| x * x).sum();
        if v_norm_sq == 0.0 {
            continue;
        }

        for c in j..p {
            let s: f64 = v.iter().enumerate().map(|(k, vk)| vk * a[j + k][c]).sum();
            let f = 2.0 * s / v_norm_sq;
            for (k, vk) in v.iter().enumerate() {
                a[j + k][c] -= f * vk;
            }
        }

        for col in b.iter_mut() {
            let s: f64 = v.iter().enumerate().map(|(k, vk)| vk * col[j + k]).sum();
            let f = 2.0 * s / v_norm_sq;
            for (k, vk) in v.iter().enumerate() {
                col[j + k] -= f * vk;
            }
        }
    }

    let r_max = (0..p).map(|j| a[j][j].abs()).fold(0.0, f64::max);
    if !(r_max > 0.0) || (0..p).any(|j| a[j][j].abs() <= RANK_TOL * r_max) {
        return Err(ForecastError::ComputationError(
            "least squares failed: design matrix is rank deficient".into(),
        ));
    }

    // Back substitution: R x = (Q' y)[..p]
    let solutions = b
        .iter()
        .map(|col| {
            let mut x = vec![0.0; p];
            for i in (0..p).rev() {
                let mut sum = col[i];
                for c in (i + 1)..p {
                    sum -= a[i][c] * x[c];
                }
                x[i] = sum / a[i][i];
            }
            x
        })
        .collect();

    Ok(solutions)
}

/// Evaluate `design @ coefficients` for every row.
pub fn ols_predict(design: &[Vec<f64>], coefficients: &[f64]) -> Vec<f64> {
    design
        .iter()
        .map(|row| row.iter().zip(coefficients).map(|(x, c)| x * c).sum())
        .collect()
}
