//! Box-Cox power transformation.
//!
//! Transforms strictly positive data to be more normally distributed.

/// Lambdas closer to zero than this use the logarithmic branch.
pub const LAMBDA_ZERO_TOL: f64 = 1e-10;

const COARSE_STEP: f64 = 0.01;
const MAX_COARSE_STEPS: usize = 2000;
const FINE_STEPS: usize = 100;

/// Apply Box-Cox transformation with a given lambda.
///
/// For lambda != 0: y = (x^lambda - 1) / lambda
/// For lambda == 0: y = ln(x)
///
/// Returns NaN for non-positive values.
pub fn boxcox(series: &[f64], lambda: f64) -> Vec<f64> {
    series
        .iter()
        .map(|&x| {
            if x <= 0.0 {
                f64::NAN
            } else if lambda.abs() < LAMBDA_ZERO_TOL {
                x.ln()
            } else {
                (x.powf(lambda) - 1.0) / lambda
            }
        })
        .collect()
}

/// Inverse Box-Cox transformation with domain clamping.
///
/// For lambda != 0: x = max(lambda * y + 1, floor)^(1/lambda)
/// For lambda == 0: x = exp(y)
///
/// Never returns NaN or infinity: overflow saturates at `f64::MAX` and a
/// NaN input decodes as if it had hit the floor.
pub fn inv_boxcox(transformed: &[f64], lambda: f64, floor: f64) -> Vec<f64> {
    transformed
        .iter()
        .map(|&y| {
            if lambda.abs() < LAMBDA_ZERO_TOL {
                let x = y.exp();
                if x.is_nan() {
                    floor
                } else {
                    x.min(f64::MAX)
                }
            } else {
                // f64::max drops a NaN operand, so z >= floor always holds.
                let z = (lambda * y + 1.0).max(floor);
                z.powf(1.0 / lambda).min(f64::MAX)
            }
        })
        .collect()
}

/// Find the Box-Cox lambda maximizing the profile log-likelihood.
///
/// Runs a coarse grid over `[low, high]` and then a finer grid around the
/// best coarse point. The coarse grid has at most `MAX_COARSE_STEPS` steps,
/// widening past `COARSE_STEP` on large ranges. Input must be strictly
/// positive and non-constant. Returns 1.0 if either bound is not finite.
pub fn boxcox_lambda(series: &[f64], low: f64, high: f64) -> f64 {
    if !(low.is_finite() && high.is_finite()) {
        return 1.0;
    }
    let (low, high) = if low <= high { (low, high) } else { (high, low) };
    let mut best_lambda = 1.0_f64.clamp(low, high);
    let mut best_llf = f64::NEG_INFINITY;

    let width = high - low;
    let coarse = ((width / COARSE_STEP).round().max(1.0) as usize).min(MAX_COARSE_STEPS);
    let step = width / coarse as f64;
    for i in 0..=coarse {
        let lambda = (low + width * i as f64 / coarse as f64).min(high);
        let llf = boxcox_llf(series, lambda);

        if llf > best_llf {
            best_llf = llf;
            best_lambda = lambda;
        }
    }

    let start = (best_lambda - 10.0 * step).max(low);
    let end = (best_lambda + 10.0 * step).min(high);

    for i in 0..=FINE_STEPS {
        let lambda = (start + (end - start) * i as f64 / FINE_STEPS as f64).clamp(low, high);
        let llf = boxcox_llf(series, lambda);

        if llf > best_llf {
            best_llf = llf;
            best_lambda = lambda;
        }
    }

    best_lambda
}

/// Profile log-likelihood of the Box-Cox transform, constants dropped.
///
/// llf = -n/2 * ln(variance) + (lambda - 1) * sum(ln(x))
pub fn boxcox_llf(series: &[f64], lambda: f64) -> f64 {
    let n = series.len();
    if n < 2 {
        return f64::NEG_INFINITY;
    }

    let transformed = boxcox(series, lambda);
    if transformed.iter().any(|x| !x.is_finite()) {
        return f64::NEG_INFINITY;
    }

    let mean = transformed.iter().sum::<f64>() / n as f64;
    let variance = transformed.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n as f64;

    if !(variance > 0.0 && variance.is_finite()) {
        return f64::NEG_INFINITY;
    }

    let log_sum: f64 = series.iter().map(|x| x.ln()).sum();

    -0.5 * n as f64 * variance.ln() + (lambda - 1.0) * log_sum
}
