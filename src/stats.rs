//! Descriptive statistics shared by every analysis.
//!
//! Mean and variance come from [`u_numflow::stats`] (Neumaier-compensated
//! mean, two-pass population variance). This module adds the policies the
//! analyses rely on:
//!
//! - a sample whose values are all identical has a variance of exactly zero
//! - reported values are rounded half away from zero, never to `-0.0`
//!
//! Population (not sample) variance is used throughout: control limits,
//! z-scores and capability indices all share the same sigma.

use u_numflow::stats;

/// Largest number of decimals [`round_to`] honours. `f64` carries about 17
/// significant digits; more decimals cannot change the value.
pub const MAX_ROUND_DECIMALS: u32 = 17;

/// Population variance (denominator `n`).
///
/// An all-identical sample short-circuits to exactly `0.0`, so a mean that is
/// not bit-exact (e.g. `[0.1; 3]`) cannot leave a residual spread.
///
/// # Returns
/// - `None` if `data` is empty or contains NaN/Inf.
///
/// # Examples
/// ```
/// use u_spc::stats::population_variance;
/// let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
/// assert!((population_variance(&v).unwrap() - 4.0).abs() < 1e-10);
/// assert_eq!(population_variance(&[0.1; 3]), Some(0.0));
/// ```
pub fn population_variance(data: &[f64]) -> Option<f64> {
    let first = *data.first()?;
    if !data.iter().all(|x| x.is_finite()) {
        return None;
    }
    if data.iter().all(|&x| x == first) {
        return Some(0.0);
    }
    stats::population_variance(data)
}

/// Population standard deviation, `sqrt(population_variance(data))`.
pub fn population_std_dev(data: &[f64]) -> Option<f64> {
    population_variance(data).map(f64::sqrt)
}

/// Rounds `value` to `decimals` places, half away from zero.
///
/// `decimals` is capped at [`MAX_ROUND_DECIMALS`]. Non-finite values pass
/// through unchanged.
///
/// # Examples
/// ```
/// use u_spc::stats::round_to;
/// assert_eq!(round_to(1.23456, 4), 1.2346);
/// assert_eq!(round_to(-2.5, 0), -3.0);
/// ```
pub fn round_to(value: f64, decimals: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let factor = 10f64.powi(decimals.min(MAX_ROUND_DECIMALS) as i32);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    let rounded = scaled.round() / factor;
    // -0.0 would otherwise leak into serialized output
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Count, mean and population standard deviation of one sample.
///
/// Computed once per call and shared by the control limits, z-scores,
/// capability indices and trend fit of that call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Moments {
    /// Number of values.
    pub n: usize,
    /// Arithmetic mean.
    pub mean: f64,
    /// Population standard deviation.
    pub std_dev: f64,
}

impl Moments {
    /// Computes the moments of `data`.
    ///
    /// # Returns
    /// `None` if `data` is empty or contains NaN/Inf.
    pub fn of(data: &[f64]) -> Option<Self> {
        let std_dev = population_std_dev(data)?;
        let mean = stats::mean(data)?;
        Some(Self {
            n: data.len(),
            mean,
            std_dev,
        })
    }

    /// Whether the sample has no spread at all.
    pub fn is_degenerate(&self) -> bool {
        self.std_dev == 0.0
    }
}
