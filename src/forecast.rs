//! Linear trend forecasting.
//!
//! Fits an ordinary least-squares line through the sample against its
//! 0-based positions and extrapolates it over a short horizon.
//!
//! # Algorithm
//!
//! ```text
//! x_i = i                          (ordinal position, not a timestamp)
//! slope     = Σ(x_i - x̄)(y_i - ȳ) / Σ(x_i - x̄)²
//! intercept = ȳ - slope · x̄
//! ŷ(p)      = intercept + slope · p,   p = n, n+1, ..., n+periods-1
//! ```
//!
//! The trend label compares the slope against a fixed threshold expressed in
//! data units per position, so it is not scale-invariant: a slope of 0.05
//! is "stable" for readings in the thousands and for readings near zero alike.
//!
//! # Examples
//!
//! ```
//! use u_spc::config::Precision;
//! use u_spc::forecast::{linear_forecast, Trend};
//!
//! let r = linear_forecast(&[1.0, 2.0, 3.0, 4.0, 5.0], 3, 0.1, Precision::default()).unwrap();
//! assert_eq!(r.slope, 1.0);
//! assert_eq!(r.intercept, 1.0);
//! assert_eq!(r.trend, Trend::Increasing);
//! let values: Vec<f64> = r.forecasts.iter().map(|f| f.forecast).collect();
//! assert_eq!(values, vec![6.0, 7.0, 8.0]);
//! ```
//!
//! # References
//!
//! Draper & Smith (1998). "Applied Regression Analysis", 3rd edition.

use serde::Serialize;
use tracing::debug;

use crate::config::{Precision, MAX_FORECAST_PERIODS, MIN_FORECAST_POINTS};
use crate::error::Degenerate;
use crate::stats::Moments;

/// Direction of the fitted trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    /// Slope above `+threshold`.
    Increasing,
    /// Slope below `-threshold`.
    Decreasing,
    /// Slope within `[-threshold, +threshold]`.
    Stable,
}

impl Trend {
    /// Classifies a slope.
    pub fn classify(slope: f64, threshold: f64) -> Self {
        if slope > threshold {
            Trend::Increasing
        } else if slope < -threshold {
            Trend::Decreasing
        } else {
            Trend::Stable
        }
    }
}

/// Fitted line y = intercept + slope · position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastModel {
    /// Slope coefficient (β₁), per position.
    pub slope: f64,
    /// Intercept (β₀), the fitted value at position 0.
    pub intercept: f64,
    /// Coefficient of determination over the fitted positions.
    pub r_squared: f64,
}

impl ForecastModel {
    /// Fits the model by OLS over positions `0..y.len()`.
    ///
    /// A zero denominator (all positions equal) leaves the slope at 0. A
    /// series with no spread (all values identical) reports R² = 1.
    ///
    /// # Returns
    ///
    /// `None` if `y` is empty or contains non-finite values.
    pub fn fit(y: &[f64]) -> Option<Self> {
        let moments = Moments::of(y)?;
        let n = moments.n;
        let y_mean = moments.mean;
        let x_mean = (n as f64 - 1.0) / 2.0;

        let (sxy, sxx) = y
            .iter()
            .enumerate()
            .fold((0.0, 0.0), |(sxy, sxx), (i, &yi)| {
                let dx = i as f64 - x_mean;
                (sxy + dx * (yi - y_mean), sxx + dx * dx)
            });

        let slope = if sxx == 0.0 || moments.is_degenerate() {
            0.0
        } else {
            sxy / sxx
        };
        let intercept = y_mean - slope * x_mean;

        let (ss_res, ss_tot) = y
            .iter()
            .enumerate()
            .fold((0.0, 0.0), |(res, tot), (i, &yi)| {
                let r = yi - (intercept + slope * i as f64);
                (res + r * r, tot + (yi - y_mean) * (yi - y_mean))
            });
        let r_squared = if moments.is_degenerate() || ss_tot <= 0.0 {
            1.0
        } else {
            1.0 - ss_res / ss_tot
        };

        Some(Self {
            slope,
            intercept,
            r_squared,
        })
    }

    /// Predicted value at a 0-based position.
    pub fn predict(&self, position: usize) -> f64 {
        self.intercept + self.slope * position as f64
    }
}

/// One extrapolated point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastPoint {
    /// 1-based position label of the predicted point (position + 1).
    pub period: usize,
    /// Predicted value.
    pub forecast: f64,
}

/// Result of a trend forecast.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastReport {
    /// Number of usable values fitted.
    pub n: usize,
    /// Fitted slope per position.
    pub slope: f64,
    /// Fitted intercept.
    pub intercept: f64,
    /// Coefficient of determination of the fit.
    pub r_squared: f64,
    /// Direction of the trend.
    pub trend: Trend,
    /// Extrapolated points, in order.
    pub forecasts: Vec<ForecastPoint>,
}

/// Fits a linear trend and extrapolates it `periods` positions ahead.
///
/// # Returns
///
/// A [`Degenerate`] marker when fewer than [`MIN_FORECAST_POINTS`] values
/// are supplied, or when `periods` exceeds [`MAX_FORECAST_PERIODS`].
/// `periods == 0` yields an empty forecast list.
pub fn linear_forecast(
    values: &[f64],
    periods: usize,
    trend_threshold: f64,
    precision: Precision,
) -> Result<ForecastReport, Degenerate> {
    if values.len() < MIN_FORECAST_POINTS {
        return Err(Degenerate::for_len(MIN_FORECAST_POINTS, values.len()));
    }
    let n = values.len();
    let end = n
        .checked_add(periods)
        .filter(|_| periods <= MAX_FORECAST_PERIODS)
        .ok_or(Degenerate::HorizonTooLong {
            max: MAX_FORECAST_PERIODS,
            requested: periods,
        })?;
    let model = ForecastModel::fit(values).ok_or(Degenerate::NoUsableData)?;

    let forecasts = (n..end)
        .map(|position| ForecastPoint {
            period: position + 1,
            forecast: precision.stat(model.predict(position)),
        })
        .collect();

    let trend = Trend::classify(model.slope, trend_threshold);
    debug!(n, slope = model.slope, ?trend, periods, "trend fitted");

    Ok(ForecastReport {
        n,
        slope: precision.stat(model.slope),
        intercept: precision.stat(model.intercept),
        r_squared: precision.stat(model.r_squared),
        trend,
        forecasts,
    })
}
