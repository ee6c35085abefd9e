//! Engine configuration and policy constants.
//!
//! Every threshold used by the analyses lives here so that the free
//! functions and the [`Engine`](crate::engine::Engine) share one source of
//! truth.

use serde::Deserialize;
use tracing::warn;

/// Default |z| above which a point is reported as an anomaly.
pub const DEFAULT_ANOMALY_THRESHOLD: f64 = 2.5;

/// |z| above which an anomaly is classified as high severity.
///
/// Independent of the flagging threshold.
pub const HIGH_SEVERITY_Z: f64 = 3.0;

/// Default number of future positions to forecast.
pub const DEFAULT_FORECAST_PERIODS: usize = 5;

/// Slope magnitude separating a stable series from a trending one.
///
/// Fixed in the units of the data, so it is not scale-invariant.
pub const TREND_SLOPE_THRESHOLD: f64 = 0.1;

/// Longest forecast horizon a single call will extrapolate.
pub const MAX_FORECAST_PERIODS: usize = 10_000;

/// Fewest usable values for anomaly detection.
pub const MIN_ANOMALY_POINTS: usize = 3;

/// Fewest usable values for a trend forecast.
pub const MIN_FORECAST_POINTS: usize = 2;

/// Decimal places of every reported statistic under [`Precision::Rounded`].
pub const DISPLAY_DECIMALS: u32 = 4;

/// Decimal places of the anomaly rate under [`Precision::Rounded`].
pub const RATE_DECIMALS: u32 = 2;

/// How reported numbers are rounded.
///
/// Computation always runs at full precision; this only affects the values
/// written into the result structures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Precision {
    /// Round statistics to `decimals` places and rates to [`RATE_DECIMALS`].
    Rounded {
        /// Decimal places for statistics.
        decimals: u32,
    },
    /// Report raw `f64` values.
    Full,
}

impl Default for Precision {
    fn default() -> Self {
        Precision::Rounded {
            decimals: DISPLAY_DECIMALS,
        }
    }
}

impl Precision {
    /// Applies the statistic rounding policy to `value`.
    pub fn stat(self, value: f64) -> f64 {
        match self {
            Precision::Rounded { decimals } => crate::stats::round_to(value, decimals),
            Precision::Full => value,
        }
    }

    /// Applies the rate rounding policy to a percentage.
    pub fn rate(self, value: f64) -> f64 {
        match self {
            Precision::Rounded { .. } => crate::stats::round_to(value, RATE_DECIMALS),
            Precision::Full => value,
        }
    }
}

/// Configuration of the analysis [`Engine`](crate::engine::Engine).
///
/// # Examples
///
/// ```
/// use u_spc::config::{EngineConfig, Precision};
///
/// let config = EngineConfig::default()
///     .with_precision(Precision::Full)
///     .with_anomaly_threshold(3.0);
/// assert_eq!(config.forecast_periods, 5);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Rounding applied to reported values.
    pub precision: Precision,
    /// Default anomaly threshold when a call does not supply one.
    pub anomaly_threshold: f64,
    /// |z| above which an anomaly is high severity.
    pub high_severity_z: f64,
    /// Default forecast horizon when a call does not supply one.
    pub forecast_periods: usize,
    /// Slope magnitude that separates increasing/decreasing from stable.
    pub trend_slope_threshold: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            precision: Precision::default(),
            anomaly_threshold: DEFAULT_ANOMALY_THRESHOLD,
            high_severity_z: HIGH_SEVERITY_Z,
            forecast_periods: DEFAULT_FORECAST_PERIODS,
            trend_slope_threshold: TREND_SLOPE_THRESHOLD,
        }
    }
}

impl EngineConfig {
    /// Sets the rounding policy.
    pub fn with_precision(mut self, precision: Precision) -> Self {
        self.precision = precision;
        self
    }

    /// Sets the default anomaly threshold.
    pub fn with_anomaly_threshold(mut self, threshold: f64) -> Self {
        self.anomaly_threshold = threshold;
        self
    }

    /// Sets the high-severity z cutoff.
    pub fn with_high_severity_z(mut self, z: f64) -> Self {
        self.high_severity_z = z;
        self
    }

    /// Sets the default forecast horizon.
    pub fn with_forecast_periods(mut self, periods: usize) -> Self {
        self.forecast_periods = periods;
        self
    }

    /// Sets the trend slope threshold.
    pub fn with_trend_slope_threshold(mut self, threshold: f64) -> Self {
        self.trend_slope_threshold = threshold;
        self
    }

    /// Replaces every non-finite threshold with its default.
    ///
    /// JSON cannot carry NaN or infinity, so only configurations built in
    /// code can need this.
    pub fn sanitized(self) -> Self {
        Self {
            anomaly_threshold: finite_or(
                "anomaly_threshold",
                self.anomaly_threshold,
                DEFAULT_ANOMALY_THRESHOLD,
            ),
            high_severity_z: finite_or("high_severity_z", self.high_severity_z, HIGH_SEVERITY_Z),
            trend_slope_threshold: finite_or(
                "trend_slope_threshold",
                self.trend_slope_threshold,
                TREND_SLOPE_THRESHOLD,
            ),
            ..self
        }
    }
}

fn finite_or(field: &'static str, value: f64, default: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        warn!(field, value, default, "non-finite config value, using default");
        default
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitized_keeps_finite_values() {
        let c = EngineConfig::default()
            .with_anomaly_threshold(1.5)
            .with_forecast_periods(9)
            .sanitized();
        assert_eq!(c.anomaly_threshold, 1.5);
        assert_eq!(c.forecast_periods, 9);
    }

    #[test]
    fn sanitized_replaces_non_finite_values() {
        let c = EngineConfig::default()
            .with_anomaly_threshold(f64::NAN)
            .with_high_severity_z(f64::INFINITY)
            .sanitized();
        assert_eq!(c.anomaly_threshold, DEFAULT_ANOMALY_THRESHOLD);
        assert_eq!(c.high_severity_z, HIGH_SEVERITY_Z);
    }

    #[test]
    fn defaults_match_policy_constants() {
        let c = EngineConfig::default();
        assert_eq!(c.precision, Precision::Rounded { decimals: 4 });
        assert!((c.anomaly_threshold - 2.5).abs() < f64::EPSILON);
        assert!((c.high_severity_z - 3.0).abs() < f64::EPSILON);
        assert_eq!(c.forecast_periods, 5);
        assert!((c.trend_slope_threshold - 0.1).abs() < f64::EPSILON);
    }

    #[test]
    fn precision_rounding() {
        let p = Precision::default();
        assert_eq!(p.stat(1.234567), 1.2346);
        assert_eq!(p.rate(33.33333), 33.33);
        assert_eq!(Precision::Full.stat(1.234567), 1.234567);
        assert_eq!(Precision::Full.rate(33.33333), 33.33333);
    }

    #[test]
    fn deserializes_partial_config() {
        let c: EngineConfig =
            serde_json::from_str(r#"{"precision": "full", "forecast_periods": 3}"#).unwrap();
        assert_eq!(c.precision, Precision::Full);
        assert_eq!(c.forecast_periods, 3);
        assert!((c.anomaly_threshold - DEFAULT_ANOMALY_THRESHOLD).abs() < f64::EPSILON);
    }

    #[test]
    fn deserializes_rounded_precision() {
        let c: EngineConfig =
            serde_json::from_str(r#"{"precision": {"rounded": {"decimals": 2}}}"#).unwrap();
        assert_eq!(c.precision, Precision::Rounded { decimals: 2 });
    }

    #[test]
    fn builders_chain() {
        let c = EngineConfig::default()
            .with_high_severity_z(4.0)
            .with_forecast_periods(10)
            .with_trend_slope_threshold(0.5);
        assert!((c.high_severity_z - 4.0).abs() < f64::EPSILON);
        assert_eq!(c.forecast_periods, 10);
        assert!((c.trend_slope_threshold - 0.5).abs() < f64::EPSILON);
    }
}
