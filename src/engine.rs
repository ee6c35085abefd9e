//! Unified entry point over the four analyses.
//!
//! An [`Engine`] carries an [`EngineConfig`] and applies it to every call, so
//! rounding and thresholds are decided in one place. The free functions at
//! the bottom of this module use the default configuration.
//!
//! # Examples
//!
//! ```
//! use u_spc::engine::Engine;
//! use u_spc::sample::Sample;
//!
//! let engine = Engine::default();
//! let sample = Sample::from_values(vec![1.0, 2.0, 3.0, 4.0, 5.0]);
//!
//! let spc = engine.spc(&sample, None).unwrap();
//! assert!(spc.is_stable);
//!
//! let forecast = engine.forecast(&sample, Some(3)).unwrap();
//! assert_eq!(forecast.forecasts.len(), 3);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::warn;

use crate::capability::{CapabilityReport, SpecLimits};
use crate::config::EngineConfig;
use crate::detection::{AnomalyReport, ZScoreDetector};
use crate::error::{BridgeError, Degenerate};
use crate::forecast::{linear_forecast, ForecastReport};
use crate::sample::Sample;
use crate::spc::{self, SpcReport};

/// The analyses the engine can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisKind {
    /// Control limits and stability.
    Spc,
    /// Capability indices against specification limits.
    Capability,
    /// Z-score anomaly detection.
    Anomaly,
    /// Linear trend forecast.
    Forecast,
}

impl AnalysisKind {
    /// All kinds, in a fixed order.
    pub const ALL: [AnalysisKind; 4] = [
        AnalysisKind::Spc,
        AnalysisKind::Capability,
        AnalysisKind::Anomaly,
        AnalysisKind::Forecast,
    ];

    /// The wire name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisKind::Spc => "spc",
            AnalysisKind::Capability => "capability",
            AnalysisKind::Anomaly => "anomaly",
            AnalysisKind::Forecast => "forecast",
        }
    }
}

impl fmt::Display for AnalysisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnalysisKind {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| BridgeError::UnknownAnalysis(s.to_string()))
    }
}

/// Runs analyses under one configuration.
#[derive(Debug, Clone)]
pub struct Engine {
    config: EngineConfig,
    detector: ZScoreDetector,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Engine {
    /// Creates an engine with the given configuration.
    ///
    /// Non-finite thresholds in `config` are replaced by their defaults
    /// (see [`EngineConfig::sanitized`]).
    pub fn new(config: EngineConfig) -> Self {
        let config = config.sanitized();
        let detector =
            ZScoreDetector::with_params(config.anomaly_threshold, config.high_severity_z)
                .unwrap_or_default();
        Self { config, detector }
    }

    /// The configuration in effect.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Control limits, Rule 1 points and stability; capability is embedded
    /// when `spec` carries both limits.
    pub fn spc(&self, sample: &Sample, spec: Option<&SpecLimits>) -> Result<SpcReport, Degenerate> {
        spc::evaluate(sample.values(), spec, self.config.precision)
    }

    /// Capability indices of the sample against `spec`.
    pub fn capability(
        &self,
        sample: &Sample,
        spec: &SpecLimits,
    ) -> Result<CapabilityReport, Degenerate> {
        CapabilityReport::evaluate(sample.values(), spec, self.config.precision)
    }

    /// Z-score anomalies using `threshold`, or the configured default.
    ///
    /// A non-finite threshold falls back to the configured default.
    pub fn anomalies(
        &self,
        sample: &Sample,
        threshold: Option<f64>,
    ) -> Result<AnomalyReport, Degenerate> {
        let detector = match threshold {
            None => self.detector,
            Some(t) => ZScoreDetector::with_params(t, self.config.high_severity_z).unwrap_or_else(|| {
                warn!(threshold = t, "non-finite anomaly threshold, using configured default");
                self.detector
            }),
        };
        detector.analyze(sample.values(), self.config.precision)
    }

    /// Linear trend over `periods` future positions, or the configured
    /// default horizon.
    pub fn forecast(
        &self,
        sample: &Sample,
        periods: Option<usize>,
    ) -> Result<ForecastReport, Degenerate> {
        let periods = periods.unwrap_or(self.config.forecast_periods);
        linear_forecast(
            sample.values(),
            periods,
            self.config.trend_slope_threshold,
            self.config.precision,
        )
    }
}

/// [`Engine::spc`] with the default configuration.
pub fn compute_spc(sample: &Sample, spec: Option<&SpecLimits>) -> Result<SpcReport, Degenerate> {
    Engine::default().spc(sample, spec)
}

/// [`Engine::anomalies`] with the default configuration.
pub fn detect_anomalies(sample: &Sample, threshold: Option<f64>) -> Result<AnomalyReport, Degenerate> {
    Engine::default().anomalies(sample, threshold)
}

/// [`Engine::forecast`] with the default configuration.
pub fn forecast(sample: &Sample, periods: Option<usize>) -> Result<ForecastReport, Degenerate> {
    Engine::default().forecast(sample, periods)
}
