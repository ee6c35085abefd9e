//! Z-score point anomaly detection.
//!
//! # Algorithm
//!
//! Every value is standardized against the sample's own mean and population
//! standard deviation:
//!
//! ```text
//! z_i = (x_i - mean) / sigma
//! ```
//!
//! A value is an anomaly when `|z_i| > threshold`. Its severity is `high`
//! when `|z_i| > high_severity_z`, otherwise `medium`. The two cutoffs are
//! independent: with a threshold above the severity cutoff every anomaly is
//! high.
//!
//! # Parameters
//!
//! - **threshold**: flagging cutoff, default 2.5.
//! - **high_severity_z**: severity cutoff, default 3.0.
//!
//! Because the outlier itself inflates the population sigma, no point in a
//! sample of n values can reach `|z| > sqrt(n - 1)`. Short samples therefore
//! need a lower threshold to flag anything: for n = 5 the bound is 2.

use serde::Serialize;
use tracing::debug;

use crate::config::{Precision, DEFAULT_ANOMALY_THRESHOLD, HIGH_SEVERITY_Z, MIN_ANOMALY_POINTS};
use crate::error::Degenerate;
use crate::stats::Moments;

/// Severity tier of an anomaly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Beyond the flagging threshold but within the high cutoff.
    Medium,
    /// Beyond the high cutoff.
    High,
}

impl Severity {
    /// Classifies a z-score against the high-severity cutoff.
    pub fn classify(z_score: f64, high_severity_z: f64) -> Self {
        if z_score.abs() > high_severity_z {
            Severity::High
        } else {
            Severity::Medium
        }
    }
}

/// Whether z-scores could be computed at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionStatus {
    /// Every point was scored.
    Evaluated,
    /// The sample has zero spread; no point was scored.
    NoVariance,
}

/// One flagged point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Anomaly {
    /// Zero-based position of the value in the sample.
    pub index: usize,
    /// The measured value.
    pub value: f64,
    /// Standardized distance from the mean.
    pub z_score: f64,
    /// Severity tier, derived from the unrounded z-score.
    pub severity: Severity,
}

/// Result of anomaly detection over one sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnomalyReport {
    /// Whether the points were scored.
    pub status: DetectionStatus,
    /// Flagged points in sample order.
    pub anomalies: Vec<Anomaly>,
    /// Number of usable values.
    pub total_points: usize,
    /// Flagged points as a percentage of `total_points`.
    pub anomaly_rate: f64,
    /// The flagging threshold actually applied.
    pub threshold_used: f64,
    /// Sample mean.
    pub mean: f64,
    /// Population standard deviation.
    pub std: f64,
}

/// Z-score anomaly detector.
///
/// # Examples
///
/// ```
/// use u_spc::config::Precision;
/// use u_spc::detection::{Severity, ZScoreDetector};
///
/// let detector = ZScoreDetector::new(1.5).unwrap();
/// let report = detector.analyze(&[1.0, 2.0, 3.0, 100.0, 5.0], Precision::default()).unwrap();
/// assert_eq!(report.anomalies.len(), 1);
/// assert_eq!(report.anomalies[0].index, 3);
/// assert_eq!(report.anomalies[0].z_score, 1.9988);
/// assert_eq!(report.anomalies[0].severity, Severity::Medium);
/// assert_eq!(report.anomaly_rate, 20.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZScoreDetector {
    /// Flagging cutoff on |z|.
    threshold: f64,
    /// Severity cutoff on |z|.
    high_severity_z: f64,
}

impl Default for ZScoreDetector {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_ANOMALY_THRESHOLD,
            high_severity_z: HIGH_SEVERITY_Z,
        }
    }
}

impl ZScoreDetector {
    /// Creates a detector with the given flagging threshold and the default
    /// severity cutoff.
    ///
    /// # Returns
    ///
    /// `None` if `threshold` is not finite.
    pub fn new(threshold: f64) -> Option<Self> {
        Self::with_params(threshold, HIGH_SEVERITY_Z)
    }

    /// Creates a detector with custom cutoffs.
    ///
    /// # Returns
    ///
    /// `None` if either cutoff is not finite.
    pub fn with_params(threshold: f64, high_severity_z: f64) -> Option<Self> {
        if !threshold.is_finite() || !high_severity_z.is_finite() {
            return None;
        }
        Some(Self {
            threshold,
            high_severity_z,
        })
    }

    /// The flagging cutoff.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Scores every value and collects the anomalies.
    ///
    /// # Returns
    ///
    /// A [`Degenerate`] marker when fewer than [`MIN_ANOMALY_POINTS`] values
    /// are supplied. A zero-spread sample is not an error: the report comes
    /// back with [`DetectionStatus::NoVariance`] and no anomalies.
    ///
    /// # Complexity
    ///
    /// Time: O(n), Space: O(k) where k is the number of anomalies
    pub fn analyze(&self, data: &[f64], precision: Precision) -> Result<AnomalyReport, Degenerate> {
        if data.len() < MIN_ANOMALY_POINTS {
            return Err(Degenerate::for_len(MIN_ANOMALY_POINTS, data.len()));
        }
        let moments = Moments::of(data).ok_or(Degenerate::NoUsableData)?;

        if moments.is_degenerate() {
            debug!(n = moments.n, "no variance, skipping z-scores");
            return Ok(AnomalyReport {
                status: DetectionStatus::NoVariance,
                anomalies: Vec::new(),
                total_points: moments.n,
                anomaly_rate: 0.0,
                threshold_used: self.threshold,
                mean: precision.stat(moments.mean),
                std: 0.0,
            });
        }

        let anomalies: Vec<Anomaly> = data
            .iter()
            .enumerate()
            .filter_map(|(index, &value)| {
                let z = (value - moments.mean) / moments.std_dev;
                (z.abs() > self.threshold).then(|| Anomaly {
                    index,
                    value,
                    z_score: precision.stat(z),
                    severity: Severity::classify(z, self.high_severity_z),
                })
            })
            .collect();

        let rate = anomalies.len() as f64 / moments.n as f64 * 100.0;
        debug!(
            n = moments.n,
            flagged = anomalies.len(),
            threshold = self.threshold,
            "anomalies scored"
        );

        Ok(AnomalyReport {
            status: DetectionStatus::Evaluated,
            anomalies,
            total_points: moments.n,
            anomaly_rate: precision.rate(rate),
            threshold_used: self.threshold,
            mean: precision.stat(moments.mean),
            std: precision.stat(moments.std_dev),
        })
    }

    /// Indices of the flagged values, or an empty list when the sample is
    /// too short or has no spread.
    pub fn anomaly_indices(&self, data: &[f64]) -> Vec<usize> {
        self.analyze(data, Precision::Full)
            .map(|r| r.anomalies.into_iter().map(|a| a.index).collect())
            .unwrap_or_default()
    }
}
