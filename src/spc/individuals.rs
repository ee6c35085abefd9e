//! SPC evaluation of a sample of individual observations.
//!
//! # Algorithm
//!
//! 1. Compute the mean and population standard deviation once.
//! 2. Place the center line at the mean and limits at 1, 2 and 3 sigma.
//! 3. Flag every value strictly outside `[LCL, UCL]` (Rule 1).
//! 4. The process is stable iff no value was flagged.
//!
//! Only Rule 1 is evaluated. Run rules (Western Electric / Nelson 2-8) are
//! not applied, so a process reported stable here can still show
//! non-random patterns.

use serde::Serialize;
use tracing::debug;

use super::chart::{ControlLimits, OutOfControlPoint};
use crate::capability::{compute_capability, CapabilityIndices, SpecLimits};
use crate::config::Precision;
use crate::error::Degenerate;
use crate::stats::Moments;

/// Result of an SPC evaluation.
///
/// All statistics are rounded according to the [`Precision`] the report was
/// built with; the stability verdict is always derived from unrounded limits.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpcReport {
    /// Number of usable values.
    pub n: usize,
    /// Sample mean.
    pub mean: f64,
    /// Population standard deviation.
    pub std: f64,
    /// 1/2/3-sigma control limits.
    #[serde(flatten)]
    pub limits: ControlLimits,
    /// Values beyond the 3-sigma limits, in sample order.
    pub out_of_control_points: Vec<OutOfControlPoint>,
    /// Number of Rule 1 violations.
    pub rule_1_count: usize,
    /// `true` iff `rule_1_count == 0`.
    pub is_stable: bool,
    /// Capability indices, present when both specification limits are given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capability: Option<CapabilityIndices>,
    /// Values strictly outside the specification limits, present when both
    /// limits are given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out_of_spec_count: Option<usize>,
}

/// Evaluates a sample against its own 3-sigma control limits.
///
/// # Returns
///
/// [`Degenerate::NoUsableData`] for an empty sample.
///
/// # Examples
///
/// ```
/// use u_spc::config::Precision;
/// use u_spc::spc::evaluate;
///
/// let report = evaluate(&[1.0, 2.0, 3.0, 4.0, 5.0], None, Precision::default()).unwrap();
/// assert_eq!(report.mean, 3.0);
/// assert_eq!(report.std, 1.4142);
/// assert!(report.is_stable);
/// ```
pub fn evaluate(
    values: &[f64],
    spec: Option<&SpecLimits>,
    precision: Precision,
) -> Result<SpcReport, Degenerate> {
    let moments = Moments::of(values).ok_or(Degenerate::NoUsableData)?;
    let limits = ControlLimits::from_moments(moments.mean, moments.std_dev);

    let out_of_control_points: Vec<OutOfControlPoint> = values
        .iter()
        .enumerate()
        .filter_map(|(index, &value)| {
            limits.classify(value).map(|side| OutOfControlPoint {
                index,
                value,
                side,
            })
        })
        .collect();
    let rule_1_count = out_of_control_points.len();

    let complete_spec = spec.filter(|s| s.is_complete());
    let capability = complete_spec
        .and_then(|s| compute_capability(moments.mean, moments.std_dev, s))
        .map(|c| c.rounded(precision));
    let out_of_spec_count =
        complete_spec.map(|s| values.iter().filter(|&&v| s.is_violated_by(v)).count());

    debug!(
        n = moments.n,
        mean = moments.mean,
        std = moments.std_dev,
        rule_1_count,
        "spc evaluated"
    );

    Ok(SpcReport {
        n: moments.n,
        mean: precision.stat(moments.mean),
        std: precision.stat(moments.std_dev),
        limits: limits.rounded(precision),
        out_of_control_points,
        rule_1_count,
        is_stable: rule_1_count == 0,
        capability,
        out_of_spec_count,
    })
}
