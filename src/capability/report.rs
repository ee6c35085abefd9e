//! Capability evaluation of a whole sample.

use serde::Serialize;
use tracing::debug;

use super::indices::{compute_capability, CapabilityIndices, SpecLimits};
use crate::config::Precision;
use crate::error::Degenerate;
use crate::stats::Moments;

/// Whether the indices could be computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CapabilityStatus {
    /// Both limits were present and the indices are reported.
    Computed,
    /// A specification limit is missing; no index is reported.
    NoSpecLimits,
}

/// Capability of a sample against its specification limits.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CapabilityReport {
    /// Whether `indices` is present.
    pub status: CapabilityStatus,
    /// Number of usable values.
    pub n: usize,
    /// Sample mean.
    pub mean: f64,
    /// Population standard deviation.
    pub std: f64,
    /// The limits the sample was judged against.
    pub spec_limits: SpecLimits,
    /// Capability indices, absent when a limit is missing.
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub indices: Option<CapabilityIndices>,
}

impl CapabilityReport {
    /// Computes mean and sigma of `values` once and derives the indices.
    ///
    /// # Returns
    ///
    /// [`Degenerate::NoUsableData`] for an empty sample. Missing limits are
    /// not an error: the report has [`CapabilityStatus::NoSpecLimits`].
    ///
    /// # Examples
    ///
    /// ```
    /// use u_spc::capability::{CapabilityReport, CapabilityStatus, SpecLimits};
    /// use u_spc::config::Precision;
    ///
    /// let spec = SpecLimits::both(7.0, 13.0);
    /// let r = CapabilityReport::evaluate(&[9.0, 11.0, 9.0, 11.0], &spec, Precision::default()).unwrap();
    /// assert_eq!(r.status, CapabilityStatus::Computed);
    /// assert_eq!(r.indices.unwrap().cp, 1.0);
    /// ```
    pub fn evaluate(
        values: &[f64],
        spec: &SpecLimits,
        precision: Precision,
    ) -> Result<Self, Degenerate> {
        let moments = Moments::of(values).ok_or(Degenerate::NoUsableData)?;
        let indices = compute_capability(moments.mean, moments.std_dev, spec);
        let status = if indices.is_some() {
            CapabilityStatus::Computed
        } else {
            CapabilityStatus::NoSpecLimits
        };
        debug!(n = moments.n, ?status, "capability evaluated");

        Ok(Self {
            status,
            n: moments.n,
            mean: precision.stat(moments.mean),
            std: precision.stat(moments.std_dev),
            spec_limits: *spec,
            indices: indices.map(|i| i.rounded(precision)),
        })
    }
}
