//! Process capability indices (Cp, Cpk, Pp, Ppk).
//!
//! All indices use the population standard deviation of the whole sample.
//! With no subgroup structure the within-group and overall sigma coincide,
//! so Pp == Cp and Ppk == Cpk by construction.
//!
//! # References
//!
//! - Montgomery (2019), *Introduction to Statistical Quality Control*, 8th ed.,
//!   Chapter 8.
//! - Kane (1986), "Process Capability Indices", *Journal of Quality Technology*
//!   18(1), pp. 41--52.

use serde::{Deserialize, Serialize};

use crate::config::Precision;

/// Cpk below this is a process that cannot meet its specification.
const CPK_CRITICAL: f64 = 0.67;
/// Cpk below this is marginal.
const CPK_MARGINAL: f64 = 1.0;
/// Cpk at or above this is considered fully capable (Montgomery, Table 8.5).
const CPK_EXCELLENT: f64 = 1.33;

/// Specification limits supplied by the caller.
///
/// Never inferred from data. Capability indices require both bounds.
///
/// # Examples
///
/// ```
/// use u_spc::capability::SpecLimits;
///
/// let spec: SpecLimits = serde_json::from_str(r#"{"min_value": 9.0, "max_value": 11.0}"#).unwrap();
/// assert_eq!(spec.bounds(), Some((9.0, 11.0)));
///
/// let one_sided = SpecLimits::new(None, Some(11.0));
/// assert!(!one_sided.is_complete());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SpecLimits {
    /// Lower specification limit (LSL).
    #[serde(rename = "min_value", alias = "lsl", alias = "minValue", default)]
    pub lower: Option<f64>,
    /// Upper specification limit (USL).
    #[serde(rename = "max_value", alias = "usl", alias = "maxValue", default)]
    pub upper: Option<f64>,
}

impl SpecLimits {
    /// Creates limits from optional bounds.
    pub fn new(lower: Option<f64>, upper: Option<f64>) -> Self {
        Self { lower, upper }
    }

    /// Creates two-sided limits.
    pub fn both(lower: f64, upper: f64) -> Self {
        Self::new(Some(lower), Some(upper))
    }

    /// `(lower, upper)` when both are present and finite.
    pub fn bounds(&self) -> Option<(f64, f64)> {
        match (self.lower, self.upper) {
            (Some(l), Some(u)) if l.is_finite() && u.is_finite() => Some((l, u)),
            _ => None,
        }
    }

    /// Whether both bounds are available.
    pub fn is_complete(&self) -> bool {
        self.bounds().is_some()
    }

    /// Whether `value` lies strictly outside whichever bounds are present.
    pub fn is_violated_by(&self, value: f64) -> bool {
        self.lower.is_some_and(|l| value < l) || self.upper.is_some_and(|u| value > u)
    }
}

/// Qualitative reading of Cpk.
///
/// | Rating | Cpk |
/// |--------|-----|
/// | `degenerate` | sigma == 0, indices forced to 0 |
/// | `critical` | < 0.67 |
/// | `marginal` | 0.67 ..< 1.0 |
/// | `capable` | 1.0 ..< 1.33 |
/// | `excellent` | >= 1.33 |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CapabilityRating {
    /// Zero spread; the indices carry no capability information.
    Degenerate,
    /// Process cannot meet its specification.
    Critical,
    /// Process barely meets its specification.
    Marginal,
    /// Process meets its specification.
    Capable,
    /// Process meets its specification with margin.
    Excellent,
}

impl CapabilityRating {
    /// Classifies a Cpk value.
    pub fn classify(cpk: f64) -> Self {
        if cpk < CPK_CRITICAL {
            CapabilityRating::Critical
        } else if cpk < CPK_MARGINAL {
            CapabilityRating::Marginal
        } else if cpk < CPK_EXCELLENT {
            CapabilityRating::Capable
        } else {
            CapabilityRating::Excellent
        }
    }
}

/// Computed capability indices.
///
/// # Index interpretation
///
/// | Index | Value | Interpretation |
/// |-------|-------|----------------|
/// | Cp/Pp | >= 1.33 | Process spread fits the tolerance |
/// | Cpk/Ppk | >= 1.33 | Process is capable and centered |
///
/// When sigma is zero every index is reported as 0 and the rating is
/// [`CapabilityRating::Degenerate`]. Callers must read Cp = 0 with
/// sigma = 0 as a degenerate process, not an incapable one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CapabilityIndices {
    /// Cp = (USL - LSL) / (6 * sigma).
    pub cp: f64,
    /// Cpk = min(Cpu, Cpl).
    pub cpk: f64,
    /// Cpu = (USL - mean) / (3 * sigma).
    pub cpu: f64,
    /// Cpl = (mean - LSL) / (3 * sigma).
    pub cpl: f64,
    /// Pp, equal to Cp.
    pub pp: f64,
    /// Ppk, equal to Cpk.
    pub ppk: f64,
    /// Reading of Cpk.
    pub rating: CapabilityRating,
}

impl CapabilityIndices {
    /// Applies the reporting precision to every index.
    pub fn rounded(&self, precision: Precision) -> Self {
        Self {
            cp: precision.stat(self.cp),
            cpk: precision.stat(self.cpk),
            cpu: precision.stat(self.cpu),
            cpl: precision.stat(self.cpl),
            pp: precision.stat(self.pp),
            ppk: precision.stat(self.ppk),
            rating: self.rating,
        }
    }
}

/// Computes capability indices from a sample's mean and population sigma.
///
/// # Returns
///
/// `None` if either specification bound is absent, or if `mean`/`sigma` is
/// not finite. Capability analysis is optional, so this is an empty result
/// rather than an error.
///
/// Inverted limits (upper < lower) are not rejected; they produce negative
/// indices and a `critical` rating.
///
/// # Examples
///
/// ```
/// use u_spc::capability::{compute_capability, SpecLimits};
///
/// // USL - LSL == 6 sigma, centered
/// let idx = compute_capability(10.0, 1.0, &SpecLimits::both(7.0, 13.0)).unwrap();
/// assert!((idx.cp - 1.0).abs() < 1e-12);
/// assert!((idx.cpk - 1.0).abs() < 1e-12);
///
/// assert!(compute_capability(10.0, 1.0, &SpecLimits::new(Some(7.0), None)).is_none());
/// ```
pub fn compute_capability(mean: f64, sigma: f64, spec: &SpecLimits) -> Option<CapabilityIndices> {
    let (lsl, usl) = spec.bounds()?;
    if !mean.is_finite() || !sigma.is_finite() {
        return None;
    }

    if sigma == 0.0 {
        return Some(CapabilityIndices {
            cp: 0.0,
            cpk: 0.0,
            cpu: 0.0,
            cpl: 0.0,
            pp: 0.0,
            ppk: 0.0,
            rating: CapabilityRating::Degenerate,
        });
    }

    let cp = (usl - lsl) / (6.0 * sigma);
    let cpu = (usl - mean) / (3.0 * sigma);
    let cpl = (mean - lsl) / (3.0 * sigma);
    let cpk = cpu.min(cpl);

    Some(CapabilityIndices {
        cp,
        cpk,
        cpu,
        cpl,
        pp: cp,
        ppk: cpk,
        rating: CapabilityRating::classify(cpk),
    })
}
