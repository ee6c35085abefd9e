//! Control limits and out-of-control points for an individuals chart.
//!
//! The center line is the sample mean and the limits sit at 1, 2 and 3
//! population standard deviations on either side.
//!
//! # References
//!
//! - Montgomery, D.C. (2019). *Introduction to Statistical Quality Control*, 8th ed.
//! - ASTM E2587 — Standard Practice for Use of Control Charts

use serde::Serialize;

use crate::config::Precision;

/// Control limits for a chart.
///
/// # Invariants
///
/// - `lcl <= lcl_2sigma <= lcl_1sigma <= center_line <= ucl_1sigma <= ucl_2sigma <= ucl`
/// - `ucl - lcl == 6 * sigma`
/// - All values are finite
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ControlLimits {
    /// Center line (process mean).
    pub center_line: f64,
    /// Upper control limit (CL + 3 sigma).
    pub ucl: f64,
    /// Lower control limit (CL - 3 sigma).
    pub lcl: f64,
    /// CL + 2 sigma.
    pub ucl_2sigma: f64,
    /// CL - 2 sigma.
    pub lcl_2sigma: f64,
    /// CL + 1 sigma.
    pub ucl_1sigma: f64,
    /// CL - 1 sigma.
    pub lcl_1sigma: f64,
}

impl ControlLimits {
    /// Builds the 1/2/3-sigma limits around `mean`.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_spc::spc::ControlLimits;
    ///
    /// let limits = ControlLimits::from_moments(10.0, 0.5);
    /// assert_eq!(limits.ucl, 11.5);
    /// assert_eq!(limits.lcl_1sigma, 9.5);
    /// assert_eq!(limits.band(2), Some((9.0, 11.0)));
    /// ```
    pub fn from_moments(mean: f64, sigma: f64) -> Self {
        Self {
            center_line: mean,
            ucl: mean + 3.0 * sigma,
            lcl: mean - 3.0 * sigma,
            ucl_2sigma: mean + 2.0 * sigma,
            lcl_2sigma: mean - 2.0 * sigma,
            ucl_1sigma: mean + sigma,
            lcl_1sigma: mean - sigma,
        }
    }

    /// `(lower, upper)` of the k-sigma band for k in 1..=3.
    pub fn band(&self, k: u8) -> Option<(f64, f64)> {
        match k {
            1 => Some((self.lcl_1sigma, self.ucl_1sigma)),
            2 => Some((self.lcl_2sigma, self.ucl_2sigma)),
            3 => Some((self.lcl, self.ucl)),
            _ => None,
        }
    }

    /// Which side of the 3-sigma limits `value` falls on, if outside.
    ///
    /// The interval is closed: a value equal to a limit is in control.
    pub fn classify(&self, value: f64) -> Option<LimitSide> {
        if value > self.ucl {
            Some(LimitSide::AboveUcl)
        } else if value < self.lcl {
            Some(LimitSide::BelowLcl)
        } else {
            None
        }
    }

    /// Whether `value` lies within `[lcl, ucl]`.
    pub fn contains(&self, value: f64) -> bool {
        self.classify(value).is_none()
    }

    /// Applies the reporting precision to every limit.
    pub fn rounded(&self, precision: Precision) -> Self {
        Self {
            center_line: precision.stat(self.center_line),
            ucl: precision.stat(self.ucl),
            lcl: precision.stat(self.lcl),
            ucl_2sigma: precision.stat(self.ucl_2sigma),
            lcl_2sigma: precision.stat(self.lcl_2sigma),
            ucl_1sigma: precision.stat(self.ucl_1sigma),
            lcl_1sigma: precision.stat(self.lcl_1sigma),
        }
    }
}

/// Side of the control limits a point fell on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LimitSide {
    /// Above the upper control limit.
    AboveUcl,
    /// Below the lower control limit.
    BelowLcl,
}

/// A point beyond the 3-sigma limits (Rule 1).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutOfControlPoint {
    /// Zero-based position of the value in the sample.
    pub index: usize,
    /// The measured value.
    pub value: f64,
    /// Which limit was crossed.
    #[serde(rename = "type")]
    pub side: LimitSide,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limits_are_symmetric_around_center() {
        let limits = ControlLimits::from_moments(25.0, 2.0);
        assert!((limits.center_line - 25.0).abs() < f64::EPSILON);
        assert!((limits.ucl - 31.0).abs() < f64::EPSILON);
        assert!((limits.lcl - 19.0).abs() < f64::EPSILON);
        assert!((limits.ucl_2sigma - 29.0).abs() < f64::EPSILON);
        assert!((limits.lcl_2sigma - 21.0).abs() < f64::EPSILON);
        assert!((limits.ucl_1sigma - 27.0).abs() < f64::EPSILON);
        assert!((limits.lcl_1sigma - 23.0).abs() < f64::EPSILON);
    }

    #[test]
    fn band_outside_range_is_none() {
        let limits = ControlLimits::from_moments(0.0, 1.0);
        assert!(limits.band(0).is_none());
        assert!(limits.band(4).is_none());
        assert_eq!(limits.band(1), Some((-1.0, 1.0)));
    }

    #[test]
    fn classify_uses_closed_interval() {
        let limits = ControlLimits::from_moments(10.0, 1.0);
        assert_eq!(limits.classify(13.0), None);
        assert_eq!(limits.classify(7.0), None);
        assert_eq!(limits.classify(13.01), Some(LimitSide::AboveUcl));
        assert_eq!(limits.classify(6.99), Some(LimitSide::BelowLcl));
        assert!(limits.contains(10.0));
    }

    #[test]
    fn zero_sigma_collapses_limits() {
        let limits = ControlLimits::from_moments(4.0, 0.0);
        assert_eq!(limits.ucl, limits.lcl);
        assert!(limits.contains(4.0));
        assert_eq!(limits.classify(4.5), Some(LimitSide::AboveUcl));
    }

    #[test]
    fn out_of_control_point_serializes_side_as_type() {
        let p = OutOfControlPoint {
            index: 3,
            value: 100.0,
            side: LimitSide::AboveUcl,
        };
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["type"], "above_ucl");
        assert_eq!(json["index"], 3);
    }
}
