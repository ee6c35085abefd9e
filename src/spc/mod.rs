//! Statistical Process Control (SPC) for individual observations.
//!
//! Derives a center line and 1/2/3-sigma control limits from the sample's
//! own variation and flags points beyond the 3-sigma limits.
//!
//! # Rules
//!
//! Only Nelson Rule 1 (a single point beyond 3 sigma) decides stability.
//! The run rules are not evaluated.
//!
//! # References
//!
//! - Montgomery, D.C. (2019). *Introduction to Statistical Quality Control*, 8th ed.
//! - ASTM E2587 — Standard Practice for Use of Control Charts
//! - Nelson, L.S. (1984). "The Shewhart Control Chart — Tests for Special Causes",
//!   *Journal of Quality Technology* 16(4), pp. 237-239.

mod chart;
mod individuals;

pub use chart::{ControlLimits, LimitSide, OutOfControlPoint};
pub use individuals::{evaluate, SpcReport};
