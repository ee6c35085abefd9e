//! Point anomaly detection.
//!
//! # Detectors
//!
//! - [`ZScoreDetector`] — flags values whose standardized distance from the
//!   sample mean exceeds a threshold, with two severity tiers
//!
//! # References
//!
//! - Montgomery, D.C. (2019). *Introduction to Statistical Quality Control*, 8th ed.
//! - Iglewicz, B. & Hoaglin, D.C. (1993). *How to Detect and Handle Outliers*,
//!   ASQC Basic References in Quality Control 16.

mod zscore;

pub use zscore::{Anomaly, AnomalyReport, DetectionStatus, Severity, ZScoreDetector};
