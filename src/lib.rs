//! # u-spc
//!
//! Statistical process control (SPC), process capability indices, z-score
//! anomaly detection and linear trend forecasting over a single sample of
//! individual measurements.
//!
//! Every analysis is a pure function of its inputs: no state is kept
//! between calls and the same input always yields the same output.
//!
//! ## Modules
//!
//! - [`spc`] — Individuals control limits (1/2/3 sigma) and Rule 1 stability
//! - [`capability`] — Capability indices (Cp, Cpk, Pp, Ppk) against
//!   caller-supplied specification limits
//! - [`detection`] — Z-score anomaly detection with severity tiers
//! - [`forecast`] — OLS trend fit over positions and short-horizon extrapolation
//! - [`engine`] — One configured entry point over the four analyses
//! - [`bridge`] — JSON request/response interface used by `spc-bridge`
//! - [`sample`] — Coercion of loosely typed input into usable values
//! - [`stats`] — Compensated summation and population moments
//! - [`config`] — Thresholds, horizons and rounding policy
//! - [`error`] — Degenerate-data markers and hard failures
//!
//! ## Design Philosophy
//!
//! - **Domain-agnostic**: Operates on raw `f64` data
//! - **Numerical stability**: Statistics from `u-numflow`; constant samples
//!   have exactly zero spread
//! - **Degenerate data is not an error**: too little data is reported in
//!   the result, only an unreadable request fails
//!
//! ## Example
//!
//! ```
//! use u_spc::{Engine, Sample, SpecLimits};
//!
//! let sample = Sample::from_values(vec![9.0, 11.0, 9.0, 11.0]);
//! let report = Engine::default()
//!     .spc(&sample, Some(&SpecLimits::both(7.0, 13.0)))
//!     .unwrap();
//! assert_eq!(report.mean, 10.0);
//! assert_eq!(report.capability.unwrap().cpk, 1.0);
//! ```

pub mod bridge;
pub mod capability;
pub mod config;
pub mod detection;
pub mod engine;
pub mod error;
pub mod forecast;
pub mod sample;
pub mod spc;
pub mod stats;

pub use capability::{compute_capability, CapabilityIndices, SpecLimits};
pub use config::{EngineConfig, Precision};
pub use engine::{compute_spc, detect_anomalies, AnalysisKind, Engine};
pub use error::{BridgeError, Degenerate};
pub use sample::Sample;

/// Crate version, as reported by `spc-bridge --version`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
