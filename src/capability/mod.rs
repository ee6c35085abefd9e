//! Process capability analysis.
//!
//! Computes capability indices for assessing how well a process fits within
//! externally supplied specification limits.
//!
//! # Indices
//!
//! - **Cp** — Potential capability (spread vs tolerance)
//! - **Cpk** — Actual capability (centering considered)
//! - **Pp**, **Ppk** — Performance indices; numerically identical to Cp/Cpk
//!   here because no rational subgrouping separates short-term from
//!   long-term variation
//!
//! # References
//!
//! - Montgomery (2019), *Introduction to Statistical Quality Control*, 8th ed.

mod indices;
mod report;

pub use indices::{compute_capability, CapabilityIndices, CapabilityRating, SpecLimits};
pub use report::{CapabilityReport, CapabilityStatus};
